//! Stripe API client implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::crypto::{self, SignatureError};

use super::types::{
    CheckoutSession, CheckoutSessionParams, PaymentIntent, PaymentIntentParams, PaymentMethod,
    StripeErrorResponse,
};
use super::Processor;

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("{message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// Invalid webhook signature.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    webhook_secret: Option<String>,
    api_base: String,
}

/// Fixed checkout currency.
const CURRENCY: &str = "usd";

impl StripeClient {
    /// Default Stripe API base URL.
    const BASE_URL: &'static str = "https://api.stripe.com/v1";

    /// Create a new Stripe client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    /// * `webhook_secret` - Optional webhook signing secret (whsec_...)
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, webhook_secret: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            webhook_secret,
            api_base: Self::BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (tests point this at a mock server).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}

#[async_trait]
impl Processor for StripeClient {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, StripeError> {
        let form = vec![
            ("amount", params.amount_cents.to_string()),
            ("currency", CURRENCY.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
            (
                "metadata[customer_name]",
                params.metadata.customer_name.clone(),
            ),
            ("metadata[amount]", params.metadata.amount.clone()),
            (
                "metadata[customer_email]",
                params.metadata.customer_email.clone(),
            ),
            ("metadata[order_note]", params.metadata.order_note.clone()),
            (
                "metadata[phone_number]",
                params.metadata.phone_number.clone(),
            ),
        ];

        let response = self
            .client
            .post(format!("{}/payment_intents", self.api_base))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, StripeError> {
        let mut form = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price_data][currency]", CURRENCY.to_string()),
            (
                "line_items[0][price_data][product_data][name]",
                params.product_name.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                params.amount_cents.to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("metadata[customer_name]", params.customer_name.clone()),
            ("metadata[amount]", params.amount.clone()),
            ("success_url", params.success_url.clone()),
            ("cancel_url", params.cancel_url.clone()),
            // Stripe-hosted custom fields: optional order note, required phone
            ("custom_fields[0][key]", "order_note".to_string()),
            ("custom_fields[0][label][type]", "custom".to_string()),
            ("custom_fields[0][label][custom]", "Order Note".to_string()),
            ("custom_fields[0][type]", "text".to_string()),
            ("custom_fields[0][optional]", "true".to_string()),
            ("custom_fields[1][key]", "phone_number".to_string()),
            ("custom_fields[1][label][type]", "custom".to_string()),
            ("custom_fields[1][label][custom]", "Phone Number".to_string()),
            ("custom_fields[1][type]", "numeric".to_string()),
        ];

        if let Some(email) = &params.customer_email {
            form.push(("customer_email", email.clone()));
        }

        tracing::debug!(
            product_name = %params.product_name,
            amount_cents = %params.amount_cents,
            "Creating Stripe checkout session"
        );

        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.api_base))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn retrieve_payment_method(
        &self,
        payment_method_id: &str,
    ) -> Result<PaymentMethod, StripeError> {
        let response = self
            .client
            .get(format!(
                "{}/payment_methods/{}",
                self.api_base, payment_method_id
            ))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    fn verify_webhook_signature(
        &self,
        payload: &str,
        signature: &str,
    ) -> Result<(), StripeError> {
        let secret = self
            .webhook_secret
            .as_ref()
            .ok_or_else(|| StripeError::Configuration("Webhook secret not configured".into()))?;

        crypto::verify_signature(secret, payload, signature).map_err(|e| match e {
            SignatureError::MissingTimestamp | SignatureError::Invalid => {
                StripeError::InvalidSignature
            }
        })
    }
}
