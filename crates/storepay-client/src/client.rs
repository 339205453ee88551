//! Storepay HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, CreateCheckoutRequest, CreateCheckoutResponse, CreatePaymentIntentRequest,
    CreatePaymentIntentResponse,
};

/// Storepay API client.
///
/// Wraps the service's checkout initiation endpoints. The endpoints are
/// public (they serve the storefront form), so no credentials are needed.
#[derive(Debug, Clone)]
pub struct StorepayClient {
    client: Client,
    base_url: String,
}

impl StorepayClient {
    /// Create a new storepay client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the storepay service
    ///   (e.g., `"http://localhost:8080"`)
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a payment intent for the embedded card form.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_payment_intent(
        &self,
        name: impl Into<String>,
        amount: impl Into<String>,
        customer_email: Option<&str>,
    ) -> Result<CreatePaymentIntentResponse, ClientError> {
        let request = CreatePaymentIntentRequest {
            name: name.into(),
            amount: amount.into(),
            customer_email: customer_email.map(String::from),
            order_note: None,
            phone_number: None,
        };
        self.create_payment_intent_with(&request).await
    }

    /// Create a payment intent with the full request shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_payment_intent_with(
        &self,
        request: &CreatePaymentIntentRequest,
    ) -> Result<CreatePaymentIntentResponse, ClientError> {
        let url = format!("{}/api/create-payment-intent", self.base_url);

        let response = self.client.post(&url).json(request).send().await?;

        Self::handle_response(response).await
    }

    /// Create a hosted checkout session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_checkout(
        &self,
        name: impl Into<String>,
        amount: impl Into<String>,
        customer_email: Option<&str>,
    ) -> Result<CreateCheckoutResponse, ClientError> {
        let url = format!("{}/api/create-checkout", self.base_url);
        let request = CreateCheckoutRequest {
            name: name.into(),
            amount: amount.into(),
            customer_email: customer_email.map(String::from),
        };

        let response = self.client.post(&url).json(&request).send().await?;

        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse the flat {"error": ...} body
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        let message = match error_body {
            Ok(api_error) => api_error.error,
            Err(_) => format!("HTTP {status}"),
        };

        Err(ClientError::Api {
            message,
            status: status.as_u16(),
        })
    }
}
