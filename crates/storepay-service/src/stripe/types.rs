//! Stripe API types.

use serde::{Deserialize, Serialize};

/// Metadata echoed onto a payment intent.
///
/// Every field is a plain string; absent form fields echo as empty strings,
/// matching what the processor stores in its metadata map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntentMetadata {
    /// Payer name.
    pub customer_name: String,
    /// Original amount string in major units, as submitted.
    pub amount: String,
    /// Payer email ("" when absent).
    pub customer_email: String,
    /// Order note ("" when absent).
    pub order_note: String,
    /// Phone number ("" when absent).
    pub phone_number: String,
}

/// Parameters for creating a payment intent.
#[derive(Debug, Clone)]
pub struct PaymentIntentParams {
    /// Amount in minor units (cents). Currency is fixed to "usd".
    pub amount_cents: i64,
    /// Metadata echoed onto the intent.
    pub metadata: IntentMetadata,
}

/// Parameters for creating a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSessionParams {
    /// Display product name ("Payment for {name}").
    pub product_name: String,
    /// Amount in minor units (cents). Currency is fixed to "usd".
    pub amount_cents: i64,
    /// Customer email to prefill, when given.
    pub customer_email: Option<String>,
    /// Payer name echoed into session metadata.
    pub customer_name: String,
    /// Original amount string echoed into session metadata.
    pub amount: String,
    /// Absolute success redirect URL (with session-id placeholder).
    pub success_url: String,
    /// Absolute cancel redirect URL.
    pub cancel_url: String,
}

/// Stripe `PaymentIntent` object.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Payment intent ID.
    pub id: String,
    /// Amount in cents.
    #[serde(default)]
    pub amount: i64,
    /// Currency (e.g., "usd").
    #[serde(default)]
    pub currency: String,
    /// Status (succeeded, processing, requires_payment_method, ...).
    #[serde(default)]
    pub status: String,
    /// Customer ID.
    #[serde(default)]
    pub customer: Option<String>,
    /// Client secret handed to the browser for confirmation.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Payment method reference. A plain id string on webhook events, or an
    /// expanded object when the API was asked to expand it.
    #[serde(default)]
    pub payment_method: Option<serde_json::Value>,
    /// Receipt email.
    #[serde(default)]
    pub receipt_email: Option<String>,
    /// Metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Last payment error, present on failed intents.
    #[serde(default)]
    pub last_payment_error: Option<serde_json::Value>,
}

impl PaymentIntent {
    /// The payment method reference, when it is a plain id string.
    #[must_use]
    pub fn payment_method_id(&self) -> Option<&str> {
        self.payment_method.as_ref().and_then(|v| v.as_str())
    }

    /// Look up a metadata value, treating empty strings as absent.
    #[must_use]
    pub fn metadata_str(&self, key: &str) -> Option<String> {
        self.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
    }
}

/// Stripe Checkout session object.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session ID.
    pub id: String,
    /// Checkout URL to redirect the user to.
    #[serde(default)]
    pub url: Option<String>,
    /// Session status.
    #[serde(default)]
    pub status: Option<String>,
    /// Payment status.
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Total amount in cents.
    #[serde(default)]
    pub amount_total: Option<i64>,
    /// Metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Stripe payment method object.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethod {
    /// Payment method ID.
    pub id: String,
    /// Payment method type ("card", ...).
    #[serde(rename = "type", default)]
    pub method_type: Option<String>,
    /// Card details, when the method is a card.
    #[serde(default)]
    pub card: Option<PaymentMethodCard>,
}

/// Card details on a payment method.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodCard {
    /// Card brand ("visa", "mastercard", ...).
    #[serde(default)]
    pub brand: Option<String>,
    /// Last four digits.
    #[serde(default)]
    pub last4: Option<String>,
}

/// Stripe webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event ID.
    pub id: String,
    /// Event type (e.g., "payment_intent.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event data.
    pub data: WebhookEventData,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
}

/// Webhook event data container.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    /// The event object.
    pub object: serde_json::Value,
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Parameter that caused the error.
    #[serde(default)]
    pub param: Option<String>,
}
