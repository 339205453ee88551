//! Wire types for the storepay API.

use serde::{Deserialize, Serialize};

/// Request body for payment intent creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    /// Payer name.
    pub name: String,
    /// Amount in major units, as a decimal string.
    pub amount: String,
    /// Payer email, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Free-text order note, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_note: Option<String>,
    /// Payer phone number, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Response from payment intent creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    /// Client secret to confirm the intent with.
    pub client_secret: String,
    /// Payment intent ID.
    pub payment_intent_id: String,
}

/// Request body for hosted checkout creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    /// Payer name.
    pub name: String,
    /// Amount in major units, as a decimal string.
    pub amount: String,
    /// Payer email, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// Response from hosted checkout creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutResponse {
    /// Hosted session ID.
    pub id: String,
    /// Checkout URL to redirect the user to.
    pub url: String,
}

/// Error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error message.
    pub error: String,
}
