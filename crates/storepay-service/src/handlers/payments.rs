//! Payment initiation and listing handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use storepay_core::{PaymentRecord, PaymentRequest};
use storepay_store::Store;

use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::{
    CheckoutSessionParams, IntentMetadata, PaymentIntentParams, Processor, StripeError,
};

/// Response for payment intent creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    /// Client secret handed to the browser for card confirmation.
    pub client_secret: String,
    /// Payment intent ID.
    pub payment_intent_id: String,
}

/// Create a payment intent for the embedded card form.
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PaymentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let validated = body.validate()?;
    let processor = require_processor(&state)?;

    let params = PaymentIntentParams {
        amount_cents: validated.amount_cents,
        metadata: IntentMetadata {
            customer_name: body.name.clone(),
            amount: body.amount.clone(),
            customer_email: body.customer_email.clone().unwrap_or_default(),
            order_note: body.order_note.clone().unwrap_or_default(),
            phone_number: body.phone_number.clone().unwrap_or_default(),
        },
    };

    let intent = processor
        .create_payment_intent(&params)
        .await
        .map_err(|e| surface(&e, "Failed to create payment intent"))?;

    let client_secret = intent
        .client_secret
        .clone()
        .ok_or_else(|| ApiError::Processor("Stripe returned no client secret".into()))?;

    tracing::info!(
        intent_id = %intent.id,
        amount_cents = %validated.amount_cents,
        customer_name = %body.name,
        "Payment intent created"
    );

    Ok(Json(CreatePaymentIntentResponse {
        client_secret,
        payment_intent_id: intent.id,
    }))
}

/// Response for hosted checkout creation.
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Hosted session ID.
    pub id: String,
    /// Checkout URL to redirect the user to.
    pub url: String,
}

/// Create a hosted checkout session.
pub async fn create_checkout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PaymentRequest>,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    let validated = body.validate()?;
    let processor = require_processor(&state)?;

    let params = CheckoutSessionParams {
        product_name: validated.product_name(),
        amount_cents: validated.amount_cents,
        customer_email: body.customer_email.clone(),
        customer_name: body.name.clone(),
        amount: body.amount.clone(),
        success_url: state.config.success_url(),
        cancel_url: state.config.cancel_url(),
    };

    let session = processor
        .create_checkout_session(&params)
        .await
        .map_err(|e| surface(&e, "Failed to create checkout session"))?;

    let url = session
        .url
        .ok_or_else(|| ApiError::Processor("Stripe returned no checkout URL".into()))?;

    tracing::info!(
        session_id = %session.id,
        amount_cents = %validated.amount_cents,
        customer_name = %body.name,
        "Checkout session created"
    );

    Ok(Json(CreateCheckoutResponse {
        id: session.id,
        url,
    }))
}

/// Payment listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    /// Maximum number of payments to return (default: 50, max: 100).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// One recorded payment in a listing.
#[derive(Debug, Serialize)]
pub struct PaymentSummary {
    /// Local record ID.
    pub id: String,
    /// Processor payment intent ID.
    pub payment_intent_id: String,
    /// Amount in cents.
    pub amount_cents: i64,
    /// Amount formatted as dollars.
    pub amount_formatted: String,
    /// Currency.
    pub currency: String,
    /// Recorded status.
    pub status: String,
    /// Payer name.
    pub customer_name: Option<String>,
    /// Payer email.
    pub customer_email: Option<String>,
    /// Card brand, when known.
    pub card_brand: Option<String>,
    /// Card last four digits, when known.
    pub card_last4: Option<String>,
    /// Timestamp (ISO 8601).
    pub created_at: String,
}

impl From<&PaymentRecord> for PaymentSummary {
    #[allow(clippy::cast_precision_loss)]
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            payment_intent_id: record.payment_intent_id.clone(),
            amount_cents: record.amount_cents,
            amount_formatted: format!("${:.2}", record.amount_cents as f64 / 100.0),
            currency: record.currency.clone(),
            status: record.status.clone(),
            customer_name: record.customer_name.clone(),
            customer_email: record.customer_email.clone(),
            card_brand: record.card_brand.clone(),
            card_last4: record.card_last4.clone(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Payment listing response.
#[derive(Debug, Serialize)]
pub struct ListPaymentsResponse {
    /// Recorded payments (newest first).
    pub payments: Vec<PaymentSummary>,
    /// Whether there are more payments.
    pub has_more: bool,
}

/// List recorded payments, newest first.
pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<ListPaymentsResponse>, ApiError> {
    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(100);
    let records = state.store.list_payments(limit + 1, query.offset)?;

    let has_more = records.len() > limit;
    let payments: Vec<_> = records.iter().take(limit).map(PaymentSummary::from).collect();

    Ok(Json(ListPaymentsResponse { payments, has_more }))
}

/// The processor, or a server error when payments are not configured.
fn require_processor(state: &AppState) -> Result<&Arc<dyn Processor>, ApiError> {
    state
        .processor
        .as_ref()
        .ok_or_else(|| ApiError::Processor("Payment processor not configured".into()))
}

/// Surface a processor failure to the caller: the processor's own message
/// when it reported one, a generic fallback otherwise.
fn surface(error: &StripeError, fallback: &str) -> ApiError {
    tracing::error!(error = %error, "Processor request failed");
    match error {
        StripeError::Api { message, .. } => ApiError::Processor(message.clone()),
        _ => ApiError::Processor(fallback.to_string()),
    }
}
