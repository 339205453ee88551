//! Stripe webhook handler.
//!
//! The webhook is the sole writer of payment records. Once the signature
//! verifies, the handler always acknowledges with `{"received": true}`:
//! persistence and enrichment failures are logged and swallowed so the
//! processor never redelivers because of our storage problems.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use storepay_core::{record::STATUS_FAILED, PaymentRecord};
use storepay_store::Store;

use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::{PaymentIntent, StripeError, WebhookEvent};

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Whether the webhook was received.
    pub received: bool,
}

/// Handle Stripe webhooks.
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebhookResponse>, ApiError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("No signature provided".into()))?;

    let processor = state
        .processor
        .as_ref()
        .ok_or_else(|| ApiError::Config("Webhook secret not configured".into()))?;

    processor
        .verify_webhook_signature(&body, signature)
        .map_err(|e| match e {
            StripeError::Configuration(msg) => ApiError::Config(msg),
            _ => {
                tracing::warn!(error = %e, "Webhook signature verification failed");
                ApiError::BadRequest("Webhook signature verification failed".into())
            }
        })?;

    let event: WebhookEvent =
        serde_json::from_str(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    tracing::info!(
        event_type = %event.event_type,
        event_id = %event.id,
        "Received Stripe webhook"
    );

    match event.event_type.as_str() {
        "payment_intent.succeeded" => record_intent_succeeded(&state, &event.data.object).await,
        "payment_intent.payment_failed" => record_intent_failed(&state, &event.data.object),
        _ => {
            tracing::debug!(event_type = %event.event_type, "Unhandled Stripe event");
        }
    }

    Ok(Json(WebhookResponse { received: true }))
}

/// Parse the intent object out of a verified event payload.
fn parse_intent(object: &serde_json::Value) -> Option<PaymentIntent> {
    match serde_json::from_value(object.clone()) {
        Ok(intent) => Some(intent),
        Err(e) => {
            tracing::warn!(error = %e, "Malformed payment_intent payload");
            None
        }
    }
}

/// Build the record skeleton shared by both terminal event types.
fn base_record(intent: &PaymentIntent, status: &str) -> PaymentRecord {
    let mut record = PaymentRecord::new(&intent.id, intent.amount, &intent.currency, status);
    record.customer_id = intent.customer.clone();
    record.customer_name = intent.metadata_str("customer_name");
    record.customer_email = intent.metadata_str("customer_email");
    record.order_note = intent.metadata_str("order_note");
    record.phone_number = intent.metadata_str("phone_number");
    record
}

/// Persist a record, swallowing failures.
fn persist(state: &AppState, record: &PaymentRecord) {
    if let Err(e) = state.store.put_payment(record) {
        // A non-2xx here would make the processor redeliver; swallow.
        tracing::error!(
            error = %e,
            intent_id = %record.payment_intent_id,
            "Failed to persist payment record"
        );
    }
}

async fn record_intent_succeeded(state: &AppState, object: &serde_json::Value) {
    let Some(intent) = parse_intent(object) else {
        return;
    };

    let mut record = base_record(&intent, &intent.status);

    // Enrichment only: a failed lookup still leaves a usable record.
    if let Some(pm_id) = intent.payment_method_id() {
        if let Some(processor) = &state.processor {
            match processor.retrieve_payment_method(pm_id).await {
                Ok(pm) => {
                    record.payment_method_type = pm.method_type;
                    if let Some(card) = pm.card {
                        record.card_brand = card.brand;
                        record.card_last4 = card.last4;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        payment_method = %pm_id,
                        "Payment method lookup failed"
                    );
                }
            }
        }
    }

    record.metadata = serde_json::json!({
        "metadata": intent.metadata,
        "payment_method": intent.payment_method,
        "receipt_email": intent.receipt_email,
    });

    tracing::info!(
        intent_id = %intent.id,
        amount_cents = %intent.amount,
        status = %intent.status,
        customer_name = ?record.customer_name,
        "Recording successful payment"
    );

    persist(state, &record);
}

fn record_intent_failed(state: &AppState, object: &serde_json::Value) {
    let Some(intent) = parse_intent(object) else {
        return;
    };

    let mut record = base_record(&intent, STATUS_FAILED);
    record.metadata = serde_json::json!({
        "last_payment_error": intent.last_payment_error,
        "metadata": intent.metadata,
    });

    tracing::warn!(
        intent_id = %intent.id,
        amount_cents = %intent.amount,
        "Recording failed payment"
    );

    persist(state, &record);
}
