//! Embedded card flow submission driver.
//!
//! Drives the guarded three-step submission against the processor's
//! client-side surface: validate the collected field state, tokenize the
//! card into a payment method, confirm the payment intent. The steps are
//! strictly sequential and fire-once; a failure at any step maps onto a
//! field or the form and halts.

use async_trait::async_trait;

use crate::card::{CardField, CardFormState, FieldChange};

/// Error shape the processor's client SDK reports.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct CardError {
    /// Error type ("card_error", "validation_error", ...).
    pub error_type: String,
    /// Machine-readable code ("incorrect_number", "card_declined", ...).
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl CardError {
    /// A card error with a code.
    #[must_use]
    pub fn card(code: &str, message: &str) -> Self {
        Self {
            error_type: "card_error".to_string(),
            code: Some(code.to_string()),
            message: message.to_string(),
        }
    }
}

/// Billing details attached when tokenizing the card.
#[derive(Debug, Clone)]
pub struct BillingDetails {
    /// Cardholder name.
    pub name: String,
    /// Payer email, if known.
    pub email: Option<String>,
}

/// Result of confirming a payment intent.
#[derive(Debug, Clone)]
pub struct ConfirmOutcome {
    /// The intent's status after confirmation ("succeeded", ...).
    pub status: String,
}

/// The processor's client-side surface for the hosted card widgets.
///
/// Implemented by the real widget bridge in a front end, and by fakes in
/// tests. The driver only ever calls these in sequence, one submission at a
/// time.
#[async_trait]
pub trait CardElements {
    /// Validate the full collected field state (cross-field checks the
    /// processor performs before any network round-trip).
    async fn validate(&self) -> Result<(), CardError>;

    /// Tokenize the card plus billing details into a payment-method id.
    async fn create_payment_method(&self, billing: &BillingDetails)
        -> Result<String, CardError>;

    /// Confirm the payment intent with the tokenized payment method.
    async fn confirm_payment(
        &self,
        client_secret: &str,
        payment_method_id: &str,
    ) -> Result<ConfirmOutcome, CardError>;
}

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Terminal success; the caller navigates to the success page with the
    /// intent id.
    Completed {
        /// The confirmed payment intent's id.
        payment_intent_id: String,
    },
    /// Rejected locally or failed remotely; the error is in the form state.
    Halted,
}

/// One embedded card checkout, bound to a previously created payment intent.
///
/// Holds the form state and the intent's client secret. The handle is passed
/// explicitly; there is no process-wide processor singleton, so concurrent
/// form instances do not share state.
#[derive(Debug, Clone)]
pub struct CardCheckout {
    state: CardFormState,
    client_secret: String,
    payment_intent_id: String,
    customer_email: Option<String>,
}

impl CardCheckout {
    /// Create a checkout for an intent returned by the service.
    #[must_use]
    pub fn new(
        client_secret: impl Into<String>,
        payment_intent_id: impl Into<String>,
        customer_email: Option<String>,
    ) -> Self {
        Self {
            state: CardFormState::default(),
            client_secret: client_secret.into(),
            payment_intent_id: payment_intent_id.into(),
            customer_email,
        }
    }

    /// The current form state.
    #[must_use]
    pub fn state(&self) -> &CardFormState {
        &self.state
    }

    /// Update the cardholder name.
    pub fn set_cardholder_name(&mut self, name: impl Into<String>) {
        self.state = self.state.clone().with_name(name);
    }

    /// Apply a widget validation event.
    pub fn on_field_change(&mut self, field: CardField, change: &FieldChange) {
        self.state = self.state.clone().on_field_change(field, change);
    }

    /// Attempt to submit the payment.
    ///
    /// The guard rejects locally, with no processor call, while a submission
    /// is in flight, while the cardholder name is blank, or while any card
    /// field is incomplete. On a guarded pass the three processor calls run
    /// strictly in sequence; the first failure is mapped onto the form state
    /// and halts the flow. There is no retry.
    pub async fn submit(&mut self, elements: &impl CardElements) -> SubmitOutcome {
        if self.state.processing {
            return SubmitOutcome::Halted;
        }

        if self.state.cardholder_name.trim().is_empty() {
            self.state = self
                .state
                .clone()
                .with_form_error("Cardholder name is required");
            return SubmitOutcome::Halted;
        }

        if !self.state.is_complete() {
            self.state = self
                .state
                .clone()
                .with_form_error("Please complete all card fields");
            return SubmitOutcome::Halted;
        }

        self.state = self.state.clone().without_errors().with_processing(true);

        if let Err(e) = elements.validate().await {
            self.fail(&e);
            return SubmitOutcome::Halted;
        }

        let billing = BillingDetails {
            name: self.state.cardholder_name.clone(),
            email: self.customer_email.clone(),
        };

        let payment_method_id = match elements.create_payment_method(&billing).await {
            Ok(id) => id,
            Err(e) => {
                self.fail(&e);
                return SubmitOutcome::Halted;
            }
        };

        let outcome = match elements
            .confirm_payment(&self.client_secret, &payment_method_id)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                self.fail(&e);
                return SubmitOutcome::Halted;
            }
        };

        self.state = self.state.clone().with_processing(false);

        if outcome.status == "succeeded" {
            tracing::debug!(
                payment_intent_id = %self.payment_intent_id,
                "Card payment confirmed"
            );
            SubmitOutcome::Completed {
                payment_intent_id: self.payment_intent_id.clone(),
            }
        } else {
            tracing::debug!(status = %outcome.status, "Payment not terminal");
            self.state = self
                .state
                .clone()
                .with_form_error(format!("Payment {}", outcome.status));
            SubmitOutcome::Halted
        }
    }

    /// Map a processor failure onto the form state and clear the in-flight
    /// flag.
    fn fail(&mut self, error: &CardError) {
        self.state = map_card_error(self.state.clone(), error).with_processing(false);
    }
}

/// Map a processor error onto its field slot.
///
/// Card-number codes target the number slot, CVC codes the CVC slot, expiry
/// codes (including expired cards) the expiry slot. Everything else,
/// declines included, is a form-level error.
fn map_card_error(state: CardFormState, error: &CardError) -> CardFormState {
    if error.error_type != "card_error" {
        return state.with_form_error(error.message.clone());
    }

    let change = FieldChange {
        error: Some(error.message.clone()),
        ..FieldChange::default()
    };

    match error.code.as_deref() {
        Some("incorrect_number" | "invalid_number") => {
            state.on_field_change(CardField::Number, &change)
        }
        Some("incorrect_cvc" | "invalid_cvc") => state.on_field_change(CardField::Cvc, &change),
        Some("expired_card" | "invalid_expiry_month" | "invalid_expiry_year") => {
            state.on_field_change(CardField::Expiry, &change)
        }
        _ => state.with_form_error(error.message.clone()),
    }
}
