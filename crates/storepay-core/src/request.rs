//! Incoming payment request validation.
//!
//! A `PaymentRequest` is the raw form submission. It is validated exactly once
//! into a `ValidatedPayment`, which carries the amount converted to integer
//! minor units. Nothing in this crate talks to the payment processor; a
//! request that fails validation must never reach it.

use serde::Deserialize;

/// A raw payment form submission.
///
/// `amount` is a decimal string in major units ("12.50"), exactly as typed
/// into the form. Optional fields are echoed into processor metadata. Field
/// names follow the form's JSON contract (`customerEmail`, `orderNote`,
/// `phoneNumber`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Payer name.
    #[serde(default)]
    pub name: String,

    /// Amount in major units, as a decimal string.
    #[serde(default)]
    pub amount: String,

    /// Payer email, if provided.
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Free-text order note, if provided.
    #[serde(default)]
    pub order_note: Option<String>,

    /// Payer phone number, if provided.
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl PaymentRequest {
    /// Validate the request and convert the amount to minor units.
    ///
    /// # Errors
    ///
    /// - `ValidationError::MissingFields` if `name` or `amount` is empty.
    /// - `ValidationError::InvalidAmount` if `amount` does not parse to a
    ///   finite positive number.
    pub fn validate(&self) -> Result<ValidatedPayment, ValidationError> {
        if self.name.is_empty() || self.amount.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let amount: f64 = self
            .amount
            .parse()
            .map_err(|_| ValidationError::InvalidAmount)?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }

        #[allow(clippy::cast_possible_truncation)]
        let amount_cents = (amount * 100.0).round() as i64;

        Ok(ValidatedPayment {
            amount_cents,
            request: self.clone(),
        })
    }
}

/// A payment request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedPayment {
    /// Amount in minor units (cents).
    pub amount_cents: i64,

    /// The original request, for metadata echoing.
    pub request: PaymentRequest,
}

impl ValidatedPayment {
    /// Display product name for hosted checkout ("Payment for {name}").
    #[must_use]
    pub fn product_name(&self) -> String {
        format!("Payment for {}", self.request.name)
    }
}

/// Errors produced by payment request validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `name` or `amount` was absent or empty.
    #[error("Name and amount are required")]
    MissingFields,

    /// `amount` did not parse to a finite positive number.
    #[error("Amount must be a positive number")]
    InvalidAmount,
}
