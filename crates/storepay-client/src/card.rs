//! Card form state.
//!
//! The processor hosts the three card input widgets (number, expiry, CVC)
//! and reports live validation events for each. The form state is a single
//! immutable value replaced on every event, so transitions are plain data
//! and can be tested without a UI.

/// Card brands the number widget can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBrand {
    /// Visa.
    Visa,
    /// Mastercard.
    Mastercard,
    /// American Express.
    Amex,
    /// Discover.
    Discover,
    /// JCB.
    Jcb,
    /// UnionPay.
    UnionPay,
    /// Not yet determined.
    Unknown,
}

impl CardBrand {
    /// Parse a brand string as reported by the number widget.
    #[must_use]
    pub fn from_widget(brand: &str) -> Self {
        match brand {
            "visa" => Self::Visa,
            "mastercard" => Self::Mastercard,
            "amex" | "american_express" => Self::Amex,
            "discover" => Self::Discover,
            "jcb" => Self::Jcb,
            "unionpay" => Self::UnionPay,
            _ => Self::Unknown,
        }
    }
}

/// The three processor-hosted card widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    /// Card number.
    Number,
    /// Expiry date.
    Expiry,
    /// CVC / security code.
    Cvc,
}

/// A live validation event from one widget.
#[derive(Debug, Clone, Default)]
pub struct FieldChange {
    /// The field holds a complete, plausible value.
    pub complete: bool,
    /// The field is empty.
    pub empty: bool,
    /// Detected brand (number field only).
    pub brand: Option<CardBrand>,
    /// Validation error message, if any.
    pub error: Option<String>,
}

/// Immutable card form state.
///
/// Each widget event or submission step produces a new value; nothing is
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFormState {
    /// Cardholder name text.
    pub cardholder_name: String,
    /// Number field reports complete.
    pub number_complete: bool,
    /// Expiry field reports complete.
    pub expiry_complete: bool,
    /// CVC field reports complete.
    pub cvc_complete: bool,
    /// Number field error slot.
    pub number_error: Option<String>,
    /// Expiry field error slot.
    pub expiry_error: Option<String>,
    /// CVC field error slot.
    pub cvc_error: Option<String>,
    /// Detected card brand, from number field events only.
    pub brand: Option<CardBrand>,
    /// Form-level error slot.
    pub form_error: Option<String>,
    /// A submission is in flight.
    pub processing: bool,
}

impl CardFormState {
    /// Replace the cardholder name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.cardholder_name = name.into();
        self
    }

    /// Apply a widget validation event.
    #[must_use]
    pub fn on_field_change(mut self, field: CardField, change: &FieldChange) -> Self {
        match field {
            CardField::Number => {
                self.number_complete = change.complete;
                self.number_error = change.error.clone();
                // Brand tracks the number field only: a detected brand
                // sticks until the field is emptied.
                match change.brand {
                    Some(brand) if brand != CardBrand::Unknown => self.brand = Some(brand),
                    _ if change.empty => self.brand = None,
                    _ => {}
                }
            }
            CardField::Expiry => {
                self.expiry_complete = change.complete;
                self.expiry_error = change.error.clone();
            }
            CardField::Cvc => {
                self.cvc_complete = change.complete;
                self.cvc_error = change.error.clone();
            }
        }
        self
    }

    /// Whether the form passes the local submission guard: cardholder name
    /// present and all three widgets complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cardholder_name.trim().is_empty()
            && self.number_complete
            && self.expiry_complete
            && self.cvc_complete
    }

    /// Clear every error slot.
    #[must_use]
    pub fn without_errors(mut self) -> Self {
        self.number_error = None;
        self.expiry_error = None;
        self.cvc_error = None;
        self.form_error = None;
        self
    }

    /// Set the form-level error slot.
    #[must_use]
    pub fn with_form_error(mut self, message: impl Into<String>) -> Self {
        self.form_error = Some(message.into());
        self
    }

    /// Set the processing flag.
    #[must_use]
    pub fn with_processing(mut self, processing: bool) -> Self {
        self.processing = processing;
        self
    }
}
