//! Persisted payment outcome records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RecordId;

/// Status string written for failed payments, regardless of what the
/// processor reported on the event itself.
pub const STATUS_FAILED: &str = "failed";

/// A locally persisted payment outcome.
///
/// One record is written per terminal processor event
/// (`payment_intent.succeeded` or `payment_intent.payment_failed`). Records
/// are never updated or deleted. The recorder performs no existence check
/// before insert, so a redelivered event produces a second row with a fresh
/// `id` and the same `payment_intent_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Local record ID (ULID, time-ordered).
    pub id: RecordId,

    /// Processor payment intent ID. The logical key, not enforced unique.
    pub payment_intent_id: String,

    /// Processor customer ID, when the intent carried one.
    pub customer_id: Option<String>,

    /// Amount in minor units (cents).
    pub amount_cents: i64,

    /// Currency code (e.g. "usd").
    pub currency: String,

    /// Processor-reported status, or the literal "failed".
    pub status: String,

    /// Payer name from intent metadata.
    pub customer_name: Option<String>,

    /// Payer email from intent metadata.
    pub customer_email: Option<String>,

    /// Order note from intent metadata.
    pub order_note: Option<String>,

    /// Phone number from intent metadata.
    pub phone_number: Option<String>,

    /// Payment method type ("card"), from the payment-method lookup.
    pub payment_method_type: Option<String>,

    /// Card brand ("visa", ...), from the payment-method lookup.
    pub card_brand: Option<String>,

    /// Card last four digits, from the payment-method lookup.
    pub card_last4: Option<String>,

    /// Opaque blob: raw processor metadata, payment-method reference and
    /// receipt email on success; the processor's last error on failure.
    pub metadata: serde_json::Value,

    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Create a record with a fresh ID and all optional fields empty.
    #[must_use]
    pub fn new(
        payment_intent_id: impl Into<String>,
        amount_cents: i64,
        currency: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            payment_intent_id: payment_intent_id.into(),
            customer_id: None,
            amount_cents,
            currency: currency.into(),
            status: status.into(),
            customer_name: None,
            customer_email: None,
            order_note: None,
            phone_number: None,
            payment_method_type: None,
            card_brand: None,
            card_last4: None,
            metadata: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    /// Whether this record represents a failed payment.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == STATUS_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_empty_optionals() {
        let record = PaymentRecord::new("pi_123", 1250, "usd", "succeeded");
        assert_eq!(record.payment_intent_id, "pi_123");
        assert_eq!(record.amount_cents, 1250);
        assert!(record.customer_name.is_none());
        assert!(record.card_brand.is_none());
        assert!(record.metadata.is_null());
        assert!(!record.is_failed());
    }

    #[test]
    fn failed_status_detected() {
        let record = PaymentRecord::new("pi_123", 1250, "usd", STATUS_FAILED);
        assert!(record.is_failed());
    }

    #[test]
    fn two_records_for_same_intent_have_distinct_ids() {
        let a = PaymentRecord::new("pi_dup", 100, "usd", "succeeded");
        let b = PaymentRecord::new("pi_dup", 100, "usd", "succeeded");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn record_serde_roundtrip() {
        let mut record = PaymentRecord::new("pi_rt", 500, "usd", "succeeded");
        record.customer_name = Some("Alice".into());
        record.metadata = serde_json::json!({"receipt_email": "a@x.com"});

        let json = serde_json::to_string(&record).unwrap();
        let parsed: PaymentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.customer_name.as_deref(), Some("Alice"));
        assert_eq!(parsed.metadata, record.metadata);
    }
}
