//! Database schema definitions and column families.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary payment records, keyed by `record_id` (ULID).
    pub const PAYMENTS: &str = "payments";

    /// Index: records by processor intent, keyed by
    /// `payment_intent_id || record_id`. Value is empty (index only).
    pub const PAYMENTS_BY_INTENT: &str = "payments_by_intent";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::PAYMENTS, cf::PAYMENTS_BY_INTENT]
}
