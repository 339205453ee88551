//! `RocksDB` storage layer for storepay.
//!
//! This crate persists payment outcome records using `RocksDB` with column
//! families for the primary records and the intent-id index.
//!
//! # Architecture
//!
//! - `payments`: primary records, keyed by `record_id` (ULID)
//! - `payments_by_intent`: index for finding all records written for one
//!   processor intent, keyed by `intent_id || record_id`
//!
//! Records are insert-only: the recorder never updates or deletes a row, and
//! `put_payment` deliberately performs no existence check — redelivered
//! processor events land as additional rows under the same intent id.
//!
//! # Example
//!
//! ```no_run
//! use storepay_store::{RocksStore, Store};
//! use storepay_core::PaymentRecord;
//!
//! let store = RocksStore::open("/tmp/storepay-db").unwrap();
//!
//! let record = PaymentRecord::new("pi_123", 1250, "usd", "succeeded");
//! store.put_payment(&record).unwrap();
//!
//! let rows = store.payments_by_intent("pi_123").unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use storepay_core::{PaymentRecord, RecordId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    /// Insert a payment record.
    ///
    /// Also maintains the intent-id index. No uniqueness is enforced on the
    /// intent id; inserting two records for the same intent yields two rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_payment(&self, record: &PaymentRecord) -> Result<()>;

    /// Get a payment record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_payment(&self, record_id: &RecordId) -> Result<Option<PaymentRecord>>;

    /// List all records written for one processor intent, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn payments_by_intent(&self, payment_intent_id: &str) -> Result<Vec<PaymentRecord>>;

    /// List payment records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_payments(&self, limit: usize, offset: usize) -> Result<Vec<PaymentRecord>>;
}
