//! `RocksDB` storage implementation.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use storepay_core::{PaymentRecord, RecordId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Store for RocksStore {
    fn put_payment(&self, record: &PaymentRecord) -> Result<()> {
        let payments = self.cf(cf::PAYMENTS)?;
        let by_intent = self.cf(cf::PAYMENTS_BY_INTENT)?;

        let value = Self::serialize(record)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&payments, keys::payment_key(&record.id), value);
        batch.put_cf(
            &by_intent,
            keys::intent_payment_key(&record.payment_intent_id, &record.id),
            [],
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_payment(&self, record_id: &RecordId) -> Result<Option<PaymentRecord>> {
        let payments = self.cf(cf::PAYMENTS)?;

        self.db
            .get_cf(&payments, keys::payment_key(record_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn payments_by_intent(&self, payment_intent_id: &str) -> Result<Vec<PaymentRecord>> {
        let by_intent = self.cf(cf::PAYMENTS_BY_INTENT)?;
        let prefix = keys::intent_prefix(payment_intent_id);

        let mut records = Vec::new();
        let iter = self
            .db
            .iterator_cf(&by_intent, IteratorMode::From(&prefix, Direction::Forward));

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            let Some(record_id) = keys::extract_record_id_from_intent_key(&key) else {
                continue;
            };
            let record = self.get_payment(&record_id)?.ok_or(StoreError::NotFound)?;
            records.push(record);
        }

        Ok(records)
    }

    fn list_payments(&self, limit: usize, offset: usize) -> Result<Vec<PaymentRecord>> {
        let payments = self.cf(cf::PAYMENTS)?;

        // ULID keys sort chronologically; iterate backwards for newest first.
        let iter = self.db.iterator_cf(&payments, IteratorMode::End);

        let mut records = Vec::with_capacity(limit);
        for item in iter.skip(offset).take(limit) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            records.push(Self::deserialize(&value)?);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn record(intent: &str) -> PaymentRecord {
        PaymentRecord::new(intent, 1250, "usd", "succeeded")
    }

    #[test]
    fn put_get_roundtrip() {
        let (store, _dir) = open_store();

        let mut rec = record("pi_1");
        rec.customer_name = Some("Alice".into());
        rec.metadata = serde_json::json!({"order_note": "gift wrap"});
        store.put_payment(&rec).unwrap();

        let loaded = store.get_payment(&rec.id).unwrap().unwrap();
        assert_eq!(loaded.payment_intent_id, "pi_1");
        assert_eq!(loaded.customer_name.as_deref(), Some("Alice"));
        assert_eq!(loaded.metadata, rec.metadata);
    }

    #[test]
    fn get_missing_returns_none() {
        let (store, _dir) = open_store();
        assert!(store.get_payment(&RecordId::generate()).unwrap().is_none());
    }

    #[test]
    fn duplicate_intent_produces_two_rows() {
        let (store, _dir) = open_store();

        store.put_payment(&record("pi_dup")).unwrap();
        store.put_payment(&record("pi_dup")).unwrap();

        let rows = store.payments_by_intent("pi_dup").unwrap();
        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0].id, rows[1].id);
    }

    #[test]
    fn intent_index_isolates_intents() {
        let (store, _dir) = open_store();

        store.put_payment(&record("pi_1")).unwrap();
        store.put_payment(&record("pi_12")).unwrap();

        assert_eq!(store.payments_by_intent("pi_1").unwrap().len(), 1);
        assert_eq!(store.payments_by_intent("pi_12").unwrap().len(), 1);
        assert!(store.payments_by_intent("pi_other").unwrap().is_empty());
    }

    #[test]
    fn list_payments_newest_first() {
        let (store, _dir) = open_store();

        let first = record("pi_a");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = record("pi_b");
        store.put_payment(&first).unwrap();
        store.put_payment(&second).unwrap();

        let listed = store.list_payments(10, 0).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].payment_intent_id, "pi_b");
        assert_eq!(listed[1].payment_intent_id, "pi_a");
    }

    #[test]
    fn list_payments_respects_limit_and_offset() {
        let (store, _dir) = open_store();

        for i in 0..5 {
            store.put_payment(&record(&format!("pi_{i}"))).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        assert_eq!(store.list_payments(2, 0).unwrap().len(), 2);
        assert_eq!(store.list_payments(10, 4).unwrap().len(), 1);
        assert!(store.list_payments(10, 5).unwrap().is_empty());
    }
}
