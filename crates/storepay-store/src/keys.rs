//! Key encoding utilities for `RocksDB`.

use storepay_core::RecordId;

/// Separator between the variable-length intent id and the record id in
/// index keys. Processor ids are ASCII and never contain NUL, so this keeps
/// one intent's prefix from matching another intent that extends it.
const SEP: u8 = 0;

/// Create a payment key from a record ID.
#[must_use]
pub fn payment_key(record_id: &RecordId) -> Vec<u8> {
    record_id.to_bytes().to_vec()
}

/// Create an intent-index key.
///
/// Format: `payment_intent_id || 0x00 || record_id (16 bytes)`
///
/// Since ULIDs are time-ordered, records for an intent sort by write time.
#[must_use]
pub fn intent_payment_key(payment_intent_id: &str, record_id: &RecordId) -> Vec<u8> {
    let mut key = Vec::with_capacity(payment_intent_id.len() + 17);
    key.extend_from_slice(payment_intent_id.as_bytes());
    key.push(SEP);
    key.extend_from_slice(&record_id.to_bytes());
    key
}

/// Create a prefix for iterating all records for an intent.
#[must_use]
pub fn intent_prefix(payment_intent_id: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(payment_intent_id.len() + 1);
    prefix.extend_from_slice(payment_intent_id.as_bytes());
    prefix.push(SEP);
    prefix
}

/// Extract the record ID from an intent-index key.
///
/// Returns `None` if the key is too short to hold a record id.
#[must_use]
pub fn extract_record_id_from_intent_key(key: &[u8]) -> Option<RecordId> {
    if key.len() < 17 {
        return None;
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[key.len() - 16..]);
    RecordId::from_bytes(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_key_length() {
        let id = RecordId::generate();
        assert_eq!(payment_key(&id).len(), 16);
    }

    #[test]
    fn intent_payment_key_format() {
        let id = RecordId::generate();
        let key = intent_payment_key("pi_abc", &id);

        assert_eq!(key.len(), 6 + 1 + 16);
        assert_eq!(&key[..6], b"pi_abc");
        assert_eq!(key[6], 0);
        assert_eq!(&key[7..], id.to_bytes());
    }

    #[test]
    fn extract_record_id_roundtrip() {
        let id = RecordId::generate();
        let key = intent_payment_key("pi_abc", &id);

        assert_eq!(extract_record_id_from_intent_key(&key), Some(id));
    }

    #[test]
    fn extract_rejects_short_keys() {
        assert_eq!(extract_record_id_from_intent_key(b"short"), None);
    }

    #[test]
    fn prefix_does_not_match_extending_intent() {
        let id = RecordId::generate();
        let key = intent_payment_key("pi_12", &id);
        // "pi_1" must not be a prefix of keys written under "pi_12".
        assert!(!key.starts_with(&intent_prefix("pi_1")));
        assert!(key.starts_with(&intent_prefix("pi_12")));
    }
}
