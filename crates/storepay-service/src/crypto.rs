//! Webhook signature verification.
//!
//! Stripe signs webhook deliveries with an HMAC-SHA256 over
//! `"{timestamp}.{payload}"` and sends the result in the `stripe-signature`
//! header as `t=<timestamp>,v1=<hex>[,v1=<hex>...]`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Errors from signature verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// The header had no `t=` timestamp element.
    #[error("signature header missing timestamp")]
    MissingTimestamp,

    /// The header had no `v1=` signature element, or none matched.
    #[error("invalid webhook signature")]
    Invalid,
}

/// Verify a Stripe-style signature header against a raw payload.
///
/// Any of the header's `v1` candidates matching the expected HMAC accepts
/// the payload. No timestamp tolerance is enforced; a replayed payload with
/// a valid signature verifies.
///
/// # Errors
///
/// Returns `SignatureError` if the header is malformed or no candidate
/// signature matches.
pub fn verify_signature(
    secret: &str,
    payload: &str,
    signature_header: &str,
) -> Result<(), SignatureError> {
    // Header format: t=timestamp,v1=signature,v1=signature2,...
    let mut timestamp: Option<&str> = None;
    let mut signatures: Vec<&str> = Vec::new();

    for part in signature_header.split(',') {
        let mut kv = part.splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("t"), Some(ts)) => timestamp = Some(ts),
            (Some("v1"), Some(sig)) => signatures.push(sig),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;

    if signatures.is_empty() {
        return Err(SignatureError::Invalid);
    }

    let signed_payload = format!("{timestamp}.{payload}");
    let expected = hmac_sha256_hex(secret, &signed_payload);

    if signatures.iter().any(|sig| constant_time_eq(&expected, sig)) {
        Ok(())
    } else {
        Err(SignatureError::Invalid)
    }
}

/// Build a signature header for a payload, as the processor would.
///
/// The inverse of [`verify_signature`]; used by tests to deliver signed
/// webhook payloads.
#[must_use]
pub fn sign_payload(secret: &str, payload: &str, timestamp: i64) -> String {
    let signed_payload = format!("{timestamp}.{payload}");
    format!(
        "t={timestamp},v1={}",
        hmac_sha256_hex(secret, &signed_payload)
    )
}

/// Compute HMAC-SHA256 and return hex-encoded result.
#[must_use]
pub fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    // INVARIANT: HMAC-SHA256 accepts keys of any size per RFC 2104, so
    // `new_from_slice` only fails if the Hmac implementation is broken.
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC-SHA256 accepts any key size");
    mac.update(message.as_bytes());
    let result = mac.finalize();

    hex::encode(result.into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
