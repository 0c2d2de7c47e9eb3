//! # Payment Signature Verification
//!
//! Razorpay binds a successful payment to an order by signing
//! `"{gateway_order_id}|{payment_id}"` with the account's key secret
//! (HMAC-SHA256, hex-encoded). The checkout frontend posts that signature
//! back to us and we recompute it here.
//!
//! Comparison is constant-time. The check is pure; all lifecycle mutation
//! happens in the caller.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a payment signature against the shared key secret.
///
/// Returns true only if `supplied_signature` equals
/// `hex(HMAC-SHA256(secret, "{gateway_order_id}|{payment_id}"))` exactly.
pub fn verify_signature(
    gateway_order_id: &str,
    payment_id: &str,
    supplied_signature: &str,
    secret: &str,
) -> bool {
    let message = format!("{}|{}", gateway_order_id, payment_id);
    let expected = compute_hmac_sha256(secret, &message);
    constant_time_compare(&expected, supplied_signature)
}

pub(crate) fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

pub(crate) fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
