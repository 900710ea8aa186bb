//! Request signing material: per-request nonces and the gateway signature.
//!
//! The gateway authenticates each call with a SHA-256 digest over the request
//! URL, the merchant credentials, a per-request nonce, and the raw body text.
//! Field order and byte content must match the server-side verifier exactly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::prelude::*;
use sha2::{Digest, Sha256};

/// Leading hexadecimal digits stripped from the timestamp rendering. The high
/// digits barely change between requests and carry no distinguishing value.
const DROPPED_HEX_DIGITS: usize = 8;

/// Floor for the next nonce timestamp, bumped on every call so that two calls
/// landing in the same clock tick still get distinct nonces.
static NONCE_FLOOR: AtomicU64 = AtomicU64::new(0);

/// Computes the request signature expected by the gateway:
/// `base64(sha256(url ++ api_key ++ secret_key ++ nonce ++ body))`.
///
/// Fields are concatenated with no separator, in exactly that order. `body`
/// is the raw request body as it goes on the wire, empty for requests
/// without one; it is hashed byte-for-byte, with no text re-encoding.
#[must_use]
pub fn request_signature(
    url: &str,
    api_key: &str,
    secret_key: &str,
    nonce: &str,
    body: &[u8],
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(api_key.as_bytes());
    hasher.update(secret_key.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(body);
    BASE64_STANDARD.encode(hasher.finalize())
}

/// Generates a short per-request nonce.
///
/// The nonce is the current Unix time in nanoseconds, forced strictly above
/// every previously issued value, rendered in lowercase hex with the
/// most-significant digits discarded. Cheap and unique within the process;
/// the nonce guards against replay, it is not a secret.
#[must_use]
pub fn generate_nonce() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| u64::try_from(d.as_nanos()).ok())
        .unwrap_or(u64::MAX);

    let prev = NONCE_FLOOR
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |prev| {
            Some(now.max(prev.wrapping_add(1)))
        })
        .unwrap_or(now);
    let unique = now.max(prev.wrapping_add(1));

    let hex = format!("{unique:x}");
    let start = hex.len().min(DROPPED_HEX_DIGITS);
    hex[start..].to_owned()
}
