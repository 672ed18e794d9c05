//! Keyed digests for privacy-preserving request metadata.
//!
//! Submitter addresses and user agents are never stored in clear text. They
//! are reduced to a keyed HMAC-SHA256 digest; equal inputs still correlate.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute a salted HMAC-SHA256 hex digest of `value`.
///
/// An empty salt degrades to a plain keyed hash with an empty key, which is
/// still irreversible but no longer resistant to dictionary lookups.
pub fn salted_hash(salt: &str, value: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC accepts any key length");
    mac.update(value.as_bytes());
    format!("{:x}", mac.finalize().into_bytes())
}
