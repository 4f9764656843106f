//! Request signature computation
//!
//! The Timetable API authenticates each request by an HMAC-SHA1 digest of the
//! unsigned `path?query` string, keyed with the developer's API key and sent
//! as upper-case hex.

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Compute the upper-case hex HMAC-SHA1 signature of `message` under `secret`
pub fn sign(secret: &[u8], message: &[u8]) -> String {
    // HMAC hashes over-long keys and pads short ones; no length is rejected.
    let mut mac = HmacSha1::new_from_slice(secret)
        .unwrap_or_else(|_| unreachable!("HMAC-SHA1 accepts keys of any length"));
    mac.update(message);
    hex::encode_upper(mac.finalize().into_bytes())
}
