//! Platform API key generation and hashing.
//!
//! The plaintext key is shown to the operator exactly once; only its
//! SHA-256 digest is stored remotely.

use rand::Rng;
use sha2::{Digest, Sha256};

const PREFIX: &str = "tvok-";
const TOTAL_LENGTH: usize = 48;
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a fresh API key: `tvok-` followed by random charset characters,
/// 48 characters total.
#[must_use]
pub fn generate(rng: &mut impl Rng) -> String {
    let suffix_len = TOTAL_LENGTH - PREFIX.len();
    let suffix: String = (0..suffix_len)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            char::from(CHARSET[idx])
        })
        .collect();
    format!("{PREFIX}{suffix}")
}

/// Hex-encoded SHA-256 digest of `data`.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
