//! Password-reset token generation and hashing.
//!
//! Reset tokens are opaque random strings emailed to the user; only their
//! SHA-256 hex digest is stored on the user row. Tokens are single-use and
//! expire after [`RESET_TOKEN_EXPIRY_MINS`]; consuming one clears the stored
//! digest along with setting the new password hash.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Reset token validity window in minutes.
pub const RESET_TOKEN_EXPIRY_MINS: i64 = 60;

/// Generate a cryptographically random reset token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext is
/// embedded in the emailed reset URL; only the hash is persisted.
pub fn generate_reset_token() -> (String, String) {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    let plaintext: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let hash = hash_reset_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a reset token.
///
/// Use this to compare an incoming token against the stored digest.
pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
