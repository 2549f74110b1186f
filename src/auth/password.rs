//! Admin password hashing.

use sha2::{Digest, Sha256};

/// Lower-case hex SHA-256 of `password`.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Compare `password` against a stored hex digest (case-insensitive hex).
pub fn verify_password(password: &str, expected_hash: &str) -> bool {
    hash_password(password).eq_ignore_ascii_case(expected_hash.trim())
}
