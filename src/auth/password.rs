//! Password hashing and verification
//!
//! bcrypt with a fresh random salt per hash. Hashing cost is the
//! intentional throttle on login and register throughput.

use thiserror::Error;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashFailed(String),
}

/// Hash a plaintext password.
///
/// The empty string is hashed like any other input; no special-casing.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST).map_err(|e| PasswordError::HashFailed(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash verifies as `false` rather than erroring out of
/// the login path.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}
