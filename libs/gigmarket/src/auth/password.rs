//! Argon2id password hashing.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::DomainError;

/// Hash a plaintext password with a fresh random salt.
///
/// # Errors
/// Only when the hasher itself fails, which indicates a broken environment.
pub fn hash(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
}

/// Constant-time verification against a stored PHC-format hash.
/// An unparseable stored hash counts as a mismatch.
#[must_use]
pub fn verify(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hashed = hash("examplepass").unwrap();
        assert!(verify("examplepass", &hashed));
        assert!(!verify("wrongpass", &hashed));
    }

    #[test]
    fn corrupt_stored_hash_is_a_mismatch() {
        assert!(!verify("examplepass", "not-a-phc-hash"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash("examplepass").unwrap();
        let b = hash("examplepass").unwrap();
        assert_ne!(a, b);
    }
}
