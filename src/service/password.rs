//! Password hashing capability
//!
//! The pipeline only depends on `hash(plain) -> digest` and
//! `verify(plain, digest) -> bool`; the Argon2 implementation is injected
//! at startup so tests can substitute it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, SaltString},
    Argon2, PasswordVerifier,
};

use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String>;
    fn verify(&self, plain: &str, digest: &str) -> bool;
}

#[derive(Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?;
        Ok(digest.to_string())
    }

    fn verify(&self, plain: &str, digest: &str) -> bool {
        PasswordHash::new(digest)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = Argon2PasswordHasher;
        let digest = hasher.hash("correct horse battery staple").unwrap();

        assert!(hasher.verify("correct horse battery staple", &digest));
        assert!(!hasher.verify("wrong password", &digest));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2PasswordHasher;
        let a = hasher.hash("same input").unwrap();
        let b = hasher.hash("same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_tolerates_malformed_digest() {
        let hasher = Argon2PasswordHasher;
        assert!(!hasher.verify("anything", "not-a-phc-string"));
    }
}
