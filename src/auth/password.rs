use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{Error, Result};

const ARGON2_MEMORY: u32 = 64 * 1024; // 64KB
const ARGON2_ITERATIONS: u32 = 1;
const ARGON2_PARALLELISM: u32 = 4;
const ARGON2_OUTPUT_LEN: usize = 32;

/// Hashes and verifies user passwords with Argon2id.
pub struct PasswordEngine {
    argon2: Argon2<'static>,
}

impl Default for PasswordEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEngine {
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(
            ARGON2_MEMORY,
            ARGON2_ITERATIONS,
            ARGON2_PARALLELISM,
            Some(ARGON2_OUTPUT_LEN),
        )
        .expect("invalid argon2 params");

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Config(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| Error::Config(format!("invalid hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Config(format!("failed to verify password: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_correct_password() {
        let engine = PasswordEngine::new();
        let hash = engine.hash("admin123").unwrap();

        assert!(engine.verify("admin123", &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let engine = PasswordEngine::new();
        let hash = engine.hash("admin123").unwrap();

        assert!(!engine.verify("hunter2", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let engine = PasswordEngine::new();
        let a = engine.hash("admin123").unwrap();
        let b = engine.hash("admin123").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_phc_format() {
        let engine = PasswordEngine::new();
        let hash = engine.hash("admin123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let engine = PasswordEngine::new();
        assert!(engine.verify("admin123", "not-a-hash").is_err());
    }
}
