//! Password hashing and verification built on bcrypt.

use crate::errors::{ServiceError, ServiceResult};

/// Hashes and verifies passwords at a configurable bcrypt cost. Tests
/// use a low cost to stay fast; production uses the bcrypt default.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> ServiceResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| ServiceError::internal(format!("Failed to hash password: {e}")))
    }

    /// Checks a candidate password against a stored hash. A malformed
    /// hash is an internal error, not a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| ServiceError::internal(format!("Failed to verify password: {e}")))
    }
}
