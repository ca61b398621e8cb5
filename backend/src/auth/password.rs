//! Password hashing using bcrypt
//!
//! Provides secure password hashing and verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. The async variants run the work
//! on the blocking thread pool so request tasks are never stalled.

use anyhow::Result;

/// Default bcrypt cost factor (2^11 rounds).
pub const DEFAULT_BCRYPT_COST: u32 = 11;

/// Password hashing service
///
/// Carries the configured bcrypt cost factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password (blocking operation)
    ///
    /// A failure here is an infrastructure problem, not a property of the
    /// submitted password; callers surface it as a generic server error.
    pub fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Total over its inputs: a malformed or unparseable stored hash counts
    /// as a non-match, never an error, so a caller cannot distinguish a bad
    /// password from a corrupt hash.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(&self, password: String, hash: String) -> Result<bool> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}
