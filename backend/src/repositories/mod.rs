//! Storage interfaces
//!
//! Handlers receive stores as trait objects through application state, so
//! the backing implementation is swappable without touching handler code.
//! The in-memory implementations in [`memory`] back the binary and the
//! test suite.

pub mod memory;

pub use memory::{MemorySessionStore, MemoryUserStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatehouse_shared::PublicUser;
use thiserror::Error;

/// Stored user row. The plaintext password never appears here.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
        }
    }
}

/// Stored session row: a public user snapshot plus lifetime bounds.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub user: PublicUser,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Storage failure taxonomy shared by both stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert refused because the username is already present.
    #[error("username already exists")]
    DuplicateUsername,

    /// The backing store itself failed.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// User persistence interface.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Atomic insert-if-absent. Assigns the server-side id. A duplicate
    /// username is [`StoreError::DuplicateUsername`], distinct from a
    /// backend failure.
    async fn insert_unique(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError>;
}

/// Session persistence interface: opaque token to session record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session for `user` and return its token.
    async fn create(&self, user: PublicUser) -> Result<String, StoreError>;

    /// Look up a live session. Expired sessions read as absent.
    async fn get(&self, token: &str) -> Result<Option<SessionRecord>, StoreError>;

    /// Remove a session. Returns whether one existed; removing an absent
    /// session is success, not an error.
    async fn destroy(&self, token: &str) -> Result<bool, StoreError>;
}
