//! In-memory store implementations
//!
//! Concurrency-safe via `DashMap`; cheap to clone and share across the
//! router's worker tasks. A persistent backend would implement the same
//! traits.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use gatehouse_shared::PublicUser;
use uuid::Uuid;

use super::{SessionRecord, SessionStore, StoreError, UserRecord, UserStore};

/// Users keyed by exact username; ids handed out monotonically from 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<String, UserRecord>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }

    async fn insert_unique(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        // entry() holds the shard lock, so check-and-insert is atomic
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateUsername),
            Entry::Vacant(slot) => {
                let record = UserRecord {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at: Utc::now(),
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }
}

/// Sessions keyed by opaque token, expired lazily on read.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<String, SessionRecord>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user: PublicUser) -> Result<String, StoreError> {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let record = SessionRecord {
            user,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.insert(token.clone(), record);
        Ok(token)
    }

    async fn get(&self, token: &str) -> Result<Option<SessionRecord>, StoreError> {
        // Clone out of the map so the shard lock is released before any
        // eviction below
        let snapshot = self.sessions.get(token).map(|entry| entry.value().clone());
        match snapshot {
            Some(record) if record.expires_at <= Utc::now() => {
                self.sessions.remove(token);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn destroy(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self.sessions.remove(token).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str) -> PublicUser {
        PublicUser {
            id,
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let store = MemoryUserStore::new();
        let created = store.insert_unique("sue", "$2b$11$hash").await.unwrap();
        assert_eq!(created.username, "sue");

        let found = store.find_by_username("sue").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$2b$11$hash");
    }

    #[tokio::test]
    async fn find_missing_user_is_none() {
        let store = MemoryUserStore::new();
        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryUserStore::new();
        store.insert_unique("sue", "hash-a").await.unwrap();

        let err = store.insert_unique("sue", "hash-b").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUsername));

        // First record untouched
        let found = store.find_by_username("sue").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash-a");
    }

    #[tokio::test]
    async fn usernames_are_case_sensitive() {
        let store = MemoryUserStore::new();
        store.insert_unique("sue", "hash").await.unwrap();

        assert!(store.find_by_username("Sue").await.unwrap().is_none());
        assert!(store.insert_unique("Sue", "hash").await.is_ok());
    }

    #[tokio::test]
    async fn ids_increase_monotonically_from_one() {
        let store = MemoryUserStore::new();
        let first = store.insert_unique("alice", "hash").await.unwrap();
        let second = store.insert_unique("sue", "hash").await.unwrap();
        let third = store.insert_unique("bob", "hash").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn session_create_then_get_round_trips() {
        let store = MemorySessionStore::new(Duration::hours(1));
        let token = store.create(user(1, "sue")).await.unwrap();

        let record = store.get(&token).await.unwrap().unwrap();
        assert_eq!(record.user, user(1, "sue"));
        assert!(record.expires_at > record.created_at);
    }

    #[tokio::test]
    async fn session_tokens_are_unique() {
        let store = MemorySessionStore::new(Duration::hours(1));
        let a = store.create(user(1, "sue")).await.unwrap();
        let b = store.create(user(1, "sue")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn destroy_removes_the_session() {
        let store = MemorySessionStore::new(Duration::hours(1));
        let token = store.create(user(1, "sue")).await.unwrap();

        assert!(store.destroy(&token).await.unwrap());
        assert!(store.get(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn destroy_of_absent_session_reports_nothing_removed() {
        let store = MemorySessionStore::new(Duration::hours(1));
        assert!(!store.destroy("no-such-token").await.unwrap());
    }

    #[tokio::test]
    async fn expired_sessions_read_as_absent() {
        let store = MemorySessionStore::new(Duration::zero());
        let token = store.create(user(1, "sue")).await.unwrap();

        assert!(store.get(&token).await.unwrap().is_none());
        // Lazy eviction: the record is gone afterwards as well
        assert!(!store.destroy(&token).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_token_reads_as_absent() {
        let store = MemorySessionStore::new(Duration::hours(1));
        assert!(store.get("no-such-token").await.unwrap().is_none());
    }
}
