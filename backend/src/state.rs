//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Build expensive resources once**: stores and the session manager
//!    are created at startup
//! 2. **Cheap cloning**: all fields are Arc-backed or trivially Clone
//! 3. **Immutable after creation**: state is read-only during request
//!    handling; the stores handle their own interior mutability

use std::sync::Arc;

use crate::auth::{PasswordService, SessionManager};
use crate::config::AppConfig;
use crate::repositories::{SessionStore, UserStore};

/// Shared application state
///
/// Holds the store handles and services every handler needs. Stores are
/// trait objects, so tests and future backends can substitute their own
/// implementations without touching handler code.
#[derive(Clone)]
pub struct AppState {
    /// User persistence
    users: Arc<dyn UserStore>,
    /// Session issuance and resolution, owns the cookie contract
    sessions: SessionManager,
    /// bcrypt hashing with the configured cost
    hasher: PasswordService,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state from the configured stores
    pub fn new(
        users: Arc<dyn UserStore>,
        session_store: Arc<dyn SessionStore>,
        config: AppConfig,
    ) -> Self {
        let sessions = SessionManager::new(session_store, &config.session);
        let hasher = PasswordService::new(config.auth.bcrypt_cost);

        Self {
            users,
            sessions,
            hasher,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the user store
    #[inline]
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    /// Get a reference to the session manager
    #[inline]
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Get a reference to the password service
    #[inline]
    pub fn hasher(&self) -> &PasswordService {
        &self.hasher
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
