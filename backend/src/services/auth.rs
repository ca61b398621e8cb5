//! Authentication service
//!
//! Runs the credential pipeline and talks to the user store. Session
//! handling stays in the handlers; this layer neither sees cookies nor
//! tokens.
//!
//! # Performance
//!
//! Password hashing and verification are offloaded to the blocking thread
//! pool via `spawn_blocking`.

use gatehouse_shared::{CredentialsPayload, PublicUser};

use crate::auth::{validate, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserStore;

/// Service for registration and credential verification
pub struct AuthService;

impl AuthService {
    /// Register a new user
    ///
    /// Check order is part of the wire contract: taken username, then
    /// password length, then payload shape.
    pub async fn register(
        users: &dyn UserStore,
        hasher: &PasswordService,
        payload: &CredentialsPayload,
    ) -> Result<PublicUser, ApiError> {
        validate::check_username_free(users, payload.username.as_deref()).await?;
        validate::check_password_length(payload.password.as_deref())?;
        let creds = validate::check_payload(payload)?;

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = hasher
            .hash_async(creds.password)
            .await
            .map_err(ApiError::Internal)?;

        // insert_unique also closes the pre-check race: a concurrent insert
        // of the same name surfaces as the same Conflict
        let record = users.insert_unique(&creds.username, &password_hash).await?;

        Ok(PublicUser::from(&record))
    }

    /// Verify login credentials and return the authenticated user
    ///
    /// Check order is part of the wire contract: unknown username first
    /// (reported as Unauthorized), then payload shape, then verification.
    pub async fn login(
        users: &dyn UserStore,
        hasher: &PasswordService,
        payload: &CredentialsPayload,
    ) -> Result<PublicUser, ApiError> {
        let record = validate::check_username_exists(users, payload.username.as_deref()).await?;
        let creds = validate::check_payload(payload)?;

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = hasher
            .verify_async(creds.password, record.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(PublicUser::from(&record))
    }
}
