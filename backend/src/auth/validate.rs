//! Credential validation pipeline
//!
//! Register and login run an explicit, ordered sequence of checks. Each
//! check returns its continuation value or a typed [`ApiError`] the handler
//! renders directly. The order is part of the wire contract: a taken
//! username wins over a short password on register, and an unknown username
//! wins over a malformed payload on login.

use gatehouse_shared::{validation, CredentialsPayload};

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserStore};

/// Owned, validated credential pair produced by [`check_payload`].
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration gate: the username must not be taken.
///
/// A missing username passes here; [`check_payload`] rejects it further
/// down the pipeline with the payload message.
pub async fn check_username_free(
    users: &dyn UserStore,
    username: Option<&str>,
) -> Result<(), ApiError> {
    if let Some(username) = username {
        if users.find_by_username(username).await?.is_some() {
            return Err(ApiError::Conflict("Username taken".to_string()));
        }
    }
    Ok(())
}

/// Login gate: the username must exist; the loaded record is the
/// continuation value.
///
/// The failure is the same `Unauthorized` that a failed password
/// verification produces, so a response never confirms whether a username
/// is registered.
pub async fn check_username_exists(
    users: &dyn UserStore,
    username: Option<&str>,
) -> Result<UserRecord, ApiError> {
    let record = match username {
        Some(username) => users.find_by_username(username).await?,
        None => None,
    };
    record.ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))
}

/// Password must be at least four characters.
pub fn check_password_length(password: Option<&str>) -> Result<(), ApiError> {
    validation::validate_password_length(password).map_err(ApiError::Unprocessable)
}

/// Both fields present and non-empty; returns the owned pair.
pub fn check_payload(payload: &CredentialsPayload) -> Result<Credentials, ApiError> {
    validation::validate_credentials_present(
        payload.username.as_deref(),
        payload.password.as_deref(),
    )
    .map_err(ApiError::Unprocessable)?;

    // Both present and non-empty after the check above
    let username = payload.username.clone().unwrap_or_default();
    let password = payload.password.clone().unwrap_or_default();
    Ok(Credentials { username, password })
}
