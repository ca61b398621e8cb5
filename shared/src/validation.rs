//! Input validation functions
//!
//! Pure credential rules shared by the backend pipeline and API clients.
//! These return the exact messages the wire contract promises.

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 4;

/// Validate password length.
///
/// Rejects a missing password or one shorter than [`MIN_PASSWORD_CHARS`]
/// characters (characters, not bytes).
pub fn validate_password_length(password: Option<&str>) -> Result<(), String> {
    let long_enough = password
        .map(|p| p.chars().count() >= MIN_PASSWORD_CHARS)
        .unwrap_or(false);
    if long_enough {
        Ok(())
    } else {
        Err("Password must be longer than 3 chars".to_string())
    }
}

/// Validate that both credential fields are present and non-empty.
///
/// Whitespace-only values pass; only absent and empty values are rejected.
pub fn validate_credentials_present(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<(), String> {
    let present = |field: Option<&str>| field.map(|s| !s.is_empty()).unwrap_or(false);
    if present(username) && present(password) {
        Ok(())
    } else {
        Err("username and password required".to_string())
    }
}
