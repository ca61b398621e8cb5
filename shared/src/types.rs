//! API request and response types

use serde::{Deserialize, Serialize};

/// Credentials submitted to register and login.
///
/// Both fields are optional on the wire: a request with a missing or null
/// field still deserializes, so the validation pipeline (not the JSON layer)
/// decides how to report it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CredentialsPayload {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Public view of a user record: what registration returns and what a
/// session remembers. Never carries the password or its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
}

/// Envelope for plain-message responses, success and failure alike:
/// `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
