//! API request/response types

use crate::models::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body written for every rejected authentication attempt.
///
/// Existing clients match on this exact string, spelling included.
pub const AUTH_ERROR_MESSAGE: &str = "Authenication Error";

/// Generic `{ "message": ... }` response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The uniform authentication rejection body
    pub fn auth_error() -> Self {
        Self::new(AUTH_ERROR_MESSAGE)
    }
}

/// Public view of the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            url: user.url,
            created_at: user.created_at,
        }
    }
}
