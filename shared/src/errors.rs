//! Error types for the Tweets API

use thiserror::Error;

/// Reasons an authentication attempt is rejected.
///
/// Every variant is reported to the client the same way; the distinction
/// only exists for server-side logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingCredential,

    #[error("Invalid authorization format")]
    MalformedScheme,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Unknown user")]
    UnknownUser,
}

impl AuthError {
    /// Whether the credential never reached token verification.
    pub fn is_structural(&self) -> bool {
        matches!(self, AuthError::MissingCredential | AuthError::MalformedScheme)
    }
}
