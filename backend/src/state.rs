//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! State is built once at startup and is read-only afterwards, so the
//! authentication gate holds no cross-request state of its own.

use crate::auth::{JwtService, TokenVerifier};
use crate::config::AppConfig;
use crate::repositories::{UserLookup, UserRepository};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are behind an Arc, cloning is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token verifier with its key pre-computed
    pub verifier: Arc<dyn TokenVerifier>,
    /// User lookup used by the gate
    pub users: Arc<dyn UserLookup>,
}

impl AppState {
    /// Create the production state: HS256 verification and PostgreSQL users
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            config.jwt.secret.expose_secret(),
            config.jwt.expires_in_secs,
            config.jwt.leeway_secs,
        );

        Self::with_collaborators(config, Arc::new(jwt), Arc::new(UserRepository::new(db)))
    }

    /// Create a state from explicit collaborators
    pub fn with_collaborators(
        config: AppConfig,
        verifier: Arc<dyn TokenVerifier>,
        users: Arc<dyn UserLookup>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            verifier,
            users,
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the token verifier
    #[inline]
    pub fn verifier(&self) -> &dyn TokenVerifier {
        self.verifier.as_ref()
    }

    /// Get a reference to the user lookup
    #[inline]
    pub fn users(&self) -> &dyn UserLookup {
        self.users.as_ref()
    }
}
