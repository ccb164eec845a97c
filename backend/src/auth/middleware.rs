//! Authentication middleware
//!
//! The gate runs before every protected handler:
//!
//! 1. `Authorization: Bearer <token>` must be present and well formed
//! 2. the token must verify
//! 3. the `id` claim must name an existing user
//!
//! Any failure ends the request with the same 401 body. On success the
//! resolved user is stored in the request extensions as [`AuthUser`] and the
//! next handler runs exactly once.

use crate::auth::TokenVerifier;
use crate::error::ApiError;
use crate::repositories::UserLookup;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tracing::{debug, warn};
use tweets_shared::{AuthError, User};

/// Authenticated user attached by the gate
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

/// Result of running the gate on one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(User),
    Rejected(AuthError),
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MalformedScheme)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedScheme)?;

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::MalformedScheme);
    }

    Ok(token)
}

/// Decide whether a request may proceed.
///
/// Verification and lookup run strictly one after the other. `Err` is only
/// returned when the user store itself fails.
pub async fn authenticate(
    verifier: &dyn TokenVerifier,
    users: &dyn UserLookup,
    headers: &HeaderMap,
) -> anyhow::Result<AuthOutcome> {
    let token = match bearer_token(headers) {
        Ok(token) => token,
        Err(reason) => return Ok(AuthOutcome::Rejected(reason)),
    };

    let claims = match verifier.verify(token) {
        Ok(claims) => claims,
        Err(reason) => return Ok(AuthOutcome::Rejected(reason)),
    };

    let outcome = match users.find_by_id(&claims.id).await? {
        Some(user) => AuthOutcome::Authenticated(user),
        None => AuthOutcome::Rejected(AuthError::UnknownUser),
    };

    Ok(outcome)
}

/// Axum middleware wrapping [`authenticate`]
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let outcome = authenticate(state.verifier(), state.users(), request.headers()).await?;

    match outcome {
        AuthOutcome::Authenticated(user) => {
            debug!(user_id = %user.id, "request authenticated");
            request.extensions_mut().insert(AuthUser { user });
            Ok(next.run(request).await)
        }
        AuthOutcome::Rejected(reason) => {
            if reason.is_structural() {
                debug!(uri = %request.uri(), reason = %reason, "authentication rejected");
            } else {
                warn!(uri = %request.uri(), reason = %reason, "authentication rejected");
            }
            Err(ApiError::Unauthorized(reason))
        }
    }
}

/// Put every route of `router` behind the gate.
///
/// Unmatched paths are not gated, so they still fall through to 404.
pub fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only the gate inserts this; a handler mounted without it rejects.
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized(AuthError::MissingCredential))
    }
}
