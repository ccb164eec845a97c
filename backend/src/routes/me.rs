//! Current-user routes
//!
//! Mounted behind the authentication gate.

use crate::auth::AuthUser;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use tweets_shared::UserProfile;

/// Create current-user routes
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// Get the authenticated user's profile
///
/// GET /api/v1/me
async fn get_me(auth_user: AuthUser) -> Json<UserProfile> {
    Json(UserProfile::from(auth_user.user))
}
