//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use tweets_shared::{AuthError, MessageResponse};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // The reason was already logged by the gate; clients only ever
            // see the fixed message.
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, MessageResponse::auth_error()),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                MessageResponse::new(format!("Not found: {}", what)),
            ),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageResponse::new("An internal error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_every_auth_error_has_the_same_body() {
        let reasons = [
            AuthError::MissingCredential,
            AuthError::MalformedScheme,
            AuthError::InvalidToken("InvalidSignature".to_string()),
            AuthError::TokenExpired,
            AuthError::UnknownUser,
        ];

        for reason in reasons {
            let response = ApiError::Unauthorized(reason).into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                body_string(response).await,
                r#"{"message":"Authenication Error"}"#
            );
        }
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("/nowhere".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let error = ApiError::Internal(anyhow::anyhow!("connection refused on 10.0.0.5"));
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(!body.contains("10.0.0.5"));
    }
}
