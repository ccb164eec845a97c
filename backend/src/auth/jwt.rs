//! JWT token verification
//!
//! Tokens are issued elsewhere; this service only checks them, using a
//! decoding key computed once at startup.

use chrono::Utc;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tweets_shared::AuthError;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID; numeric ids are kept in their decimal form
    #[serde(deserialize_with = "user_id")]
    pub id: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Accept `"id": "abc"` as well as `"id": 7`
fn user_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum UserId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match UserId::deserialize(deserializer)? {
        UserId::Text(id) => id,
        UserId::Signed(id) => id.to_string(),
        UserId::Unsigned(id) => id.to_string(),
    })
}

/// Checks a bearer token and yields its claims.
///
/// The signing secret and expiry policy are bound when the verifier is built.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// HS256 token verifier
///
/// Design: the decoding key is derived once and shared through an Arc,
/// so cloning the service per handler is O(1).
#[derive(Clone)]
pub struct JwtService {
    decoding: Arc<DecodingKey>,
    validation: Arc<Validation>,
    /// Maximum token age, measured from `iat`
    expires_in_secs: i64,
    leeway_secs: u64,
}

impl JwtService {
    /// Create a new JWT service with a pre-computed key
    ///
    /// Call this once at application startup and store it in AppState.
    pub fn new(secret: &str, expires_in_secs: i64, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            validation: Arc::new(validation),
            expires_in_secs,
            leeway_secs,
        }
    }

    /// Validate a token and return claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        self.check_age(&claims)?;

        Ok(claims)
    }

    /// Tokens minted with a longer `exp` still expire after `expires_in_secs`
    fn check_age(&self, claims: &Claims) -> Result<(), AuthError> {
        let Some(iat) = claims.iat else {
            return Ok(());
        };

        let max_age = self
            .expires_in_secs
            .saturating_add(self.leeway_secs as i64);
        if Utc::now().timestamp().saturating_sub(iat) > max_age {
            return Err(AuthError::TokenExpired);
        }

        Ok(())
    }
}

impl TokenVerifier for JwtService {
    #[inline]
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_token(token)
    }
}
