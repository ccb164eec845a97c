//! Common test utilities for integration tests
//!
//! Mock collaborators for the authentication gate and a small app wrapper
//! that counts how often the protected handler runs.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use chrono::Utc;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tweets_backend::auth::{self, AuthUser, Claims, TokenVerifier};
use tweets_backend::config::AppConfig;
use tweets_backend::repositories::UserLookup;
use tweets_backend::state::AppState;
use tweets_shared::{AuthError, User};

/// Token verifier with a scripted answer
pub struct MockVerifier {
    user_id: Option<String>,
    seen: Mutex<Vec<String>>,
}

impl MockVerifier {
    /// Fails every token, like a bad signature would
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            user_id: None,
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Accepts every token and decodes it to `{ id: user_id }`
    pub fn returning(user_id: &str) -> Arc<Self> {
        Arc::new(Self {
            user_id: Some(user_id.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl TokenVerifier for MockVerifier {
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.seen.lock().unwrap().push(token.to_string());
        match &self.user_id {
            Some(id) => Ok(Claims {
                id: id.clone(),
                exp: Utc::now().timestamp() + 3600,
                iat: None,
            }),
            None => Err(AuthError::InvalidToken("Bad token".to_string())),
        }
    }
}

/// User lookup that resolves to a fixed answer
pub struct MockUsers {
    user: Option<User>,
    asked: Mutex<Vec<String>>,
}

impl MockUsers {
    /// Resolves every id to nothing
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            user: None,
            asked: Mutex::new(Vec::new()),
        })
    }

    /// Resolves every id to `user`
    pub fn resolving(user: User) -> Arc<Self> {
        Arc::new(Self {
            user: Some(user),
            asked: Mutex::new(Vec::new()),
        })
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserLookup for MockUsers {
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<User>> {
        self.asked.lock().unwrap().push(id.to_string());
        Ok(self.user.clone())
    }
}

/// Random user fixture
pub fn fake_user(id: &str) -> User {
    User {
        id: id.to_string(),
        username: Username().fake(),
        name: Name().fake(),
        email: SafeEmail().fake(),
        url: None,
        created_at: Utc::now(),
    }
}

/// 128 random alphanumeric characters
pub fn random_token() -> String {
    (0..4)
        .map(|_| uuid::Uuid::new_v4().simple().to_string())
        .collect()
}

/// Random user id
pub fn random_user_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Test application wrapper
///
/// Serves `GET /tweets` behind the gate. The handler answers with the
/// authenticated user's id and counts its invocations.
pub struct TestApp {
    pub app: Router,
    next_calls: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn new(verifier: Arc<dyn TokenVerifier>, users: Arc<dyn UserLookup>) -> Self {
        let state = AppState::with_collaborators(AppConfig::default(), verifier, users);
        let next_calls = Arc::new(AtomicUsize::new(0));

        let counter = next_calls.clone();
        let tweets = Router::new().route(
            "/tweets",
            get(move |auth_user: AuthUser| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    auth_user.user.id
                }
            }),
        );

        let app = auth::protect(tweets, state.clone()).with_state(state);

        Self { app, next_calls }
    }

    /// How many times the protected handler ran
    pub fn next_calls(&self) -> usize {
        self.next_calls.load(Ordering::SeqCst)
    }

    /// Make a GET request with an optional Authorization header
    pub async fn get(&self, path: &str, authorization: Option<&str>) -> (StatusCode, String) {
        let mut request_builder = Request::builder().method("GET").uri(path);

        if let Some(value) = authorization {
            request_builder = request_builder.header("Authorization", value);
        }

        let request = request_builder.body(Body::empty()).unwrap();

        send(&self.app, request).await
    }
}

/// Run one request through `app` and collect the body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, body_str)
}
