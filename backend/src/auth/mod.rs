//! Authentication module
//!
//! Bearer-token gate in front of protected routes: JWT verification
//! followed by a user lookup.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService, TokenVerifier};
pub use middleware::{auth_middleware, authenticate, bearer_token, protect, AuthOutcome, AuthUser};

#[cfg(test)]
pub(crate) use jwt::test_support;
