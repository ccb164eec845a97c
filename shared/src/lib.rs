//! Tweets API Shared Library
//!
//! This crate contains shared types and models used by the backend and by
//! clients that talk to it.

pub mod errors;
pub mod models;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use models::User;
pub use types::*;
