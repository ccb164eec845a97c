//! User repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tweets_shared::User;

/// Resolves a user identifier to a stored user.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// `Ok(None)` means no such user; `Err` is reserved for storage failures.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
}

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            name: record.name,
            email: record.email,
            url: record.url,
            created_at: record.created_at,
        }
    }
}

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_record(&self, id: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, name, email, url, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserLookup for UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.find_record(id).await?.map(User::from))
    }
}
