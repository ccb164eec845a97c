//! Database connection and pool management
//!
//! The pool backs the user repository consulted by the authentication gate.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

const MIN_CONNECTIONS: u32 = 2;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Pool options derived from the database configuration
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(MIN_CONNECTIONS.min(config.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
}

/// Connection options: `url` first, then any discrete host/user/password/name
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    let mut options = PgConnectOptions::from_str(&config.url)
        .context("invalid database url")?
        .application_name("tweets-backend");

    if let Some(host) = &config.host {
        options = options.host(host);
    }
    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = &config.password {
        options = options.password(password.expose_secret());
    }
    if let Some(name) = &config.name {
        options = options.database(name);
    }

    Ok(options)
}

/// Connect a PostgreSQL pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options = connect_options(config)?;

    let pool = pool_options(config)
        .connect_with(connect_options)
        .await
        .context("failed to connect to database")?;

    info!(max = config.max_connections, "Database pool created");

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}
