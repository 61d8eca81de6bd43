//! Relational store access.
//!
//! # Responsibilities
//! - Build the shared `sqlx` connection pool from [`DatabaseConfig`]
//! - Create the `folders` and `notes` tables when asked to
//! - Answer the `/health` liveness check
//!
//! # Design Decisions
//! - The pool is the only state shared between requests; it is handed to
//!   each resource service at construction, never stored globally
//! - Foreign keys are enforced by SQLite (`ON DELETE RESTRICT` on notes)
//! - Schema creation is idempotent bootstrap, not a migration system

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS folders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        folder_id INTEGER NOT NULL REFERENCES folders(id) ON DELETE RESTRICT,
        modified TEXT NOT NULL
    )",
];

/// Errors raised while preparing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to create schema: {0}")]
    Schema(#[source] sqlx::Error),
}

/// Open the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(StoreError::InvalidUrl)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

    // An in-memory database lives exactly as long as its connection.
    if config.is_in_memory() {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(StoreError::Connect)?;

    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Database pool ready"
    );

    if config.create_schema {
        ensure_schema(&pool).await?;
    }

    Ok(pool)
}

/// Create the tables if they do not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    for statement in SCHEMA {
        sqlx::query(*statement)
            .execute(pool)
            .await
            .map_err(StoreError::Schema)?;
    }
    tracing::debug!("Schema ensured");
    Ok(())
}

/// Round-trip a trivial query.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}
