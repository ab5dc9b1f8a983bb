//! Database access layer for sfh-hookups
//!
//! Hookup records live in a single SQLite table. Name and endpoint uniqueness
//! is enforced by UNIQUE constraints so that concurrent writers are
//! serialized by the store itself.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

mod hookups;
pub use hookups::{HookupRepository, SqliteHookupRepository};

/// Connection pool size for file-backed databases
const MAX_CONNECTIONS: u32 = 8;

/// Connect to the hookup database, creating the file if needed
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {}", database_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Connect to a private in-memory database with the schema applied
///
/// Every SQLite in-memory connection is its own database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await
        .context("Failed to open in-memory database")?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Create the hookups table if it does not exist
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hookups (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            utility_type TEXT NOT NULL CHECK (utility_type IN ('gas', 'water', 'electricity')),
            endpoint TEXT NOT NULL UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create hookups table")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_init_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();

        init_schema(&pool).await.expect("Second init should succeed");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hookups")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_connect_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hookups.db");

        let pool = connect(&format!("sqlite://{}", path.display())).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_rejects_unknown_utility_type_column_value() {
        let pool = connect_in_memory().await.unwrap();

        let result = sqlx::query(
            "INSERT INTO hookups (id, name, utility_type, endpoint) VALUES ('a', 'b', 'steam', 'c')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }
}
