//! Hookup record persistence

use async_trait::async_trait;
use sfh_common::uuid_utils;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::HookupError;
use crate::models::{Hookup, HookupId, NewHookup, UtilityType};

/// Persistence of hookup records
///
/// The repository is the only authority on record existence and on name and
/// endpoint uniqueness.
#[async_trait]
pub trait HookupRepository: Send + Sync {
    /// Store a new record under a freshly generated identifier
    async fn save(&self, hookup: NewHookup) -> Result<Hookup, HookupError>;

    async fn find_by_id(&self, id: &HookupId) -> Result<Option<Hookup>, HookupError>;

    async fn find_all(&self) -> Result<Vec<Hookup>, HookupError>;

    /// Overwrite name and endpoint of an existing record
    async fn update(&self, hookup: &Hookup) -> Result<Hookup, HookupError>;

    async fn remove(&self, id: &HookupId) -> Result<(), HookupError>;
}

/// SQLite-backed hookup repository
#[derive(Clone)]
pub struct SqliteHookupRepository {
    pool: SqlitePool,
}

impl SqliteHookupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Canonical (lowercase hyphenated) form of a well-formed identifier
fn canonical_id(id: &HookupId) -> Result<String, HookupError> {
    uuid_utils::parse(id.as_str())
        .map(|uuid| uuid.to_string())
        .map_err(|_| HookupError::InvalidIdentifier)
}

/// Translate a UNIQUE violation into the matching conflict
fn map_write_error(err: sqlx::Error, name: &str, endpoint: &str) -> HookupError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            // SQLite reports "UNIQUE constraint failed: hookups.<column>"
            let message = db_err.message();
            if message.contains("hookups.name") {
                return HookupError::NameConflict(name.to_string());
            }
            if message.contains("hookups.endpoint") {
                return HookupError::EndpointConflict(endpoint.to_string());
            }
        }
    }
    HookupError::Database(err)
}

fn row_to_hookup(row: &SqliteRow) -> Result<Hookup, HookupError> {
    let id: String = row.try_get("id")?;
    let utility_type: String = row.try_get("utility_type")?;
    let utility_type = utility_type
        .parse::<UtilityType>()
        .map_err(|_| HookupError::CorruptRecord(format!("{}: utility type {}", id, utility_type)))?;

    Ok(Hookup {
        id: HookupId::new(id),
        name: row.try_get("name")?,
        utility_type,
        endpoint: row.try_get("endpoint")?,
    })
}

#[async_trait]
impl HookupRepository for SqliteHookupRepository {
    async fn save(&self, hookup: NewHookup) -> Result<Hookup, HookupError> {
        let id = uuid_utils::generate().to_string();

        sqlx::query(
            r#"
            INSERT INTO hookups (id, name, utility_type, endpoint, created_at, updated_at)
            VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(&id)
        .bind(&hookup.name)
        .bind(hookup.utility_type.as_str())
        .bind(&hookup.endpoint)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &hookup.name, &hookup.endpoint))?;

        Ok(Hookup {
            id: HookupId::new(id),
            name: hookup.name,
            utility_type: hookup.utility_type,
            endpoint: hookup.endpoint,
        })
    }

    async fn find_by_id(&self, id: &HookupId) -> Result<Option<Hookup>, HookupError> {
        let id = canonical_id(id)?;

        let row = sqlx::query("SELECT id, name, utility_type, endpoint FROM hookups WHERE id = ?")
            .bind(&id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_hookup).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Hookup>, HookupError> {
        let rows = sqlx::query(
            "SELECT id, name, utility_type, endpoint FROM hookups ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_hookup).collect()
    }

    async fn update(&self, hookup: &Hookup) -> Result<Hookup, HookupError> {
        let id = canonical_id(&hookup.id)?;

        let result = sqlx::query(
            r#"
            UPDATE hookups
            SET name = ?, endpoint = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&hookup.name)
        .bind(&hookup.endpoint)
        .bind(&id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &hookup.name, &hookup.endpoint))?;

        if result.rows_affected() == 0 {
            return Err(HookupError::NotFound);
        }

        self.find_by_id(&HookupId::new(id))
            .await?
            .ok_or(HookupError::NotFound)
    }

    async fn remove(&self, id: &HookupId) -> Result<(), HookupError> {
        let id = canonical_id(id)?;

        let result = sqlx::query("DELETE FROM hookups WHERE id = ?")
            .bind(&id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HookupError::NotFound);
        }

        Ok(())
    }
}
