//! # Credential Registry Operations
//!
//! Username-keyed CRUD over the `local_storage` key-value table.
//!
//! ## No verification
//! The registry only remembers that a credential was created and hands its id
//! back as an allow-list hint. It never checks the id format or the key.

use crate::error::{AppError, AppResult};
use crate::registry::models::{storage_key, CredentialRecord, CredentialSummary};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

// `_` is a LIKE wildcard, so the prefix is escaped.
const KEY_PATTERN: &str = "passkey\\_%";

/// Local credential registry backed by SQLite.
///
/// Cheap to clone: `SqlitePool` is a handle to a shared pool.
#[derive(Clone, Debug)]
pub struct CredentialRegistry {
    pool: SqlitePool,
}

impl CredentialRegistry {
    /// Open the registry at `database_url` and run migrations.
    ///
    /// The pool holds a single long-lived connection: the registry has one
    /// writer, and `sqlite::memory:` databases live only as long as their
    /// connection.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(database_url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the table if needed.
    pub async fn from_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert or replace the record stored for `record.username`.
    pub async fn put(&self, record: &CredentialRecord) -> AppResult<()> {
        if record.credential_id.is_empty() {
            return Err(AppError::InvalidInput(
                "A credential id is required to store a passkey.".to_string(),
            ));
        }

        let value = serde_json::to_string(record)?;

        sqlx::query(
            "INSERT INTO local_storage (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(record.storage_key())
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up the record for `username`.
    pub async fn get(&self, username: &str) -> AppResult<Option<CredentialRecord>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_storage WHERE key = ?")
                .bind(storage_key(username))
                .fetch_optional(&self.pool)
                .await?;

        Ok(value.map(|v| serde_json::from_str(&v)).transpose()?)
    }

    /// Every stored passkey as `(username, created_at)`. Order is unspecified.
    ///
    /// Values that no longer parse are logged and skipped.
    pub async fn list(&self) -> AppResult<Vec<CredentialSummary>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM local_storage WHERE key LIKE ? ESCAPE '\\'")
                .bind(KEY_PATTERN)
                .fetch_all(&self.pool)
                .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for (key, value) in rows {
            match serde_json::from_str::<CredentialRecord>(&value) {
                Ok(record) => summaries.push(CredentialSummary::from(&record)),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Skipping unreadable passkey record");
                }
            }
        }

        Ok(summaries)
    }

    /// Remove the record for `username`. Returns whether one existed.
    pub async fn delete(&self, username: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(storage_key(username))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
