use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use super::error::{classify, Result, StorageError};
use super::UrlStorage;
use crate::models::UrlRecord;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS url (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        alias TEXT NOT NULL UNIQUE,
        url   TEXT NOT NULL
    )";

const CREATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_alias ON url(alias)";

/// SQLite-backed [`UrlStorage`].
///
/// Holds a single connection pool. Each operation is one statement; the
/// engine's own locking decides how concurrent calls interleave.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if needed) the database at `location` and make sure the
    /// schema exists. Safe to call repeatedly on the same location.
    pub async fn new(location: &str) -> Result<Self> {
        Self::open(location, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Like [`SqliteStorage::new`] with an explicit pool size.
    pub async fn open(location: &str, max_connections: u32) -> Result<Self> {
        const OP: &str = "storage.sqlite.new";
        let init_err = |source| StorageError::Initialization { op: OP, source };

        let options = SqliteConnectOptions::from_str(location)
            .map_err(init_err)?
            .create_if_missing(true);

        // Every pooled connection to `:memory:` must be the same connection,
        // otherwise each one sees its own empty database.
        let in_memory = location.contains(":memory:");
        let (options, max_connections) = if in_memory {
            (options, 1)
        } else {
            (
                options.journal_mode(SqliteJournalMode::Wal),
                max_connections.max(1),
            )
        };

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if in_memory {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(init_err)?;

        let storage = Self::from_pool(pool);
        storage.ensure_schema().await.map_err(init_err)?;

        tracing::info!("Storage ready at {}", location);
        Ok(storage)
    }

    /// Wrap an existing pool. The schema is assumed to be in place.
    fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn ensure_schema(&self) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UrlStorage for SqliteStorage {
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64> {
        const OP: &str = "storage.sqlite.save_url";

        let id = sqlx::query("INSERT INTO url (url, alias) VALUES (?1, ?2)")
            .bind(url)
            .bind(alias)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(OP, alias, e))?
            .last_insert_rowid();

        tracing::debug!("Saved alias '{}' as record {}", alias, id);
        Ok(id)
    }

    async fn get_url(&self, alias: &str) -> Result<String> {
        const OP: &str = "storage.sqlite.get_url";

        let record: Option<UrlRecord> =
            sqlx::query_as("SELECT id, alias, url FROM url WHERE alias = ?1")
                .bind(alias)
                .fetch_optional(&self.pool)
                .await
                .map_err(|source| StorageError::Storage { op: OP, source })?;

        match record {
            Some(record) => {
                tracing::debug!("Resolved alias '{}' (record {})", alias, record.id);
                Ok(record.url)
            }
            None => Err(StorageError::AliasNotFound {
                op: OP,
                alias: alias.to_owned(),
            }),
        }
    }

    async fn delete_url(&self, alias: &str) -> Result<()> {
        const OP: &str = "storage.sqlite.delete_url";

        let affected = sqlx::query("DELETE FROM url WHERE alias = ?1")
            .bind(alias)
            .execute(&self.pool)
            .await
            .map_err(|source| StorageError::Storage { op: OP, source })?
            .rows_affected();

        if affected == 0 {
            return Err(StorageError::AliasNotFound {
                op: OP,
                alias: alias.to_owned(),
            });
        }

        tracing::debug!("Deleted alias '{}'", alias);
        Ok(())
    }
}
