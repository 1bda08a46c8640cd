pub mod error;
pub mod sqlite;

use async_trait::async_trait;

pub use error::{Result, StorageError};
pub use sqlite::SqliteStorage;

/// Persistent alias → URL mapping.
///
/// Uniqueness and existence are enforced by the backend itself: a duplicate
/// alias on save yields [`StorageError::AliasAlreadyExists`], a miss on get or
/// delete yields [`StorageError::AliasNotFound`].
#[async_trait]
pub trait UrlStorage: Send + Sync + 'static {
    /// Store `url` under `alias` and return the new record id.
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64>;

    /// Look up the URL stored under `alias`.
    async fn get_url(&self, alias: &str) -> Result<String>;

    /// Remove the record stored under `alias`.
    async fn delete_url(&self, alias: &str) -> Result<()>;
}
