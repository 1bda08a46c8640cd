use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures surfaced by a [`UrlStorage`](super::UrlStorage) backend.
///
/// Every variant carries the name of the operation that produced it, so a
/// logged error can be traced back without a backtrace. `AliasAlreadyExists`
/// and `AliasNotFound` are expected outcomes that callers match on; the other
/// two wrap the engine error.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{op}: failed to initialize storage: {source}")]
    Initialization {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{op}: alias already exists: {alias}")]
    AliasAlreadyExists { op: &'static str, alias: String },

    #[error("{op}: alias not found: {alias}")]
    AliasNotFound { op: &'static str, alias: String },

    #[error("{op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StorageError {
    /// Name of the operation the error was raised from.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Initialization { op, .. }
            | Self::AliasAlreadyExists { op, .. }
            | Self::AliasNotFound { op, .. }
            | Self::Storage { op, .. } => *op,
        }
    }
}

/// Translate an engine error from a write into the store's own kinds.
///
/// This is the only place that looks at engine-specific error details.
pub(crate) fn classify(op: &'static str, alias: &str, err: sqlx::Error) -> StorageError {
    let unique_violation = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if unique_violation {
        StorageError::AliasAlreadyExists {
            op,
            alias: alias.to_owned(),
        }
    } else {
        StorageError::Storage { op, source: err }
    }
}
