use thiserror::Error;

/// Errors emitted by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error(transparent)]
    Core(#[from] bookstats_core::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
