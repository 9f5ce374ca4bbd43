mod logging;
mod run;

pub use logging::init_logging;
pub use run::{RunContext, start_run, write_json};

use thiserror::Error;

/// Errors raised while writing run artifacts.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
