use thiserror::Error;

/// Core error type shared across bookstats crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The population violates relational invariants.
    #[error("invalid population: {0}")]
    InvalidPopulation(String),
    /// A value could not be decoded into a model type.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Convenience alias for results returned by bookstats crates.
pub type Result<T> = std::result::Result<T, Error>;
