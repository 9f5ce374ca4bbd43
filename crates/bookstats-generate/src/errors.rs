use thiserror::Error;

/// Errors emitted by the dataset generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("cannot sample {requested} distinct authors from a pool of {available}")]
    SamplingPrecondition { requested: usize, available: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
