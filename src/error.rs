//! Error handling for the career gap analyzer
//!
//! The analytics core is total and never fails; these errors only surface at
//! the dataset, configuration, CLI, and output boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerGapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CareerGapError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CareerGapError {
    fn from(err: anyhow::Error) -> Self {
        CareerGapError::AnalysisFailed(err.to_string())
    }
}
