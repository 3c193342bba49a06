//! Error types shared across LabOps components

use thiserror::Error;

/// Result type alias for LabOps operations
pub type Result<T> = std::result::Result<T, LabopsError>;

/// Main error type for LabOps infrastructure code
#[derive(Error, Debug)]
pub enum LabopsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
