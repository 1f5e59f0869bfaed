//! Error types for stagecopy

use std::path::PathBuf;
use thiserror::Error;

/// Error types for staging operations
#[derive(Debug, Error)]
pub enum StageError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source never became visible within the probe budget
    #[error("Can not copy {path} because it does not exist (checked {attempts} times)")]
    SourceNotFound { path: PathBuf, attempts: u32 },

    /// Every transfer attempt failed
    #[error("Failed to copy {source_path} to {destination} after {attempts} attempts: {last}")]
    TransferExhausted {
        source_path: PathBuf,
        destination: PathBuf,
        attempts: u32,
        #[source]
        last: std::io::Error,
    },

    /// Source path has no base name to copy under
    #[error("Source has no file name: {0}")]
    InvalidSource(PathBuf),

    /// A retry wait was interrupted by cancellation
    #[error("Cancelled while {stage}")]
    Cancelled { stage: &'static str },
}

impl StageError {
    /// Check if the source was never found
    pub fn is_source_missing(&self) -> bool {
        matches!(self, StageError::SourceNotFound { .. })
    }

    /// Check if the transfer ran out of attempts
    pub fn is_exhausted(&self) -> bool {
        matches!(self, StageError::TransferExhausted { .. })
    }

    /// Check if this error is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, StageError::Config(_))
    }

    /// Check if the operation was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StageError::Cancelled { .. })
    }
}
