//! Error types for the threadpulse analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for threadpulse operations.
#[derive(Error, Debug)]
pub enum PulseError {
    /// The annotation model, lexicon or configuration could not be loaded.
    ///
    /// Always raised before any document is processed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The document source failed or could not be reached.
    #[error("Document source unavailable: {0}")]
    SourceUnavailable(String),

    /// A caller supplied an argument outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The renderer failed to produce its output.
    #[error("Render error: {0}")]
    Render(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for threadpulse operations.
pub type Result<T> = std::result::Result<T, PulseError>;

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        PulseError::Serialization(err.to_string())
    }
}

impl PulseError {
    /// Returns true for errors that abort a run before analysis begins.
    pub fn is_fatal_configuration(&self) -> bool {
        matches!(self, PulseError::Configuration(_) | PulseError::FileNotFound(_))
    }
}
