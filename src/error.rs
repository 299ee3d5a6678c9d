//! Error handling for wavechunk
//!
//! One crate-wide error enum; constructors surface `InvalidInput` for
//! values outside their accepted shapes.

use thiserror::Error;

/// Result type alias for wavechunk operations
pub type Result<T> = std::result::Result<T, WavechunkError>;

/// Main error type for wavechunk operations
#[derive(Error, Debug)]
pub enum WavechunkError {
    // Construction Errors
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio { reason: String },

    #[error("Format mismatch: {reason}")]
    FormatMismatch { reason: String },

    // Audio Validation Errors
    #[error("Audio contains no frames")]
    EmptyAudio,

    // WAV Codec Errors
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WavechunkError {
    /// Shorthand for the constructor-contract error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        WavechunkError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            WavechunkError::InvalidInput { .. } => "INVALID_INPUT",
            WavechunkError::FileNotFound { .. } => "FILE_NOT_FOUND",
            WavechunkError::InvalidAudio { .. } => "INVALID_AUDIO",
            WavechunkError::FormatMismatch { .. } => "FORMAT_MISMATCH",
            WavechunkError::EmptyAudio => "EMPTY_AUDIO",
            WavechunkError::Wav(_) => "WAV_ERROR",
            WavechunkError::Io(_) => "IO_ERROR",
            WavechunkError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
