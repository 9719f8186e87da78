//! Transcription error types.

use thiserror::Error;

/// Result type for transcription operations.
pub type TranscribeResult<T> = Result<T, TranscribeError>;

/// Errors from the transcription client and orchestration.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Transcription request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid transcription response: {0}")]
    InvalidResponse(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscribeError {
    /// Create a request failure error.
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed(message.into())
    }

    /// Create a wrapped transcription failure.
    pub fn transcription_failed(message: impl Into<String>) -> Self {
        Self::TranscriptionFailed(message.into())
    }
}
