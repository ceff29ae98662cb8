//! Health Audio Error Types
//!
//! Centralized error handling for the generator.

use thiserror::Error;

/// Central error type for audio generation
#[derive(Error, Debug)]
pub enum GenError {
    /// The synthesis engine or output directory could not be acquired.
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text input error: {0}")]
    Texts(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;
