//! Error types for Precis.

use thiserror::Error;

/// Message shown when the API key or the URL is missing.
pub const MISSING_INPUT_MESSAGE: &str = "Please provide the information to get started.";

/// Library-level error type for Precis operations.
#[derive(Error, Debug)]
pub enum PrecisError {
    #[error("{0}")]
    Configuration(String),

    #[error("Please enter a valid URL: {0}")]
    InvalidInput(String),

    #[error("Only YouTube video URLs are supported: {0}")]
    UnsupportedSource(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),

    #[error("A summarization is already running. Please wait for it to finish.")]
    Busy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl PrecisError {
    /// The error for a missing API key or a blank URL.
    pub fn missing_input() -> Self {
        PrecisError::Configuration(MISSING_INPUT_MESSAGE.to_string())
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PrecisError::Configuration(_) | PrecisError::Io(_) | PrecisError::TomlParse(_) => {
                "configuration"
            }
            PrecisError::InvalidInput(_) => "invalid_input",
            PrecisError::UnsupportedSource(_) => "unsupported_source",
            PrecisError::TranscriptUnavailable(_) => "transcript_unavailable",
            PrecisError::SummarizationFailed(_) => "summarization_failed",
            PrecisError::Busy => "busy",
        }
    }

    /// Whether the failure is shown as a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, PrecisError::TranscriptUnavailable(_))
    }
}

/// Result type alias for Precis operations.
pub type Result<T> = std::result::Result<T, PrecisError>;

/// Result of classifying a URL.
pub type ClassifyResult<T> = Result<T>;

/// Result of fetching a transcript.
pub type FetchResult<T> = Result<T>;

/// Result of the summarization pipeline.
pub type PipelineResult<T> = Result<T>;
