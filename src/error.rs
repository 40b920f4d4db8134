/// Error types for Minute Scribe
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unable to read transcript content: {0}")]
    Read(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Analysis unavailable: {0}")]
    AnalysisUnavailable(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("A summary already exists for meeting {0}")]
    DuplicateSummary(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.to_string()
    }
}
