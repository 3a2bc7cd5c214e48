//! Error types for SafeScan services.

use thiserror::Error;

/// Result type alias using the SafeScan error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for SafeScan services.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required credential is not configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Invalid input or request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An analysis is already in flight
    #[error("An analysis is already in progress")]
    Busy,

    /// External service error
    #[error("External service error: {0}")]
    External(String),

    /// The model returned an empty payload
    #[error("Empty response from model")]
    EmptyResponse,

    /// The model payload contained no extractable structured result
    #[error("No extractable structured result in model output")]
    NoStructuredResult,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an error with additional context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error means the current request cannot succeed
    /// but a manual resubmission might.
    pub const fn is_retryable_by_user(&self) -> bool {
        matches!(
            self,
            Self::External(_) | Self::EmptyResponse | Self::NoStructuredResult | Self::Busy
        )
    }

    /// Get HTTP status code for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Busy => 409,
            Self::External(_) | Self::EmptyResponse | Self::NoStructuredResult => 502,
            Self::MissingCredential(_) => 503,
            Self::WithContext { source, .. } => source.status_code(),
            _ => 500,
        }
    }
}

/// Extension trait for adding context to any error type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
