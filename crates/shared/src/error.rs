//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Record or setting not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected by the record validator.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed user input (unknown field, bad argument).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Local cache or primary store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import file could not be read.
    #[error("Import error: {0}")]
    Import(String),

    /// Export could not be produced.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 3,
            Self::Validation(_) => 4,
            Self::InvalidInput(_) => 2,
            Self::Storage(_) => 5,
            Self::Import(_) | Self::Export(_) => 6,
            Self::Config(_) => 78,
        }
    }

    /// Returns the stable error code printed alongside the message.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Import(_) => "IMPORT_ERROR",
            Self::Export(_) => "EXPORT_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
