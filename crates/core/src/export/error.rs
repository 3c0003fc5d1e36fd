//! Export error types.

use std::path::PathBuf;

use rkas_shared::AppError;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Format name not recognised.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// CSV writer failure.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoder failure.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// HTML template rendering failure.
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    /// Encoded output was not valid UTF-8.
    #[error("export produced invalid text: {0}")]
    Encoding(String),

    /// Writing the output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnknownFormat(_) => Self::InvalidInput(err.to_string()),
            _ => Self::Export(err.to_string()),
        }
    }
}
