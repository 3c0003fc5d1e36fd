//! Import error types.

use std::path::PathBuf;

use rkas_shared::AppError;
use thiserror::Error;

use crate::budget::{BudgetError, Field, ValidationErrors};

/// Import errors. Line numbers are 1-based and count the header.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be opened.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Source file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be tokenised.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON could not be decoded.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A row has fewer columns than the layout requires.
    #[error("line {line}: expected {expected} columns, found {found}")]
    ShortRow {
        /// Line number.
        line: u64,
        /// Required column count.
        expected: usize,
        /// Columns present.
        found: usize,
    },

    /// A numeric column holds text.
    #[error("line {line}: invalid number for {field}: {value:?}")]
    InvalidNumber {
        /// Line number.
        line: u64,
        /// Target field.
        field: Field,
        /// Raw cell.
        value: String,
    },

    /// A row parsed but does not validate.
    #[error("line {line}: {errors}")]
    InvalidRow {
        /// Line number.
        line: u64,
        /// Failing fields.
        errors: ValidationErrors,
    },

    /// A row was rejected by the record model.
    #[error("line {line}: {source}")]
    Record {
        /// Line number.
        line: u64,
        /// Underlying error.
        #[source]
        source: BudgetError,
    },
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidRow { .. } => Self::Validation(err.to_string()),
            _ => Self::Import(err.to_string()),
        }
    }
}
