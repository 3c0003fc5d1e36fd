//! Worksheet error types.

use rkas_shared::AppError;
use rkas_shared::types::RecordId;
use thiserror::Error;

use crate::budget::{BudgetError, ValidationErrors};
use crate::store::StoreError;

/// Worksheet operation errors.
#[derive(Debug, Error)]
pub enum WorksheetError {
    /// No record carries the id.
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// The submitted record does not validate.
    #[error("Record is not valid: {0}")]
    Invalid(ValidationErrors),

    /// A field edit was rejected before validation.
    #[error(transparent)]
    Budget(BudgetError),

    /// The record set could not be mirrored to the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BudgetError> for WorksheetError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::Invalid(errors) => Self::Invalid(errors),
            other => Self::Budget(other),
        }
    }
}

impl From<WorksheetError> for AppError {
    fn from(err: WorksheetError) -> Self {
        match err {
            WorksheetError::NotFound(id) => Self::NotFound(format!("record {id}")),
            WorksheetError::Invalid(errors) => Self::Validation(errors.to_string()),
            WorksheetError::Budget(err) => Self::InvalidInput(err.to_string()),
            WorksheetError::Store(err) => Self::Storage(err.to_string()),
        }
    }
}
