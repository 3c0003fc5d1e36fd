//! Budget error types.

use thiserror::Error;

use super::schema::Field;
use super::validation::ValidationErrors;

/// Budget-record errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// The record failed validation and cannot be submitted.
    #[error("Record is not valid: {0}")]
    Invalid(ValidationErrors),

    /// Field key is not part of the schema.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A numeric field received non-numeric input.
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber {
        /// Target field.
        field: Field,
        /// Raw input.
        value: String,
    },
}
