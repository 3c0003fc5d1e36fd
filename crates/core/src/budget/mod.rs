//! Budget line items: schema, derived-field calculator, and validator.

pub mod calculator;
pub mod draft;
pub mod error;
pub mod schema;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod tests;

pub use calculator::{PureValue, recompute, recompute_with, refresh};
pub use draft::{Draft, DraftOutcome};
pub use error::BudgetError;
pub use schema::{Field, FieldDescriptor, FieldKind, FieldValue};
pub use service::BudgetService;
pub use types::{
    Activity, BudgetLineItem, CodeName, Component, MONTHS, QUARTERS, Schedule, Series,
    VarianceResult, VarianceStatus,
};
pub use validation::{TOLERANCE, ValidationErrors, is_submittable, validate};
