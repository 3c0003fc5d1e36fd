//! Record import.
//!
//! Two sources are accepted:
//! - the legacy semicolon-delimited CSV, with Indonesian number formatting
//! - a JSON array of records, as produced by the JSON export
//!
//! Every imported row is recomputed and validated before it is returned; a
//! file with one failing row is rejected as a whole.

mod error;
mod service;

pub use error::ImportError;
pub use service::{ImportService, LEGACY_DELIMITER, legacy_columns};
