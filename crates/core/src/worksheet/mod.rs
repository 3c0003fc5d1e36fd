//! The session's in-memory record set.

mod error;
mod service;

pub use error::WorksheetError;
pub use service::{ImportMode, Worksheet};
