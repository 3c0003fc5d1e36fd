//! Worksheet export: CSV, JSON, pseudo-Excel, and printable HTML.
//!
//! Tabular formats are driven by a column list (see
//! [`ColumnSettings`](crate::store::ColumnSettings)) and read values through
//! the typed field accessor.

mod error;
mod format;
mod html;
mod service;

pub use error::ExportError;
pub use format::ExportFormat;
pub use service::{ExportService, ReportHeader};
