//! Core business logic for R-KAS.
//!
//! This crate contains the budget worksheet with no UI or network dependencies.
//! Record integrity rules, calculations, and the file formats live here.
//!
//! # Modules
//!
//! - `budget` - Line item schema, derived-field calculator, cross-field validator
//! - `worksheet` - The session's record set and its mutations
//! - `query` - Filtering, sorting, and pagination
//! - `dashboard` - Monthly, quarterly, and per-bidang aggregation
//! - `export` - CSV, JSON, Excel, and printable HTML output
//! - `import` - Legacy CSV and JSON input
//! - `store` - Record persistence and column settings
//! - `sample` - Deterministic demo records

pub mod budget;
pub mod dashboard;
pub mod export;
pub mod import;
pub mod query;
pub mod sample;
pub mod store;
pub mod worksheet;
