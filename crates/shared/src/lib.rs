//! Shared types, errors, and configuration for R-KAS.
//!
//! This crate provides common types used across all other crates:
//! - Rupiah amount parsing and formatting with decimal precision
//! - Typed IDs for budget records
//! - Pagination types for record listings
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
