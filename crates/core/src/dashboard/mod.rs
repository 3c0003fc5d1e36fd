//! Dashboard aggregation.
//!
//! This module rolls worksheet records up into:
//! - An overall planned vs. realized summary
//! - Monthly and quarterly series
//! - A breakdown by bidang

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::DashboardService;
pub use types::*;
