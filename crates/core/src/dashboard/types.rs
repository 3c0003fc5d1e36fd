//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::{VarianceResult, VarianceStatus};

/// Indonesian month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Everything the dashboard shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// Overall totals.
    pub summary: DashboardSummary,
    /// Twelve monthly points.
    pub by_month: Vec<PeriodPoint>,
    /// Four quarterly points.
    pub by_quarter: Vec<PeriodPoint>,
    /// One row per bidang, ordered by code.
    pub by_bidang: Vec<BidangBreakdown>,
}

/// Overall planned vs. realized totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of records.
    pub record_count: usize,
    /// Sum of detail values.
    pub total_detail_value: Decimal,
    /// Sum of planned totals.
    pub total_planned: Decimal,
    /// Sum of realized totals.
    pub total_actual: Decimal,
    /// Planned minus realized.
    pub remaining: Decimal,
    /// Realized as a percentage of planned.
    pub realization_percent: Decimal,
    /// Variance classification of the totals.
    pub status: VarianceStatus,
    /// Records whose realized total exceeds their plan.
    pub over_budget_count: usize,
}

/// Planned and realized amounts for one month or quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPoint {
    /// 1-based month or quarter number.
    pub period: u8,
    /// Display label such as `Agustus` or `TW 3`.
    pub label: String,
    /// Planned amount.
    pub planned: Decimal,
    /// Realized amount.
    pub actual: Decimal,
}

/// Totals for one bidang.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidangBreakdown {
    /// Bidang code.
    pub code: String,
    /// Bidang name (from the first record carrying the code).
    pub name: String,
    /// Number of records.
    pub record_count: usize,
    /// Variance of realized against planned.
    pub variance: VarianceResult,
}
