//! Dashboard aggregation service.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::{BidangBreakdown, Dashboard, DashboardSummary, MONTH_NAMES, PeriodPoint};
use crate::budget::{BudgetLineItem, BudgetService, MONTHS, QUARTERS, Series};

/// Service for aggregating worksheet records.
pub struct DashboardService;

impl DashboardService {
    /// Builds every dashboard view at once.
    #[must_use]
    pub fn build(records: &[BudgetLineItem]) -> Dashboard {
        Dashboard {
            summary: Self::summary(records),
            by_month: Self::by_month(records),
            by_quarter: Self::by_quarter(records),
            by_bidang: Self::by_bidang(records),
        }
    }

    /// Overall totals across all records.
    #[must_use]
    pub fn summary(records: &[BudgetLineItem]) -> DashboardSummary {
        let total_detail_value = sum(records, |item| item.detail_value);
        let total_planned = sum(records, |item| item.planned.total);
        let total_actual = sum(records, |item| item.actual.total);
        let variance = BudgetService::calculate_variance(total_planned, total_actual);

        DashboardSummary {
            record_count: records.len(),
            total_detail_value,
            total_planned,
            total_actual,
            remaining: variance.variance,
            realization_percent: variance.realization_percent,
            status: variance.status,
            over_budget_count: records
                .iter()
                .filter(|item| item.actual.total > item.planned.total)
                .count(),
        }
    }

    /// Planned and realized totals per month.
    #[must_use]
    pub fn by_month(records: &[BudgetLineItem]) -> Vec<PeriodPoint> {
        (1..=MONTHS)
            .zip(MONTH_NAMES)
            .zip(1u8..)
            .map(|((m, name), period)| PeriodPoint {
                period,
                label: name.to_string(),
                planned: sum(records, |item| item.schedule(Series::Planned).month(m)),
                actual: sum(records, |item| item.schedule(Series::Actual).month(m)),
            })
            .collect()
    }

    /// Planned and realized totals per quarter (triwulan).
    #[must_use]
    pub fn by_quarter(records: &[BudgetLineItem]) -> Vec<PeriodPoint> {
        (1..=QUARTERS)
            .zip(1u8..)
            .map(|(q, period)| PeriodPoint {
                period,
                label: format!("TW {q}"),
                planned: sum(records, |item| item.planned.quarter(q)),
                actual: sum(records, |item| item.actual.quarter(q)),
            })
            .collect()
    }

    /// Totals per bidang code, ordered by code.
    #[must_use]
    pub fn by_bidang(records: &[BudgetLineItem]) -> Vec<BidangBreakdown> {
        let mut groups: BTreeMap<&str, Vec<&BudgetLineItem>> = BTreeMap::new();
        for item in records {
            groups.entry(item.bidang.code.as_str()).or_default().push(item);
        }

        groups
            .into_iter()
            .map(|(code, items)| {
                let planned = items
                    .iter()
                    .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.planned.total));
                let actual = items
                    .iter()
                    .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.actual.total));
                BidangBreakdown {
                    code: code.to_string(),
                    name: items
                        .first()
                        .map(|item| item.bidang.name.clone())
                        .unwrap_or_default(),
                    record_count: items.len(),
                    variance: BudgetService::calculate_variance(planned, actual),
                }
            })
            .collect()
    }
}

fn sum(records: &[BudgetLineItem], amount: impl Fn(&BudgetLineItem) -> Decimal) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(amount(item)))
}
