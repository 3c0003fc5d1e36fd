//! Tests for dashboard aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::DashboardService;
use crate::budget::fixtures::valid_item;
use crate::budget::{BudgetLineItem, CodeName, VarianceStatus, recompute};

fn item(bidang: &str, month: usize, planned: Decimal, actual: Decimal) -> BudgetLineItem {
    let mut item = valid_item();
    item.bidang = CodeName::new(bidang, format!("Bidang {bidang}"));
    item.planned.months = [Decimal::ZERO; 12];
    item.actual.months = [Decimal::ZERO; 12];
    item.planned.months[month - 1] = planned;
    item.actual.months[month - 1] = actual;
    recompute(&item)
}

#[test]
fn test_empty_worksheet_summary() {
    let summary = DashboardService::summary(&[]);

    assert_eq!(summary.record_count, 0);
    assert_eq!(summary.total_planned, Decimal::ZERO);
    assert_eq!(summary.realization_percent, Decimal::ZERO);
    assert_eq!(summary.status, VarianceStatus::OnBudget);
}

#[test]
fn test_summary_totals() {
    let records = vec![
        item("01", 1, dec!(1000), dec!(250)),
        item("02", 8, dec!(3000), dec!(750)),
    ];
    let summary = DashboardService::summary(&records);

    assert_eq!(summary.record_count, 2);
    assert_eq!(summary.total_planned, dec!(4000));
    assert_eq!(summary.total_actual, dec!(1000));
    assert_eq!(summary.remaining, dec!(3000));
    assert_eq!(summary.realization_percent, dec!(25.00));
    assert_eq!(summary.status, VarianceStatus::UnderBudget);
    assert_eq!(summary.over_budget_count, 0);
}

#[test]
fn test_by_month_and_quarter() {
    let records = vec![
        item("01", 1, dec!(102838), Decimal::ZERO),
        item("01", 8, dec!(959818), dec!(500000)),
    ];

    let months = DashboardService::by_month(&records);
    assert_eq!(months.len(), 12);
    assert_eq!(months[0].label, "Januari");
    assert_eq!(months[0].planned, dec!(102838));
    assert_eq!(months[7].label, "Agustus");
    assert_eq!(months[7].actual, dec!(500000));

    let quarters = DashboardService::by_quarter(&records);
    let planned: Vec<_> = quarters.iter().map(|q| q.planned).collect();
    assert_eq!(planned, vec![dec!(102838), dec!(0), dec!(959818), dec!(0)]);
    assert_eq!(quarters[2].label, "TW 3");
}

#[test]
fn test_by_bidang_groups_by_code() {
    let records = vec![
        item("02", 1, dec!(100), dec!(100)),
        item("01", 2, dec!(200), dec!(50)),
        item("02", 3, dec!(300), dec!(0)),
    ];

    let rows = DashboardService::by_bidang(&records);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].code, "01");
    assert_eq!(rows[1].code, "02");
    assert_eq!(rows[1].name, "Bidang 02");
    assert_eq!(rows[1].record_count, 2);
    assert_eq!(rows[1].variance.planned, dec!(400));
    assert_eq!(rows[1].variance.realization_percent, dec!(25.00));
}

#[test]
fn test_build_combines_views() {
    let records = vec![item("01", 5, dec!(10), dec!(10))];
    let dashboard = DashboardService::build(&records);

    assert_eq!(dashboard.summary.status, VarianceStatus::OnBudget);
    assert_eq!(dashboard.by_month.len(), 12);
    assert_eq!(dashboard.by_quarter.len(), 4);
    assert_eq!(dashboard.by_bidang.len(), 1);
}

proptest! {
    /// Monthly, quarterly, and bidang views all add up to the summary total.
    #[test]
    fn test_views_agree_with_summary(
        amounts in proptest::collection::vec((1usize..=12, 0i64..1_000_000, 0u8..3), 0..20),
    ) {
        let records: Vec<_> = amounts
            .iter()
            .map(|(month, planned, bidang)| {
                item(&format!("0{bidang}"), *month, Decimal::from(*planned), Decimal::ZERO)
            })
            .collect();

        let dashboard = DashboardService::build(&records);
        let total = dashboard.summary.total_planned;
        prop_assert_eq!(dashboard.by_month.iter().map(|p| p.planned).sum::<Decimal>(), total);
        prop_assert_eq!(dashboard.by_quarter.iter().map(|p| p.planned).sum::<Decimal>(), total);
        prop_assert_eq!(
            dashboard.by_bidang.iter().map(|b| b.variance.planned).sum::<Decimal>(),
            total
        );
    }
}
