//! Property-based tests for the budget module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::{PureValue, recompute, recompute_with};
use super::fixtures::valid_item;
use super::schema::Field;
use super::service::BudgetService;
use super::types::{BudgetLineItem, Series, VarianceStatus};
use super::validation::validate;

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(Decimal::from)
}

fn months() -> impl Strategy<Value = [Decimal; 12]> {
    proptest::array::uniform12(amount())
}

/// A record whose inputs are arbitrary but whose derived fields are stale.
fn arbitrary_item() -> impl Strategy<Value = BudgetLineItem> {
    (months(), months(), 0i64..1_000, amount(), amount()).prop_map(
        |(planned, actual, volume, price, stale)| {
            let mut item = valid_item();
            item.planned.months = planned;
            item.actual.months = actual;
            item.volume = Decimal::from(volume);
            item.unit_price = price;
            item.detail_value = stale;
            item.planned.total = stale;
            item.actual.quarters = [stale; 4];
            item
        },
    )
}

/// A record whose realized months never exceed the plan.
fn realizable_item() -> impl Strategy<Value = BudgetLineItem> {
    (months(), proptest::array::uniform12(0u32..=100)).prop_map(|(planned, shares)| {
        let mut item = valid_item();
        item.planned.months = planned;
        for (m, share) in shares.iter().enumerate() {
            item.actual.months[m] =
                (planned[m] * Decimal::from(*share) / Decimal::ONE_HUNDRED).floor();
        }
        recompute(&item)
    })
}

proptest! {
    /// Recomputing twice yields the same record as recomputing once.
    #[test]
    fn test_recompute_idempotent(item in arbitrary_item()) {
        let once = recompute(&item);
        prop_assert_eq!(recompute(&once), once.clone());
        prop_assert_eq!(recompute_with(&once, PureValue::Mirror).detail_value, once.detail_value);
    }

    /// Each quarter equals the sum of its three months.
    #[test]
    fn test_quarters_are_month_sums(item in arbitrary_item()) {
        let out = recompute(&item);
        for series in [Series::Planned, Series::Actual] {
            let schedule = out.schedule(series);
            for q in 1..=4 {
                prop_assert_eq!(schedule.quarter(q), schedule.months_in_quarter(q));
            }
        }
    }

    /// The grand total equals both the quarter sum and the month sum.
    #[test]
    fn test_total_matches_months(item in arbitrary_item()) {
        let out = recompute(&item);
        for series in [Series::Planned, Series::Actual] {
            let schedule = out.schedule(series);
            prop_assert_eq!(schedule.total, schedule.sum_of_quarters());
            prop_assert_eq!(schedule.total, schedule.sum_of_months());
        }
    }

    /// Detail value is always volume times unit price.
    #[test]
    fn test_detail_value_derived(item in arbitrary_item()) {
        let out = recompute(&item);
        prop_assert_eq!(out.detail_value, out.volume * out.unit_price);
    }

    /// A recomputed record never fails a consistency sum rule.
    #[test]
    fn test_recomputed_sums_never_fail(item in realizable_item()) {
        let errors = validate(&item);
        prop_assert!(errors.is_empty(), "errors: {}", errors);
    }

    /// Raising one realized month above its plan always fails that month. The
    /// total is flagged only when slack in other months does not absorb it.
    #[test]
    fn test_over_realization_always_rejected(
        item in realizable_item(),
        month in 1u8..=12,
        extra in 1i64..1_000_000,
    ) {
        let mut item = item;
        let index = usize::from(month);
        item.actual.months[index - 1] = item.planned.month(index) + Decimal::from(extra);
        let item = recompute(&item);

        let errors = validate(&item);
        prop_assert!(errors.contains(Field::actual_month(month)));
        prop_assert_eq!(
            errors.contains(Field::Total(Series::Actual)),
            item.actual.total > item.planned.total
        );
        prop_assert!(BudgetService::prepare(&item, PureValue::Keep).is_err());
    }

    /// variance = planned - actual, and the status follows its sign.
    #[test]
    fn test_variance_calculation(
        planned in 0i64..1_000_000_000,
        actual in 0i64..1_000_000_000,
    ) {
        let planned = Decimal::from(planned);
        let actual = Decimal::from(actual);

        let result = BudgetService::calculate_variance(planned, actual);
        prop_assert_eq!(result.variance, planned - actual);

        let expected = match result.variance.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => VarianceStatus::UnderBudget,
            std::cmp::Ordering::Less => VarianceStatus::OverBudget,
            std::cmp::Ordering::Equal => VarianceStatus::OnBudget,
        };
        prop_assert_eq!(result.status, expected);
    }

    /// If planned > 0: realization_percent = actual / planned * 100.
    #[test]
    fn test_realization_percent_nonzero_plan(
        planned in 1i64..1_000_000_000,
        actual in 0i64..1_000_000_000,
    ) {
        let planned = Decimal::from(planned);
        let actual = Decimal::from(actual);

        let result = BudgetService::calculate_variance(planned, actual);
        let expected = (actual / planned * Decimal::ONE_HUNDRED).round_dp(2);
        prop_assert_eq!(result.realization_percent, expected);
    }
}
