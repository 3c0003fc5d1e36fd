//! Derived-field recomputation.
//!
//! Quarter subtotals, grand totals, and the detail value are always derived
//! from the monthly inputs and from volume times unit price. Every producer of
//! records (forms, import, sample data) routes through here exactly once.

use rust_decimal::Decimal;

use super::types::{BudgetLineItem, QUARTERS, Schedule};

/// Whether the pre-revision detail value follows the recomputed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PureValue {
    /// Leave `detail_value_pure` as it is (edits of existing records).
    #[default]
    Keep,
    /// Copy the new `detail_value` into `detail_value_pure` (new records).
    Mirror,
}

/// Returns a copy of `item` with every derived field refreshed.
#[must_use]
pub fn recompute(item: &BudgetLineItem) -> BudgetLineItem {
    recompute_with(item, PureValue::Keep)
}

/// Like [`recompute`], choosing how the pre-revision value is handled.
#[must_use]
pub fn recompute_with(item: &BudgetLineItem, pure: PureValue) -> BudgetLineItem {
    let mut out = item.clone();
    refresh(&mut out, pure);
    out
}

/// Refreshes derived fields in place.
pub fn refresh(item: &mut BudgetLineItem, pure: PureValue) {
    item.detail_value = detail_value(item.volume, item.unit_price);
    if pure == PureValue::Mirror {
        item.detail_value_pure = item.detail_value;
    }
    refresh_schedule(&mut item.planned);
    refresh_schedule(&mut item.actual);
}

/// Volume times unit price, saturating at the decimal range.
#[must_use]
pub fn detail_value(volume: Decimal, unit_price: Decimal) -> Decimal {
    volume.saturating_mul(unit_price)
}

fn refresh_schedule(schedule: &mut Schedule) {
    for q in 1..=QUARTERS {
        schedule.quarters[q - 1] = schedule.months_in_quarter(q);
    }
    schedule.total = schedule.sum_of_quarters();
}
