//! Budget service: variance analysis and the submission gate.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::calculator::{PureValue, recompute_with};
use super::error::BudgetError;
use super::types::{BudgetLineItem, VarianceResult, VarianceStatus};
use super::validation::validate;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Calculate variance between planned and realized amounts.
    ///
    /// variance = planned - actual
    ///   - Positive variance means spend is still under plan
    ///   - Negative variance means spend exceeds plan
    #[must_use]
    pub fn calculate_variance(planned: Decimal, actual: Decimal) -> VarianceResult {
        let variance = planned.saturating_sub(actual);

        let status = match variance.cmp(&Decimal::ZERO) {
            Ordering::Greater => VarianceStatus::UnderBudget,
            Ordering::Less => VarianceStatus::OverBudget,
            Ordering::Equal => VarianceStatus::OnBudget,
        };

        VarianceResult {
            planned,
            actual,
            variance,
            variance_percent: percent_of(variance, planned),
            realization_percent: percent_of(actual, planned),
            status,
        }
    }

    /// Variance of a record's realized total against its planned total.
    #[must_use]
    pub fn variance(item: &BudgetLineItem) -> VarianceResult {
        Self::calculate_variance(item.planned.total, item.actual.total)
    }

    /// Recomputes derived fields and validates the result.
    ///
    /// This is the gate every write path goes through: the returned record
    /// has fresh derived fields and an empty validation map.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Invalid` with every failing field when the
    /// recomputed record does not validate.
    pub fn prepare(item: &BudgetLineItem, pure: PureValue) -> Result<BudgetLineItem, BudgetError> {
        let item = recompute_with(item, pure);
        let errors = validate(&item);
        if errors.is_empty() {
            Ok(item)
        } else {
            tracing::debug!(id = %item.id, failures = errors.len(), "record rejected");
            Err(BudgetError::Invalid(errors))
        }
    }
}

/// `part / whole * 100` rounded to two places, 0 when `whole` is 0.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |percent| percent.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::fixtures::valid_item;
    use crate::budget::schema::Field;
    use rust_decimal_macros::dec;

    #[test]
    fn test_variance_under_budget() {
        let result = BudgetService::calculate_variance(dec!(1000), dec!(800));

        assert_eq!(result.planned, dec!(1000));
        assert_eq!(result.actual, dec!(800));
        assert_eq!(result.variance, dec!(200));
        assert_eq!(result.variance_percent, dec!(20.00));
        assert_eq!(result.realization_percent, dec!(80.00));
        assert_eq!(result.status, VarianceStatus::UnderBudget);
    }

    #[test]
    fn test_variance_over_budget() {
        let result = BudgetService::calculate_variance(dec!(1000), dec!(1200));

        assert_eq!(result.variance, dec!(-200));
        assert_eq!(result.variance_percent, dec!(-20.00));
        assert_eq!(result.realization_percent, dec!(120.00));
        assert_eq!(result.status, VarianceStatus::OverBudget);
    }

    #[test]
    fn test_variance_on_budget() {
        let result = BudgetService::calculate_variance(dec!(1000), dec!(1000));

        assert_eq!(result.variance, dec!(0));
        assert_eq!(result.status, VarianceStatus::OnBudget);
    }

    #[test]
    fn test_zero_plan_realization() {
        let result = BudgetService::calculate_variance(dec!(0), dec!(500));

        assert_eq!(result.realization_percent, dec!(0));
        assert_eq!(result.variance_percent, dec!(0));
        assert_eq!(result.status, VarianceStatus::OverBudget);
    }

    #[test]
    fn test_prepare_refreshes_stale_totals() {
        let mut item = valid_item();
        item.planned.total = dec!(1);
        item.detail_value = dec!(1);

        let prepared = BudgetService::prepare(&item, PureValue::Keep).unwrap();
        assert_eq!(prepared.planned.total, dec!(1000));
        assert_eq!(prepared.detail_value, dec!(1000));
    }

    #[test]
    fn test_prepare_rejects_over_realization() {
        let mut item = valid_item();
        item.actual.months[7] = dec!(1500);

        let Err(BudgetError::Invalid(errors)) = BudgetService::prepare(&item, PureValue::Keep)
        else {
            panic!("expected validation failure");
        };
        assert!(errors.contains(Field::actual_month(8)));
        assert!(errors.contains(Field::actual_quarter(3)));
        assert!(errors.contains(Field::Total(crate::budget::types::Series::Actual)));
    }
}
