//! Budget line item data types.

use chrono::{DateTime, Datelike, Utc};
use rkas_shared::types::RecordId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Months in a budget year.
pub const MONTHS: usize = 12;

/// Quarters (triwulan) in a budget year.
pub const QUARTERS: usize = 4;

/// A classification pair such as bidang, standar, dana, or rekening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeName {
    /// Classification code.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl CodeName {
    /// Creates a classification pair.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// The budgeted activity (kegiatan).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    /// Opaque activity identifier.
    pub id: String,
    /// Activity code.
    pub code: String,
    /// Activity name.
    pub name: String,
    /// Subtitle shown under the activity name.
    pub subtitle: String,
}

/// The budgeted good or service (komponen).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    /// Opaque component identifier.
    pub id: String,
    /// Component code.
    pub code: String,
    /// Component name.
    pub name: String,
}

/// Which amount series a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    /// Planned allocation (AKB).
    Planned,
    /// Realized spend (realisasi).
    Actual,
}

/// Twelve monthly amounts with quarterly subtotals and a grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    /// Monthly amounts, January first.
    pub months: [Decimal; MONTHS],
    /// Quarterly subtotals (TW 1-4).
    pub quarters: [Decimal; QUARTERS],
    /// Grand total.
    pub total: Decimal,
}

impl Schedule {
    /// Amount for a 1-based month; 0 outside 1..=12.
    #[must_use]
    pub fn month(&self, month: usize) -> Decimal {
        month
            .checked_sub(1)
            .and_then(|i| self.months.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Amount for a 1-based quarter; 0 outside 1..=4.
    #[must_use]
    pub fn quarter(&self, quarter: usize) -> Decimal {
        quarter
            .checked_sub(1)
            .and_then(|i| self.quarters.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of the three months making up a 1-based quarter.
    #[must_use]
    pub fn months_in_quarter(&self, quarter: usize) -> Decimal {
        quarter_months(quarter)
            .into_iter()
            .fold(Decimal::ZERO, |acc, m| acc.saturating_add(self.month(m)))
    }

    /// Sum of the four stored quarterly subtotals.
    #[must_use]
    pub fn sum_of_quarters(&self) -> Decimal {
        self.quarters
            .iter()
            .fold(Decimal::ZERO, |acc, q| acc.saturating_add(*q))
    }

    /// Sum of all twelve months.
    #[must_use]
    pub fn sum_of_months(&self) -> Decimal {
        self.months
            .iter()
            .fold(Decimal::ZERO, |acc, m| acc.saturating_add(*m))
    }
}

/// The 1-based months belonging to a 1-based quarter.
#[must_use]
pub const fn quarter_months(quarter: usize) -> [usize; 3] {
    let first = quarter.saturating_sub(1) * 3 + 1;
    [first, first + 1, first + 2]
}

/// The 1-based quarter a 1-based month falls in.
#[must_use]
pub const fn quarter_of_month(month: usize) -> usize {
    month.saturating_sub(1) / 3 + 1
}

/// One row of the Kertas Kerja Perubahan: planned vs. actual spend for one
/// component of one activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetLineItem {
    /// Record ID.
    pub id: RecordId,
    /// Budget year.
    pub year: i32,
    /// Organizational domain.
    pub bidang: CodeName,
    /// National education standard.
    pub standard: CodeName,
    /// Budgeted activity.
    pub activity: Activity,
    /// Funding source.
    pub fund: CodeName,
    /// Chart-of-accounts entry.
    pub account: CodeName,
    /// Budgeted component.
    pub component: Component,
    /// Unit of measure.
    pub unit: String,
    /// Brand, if any.
    pub brand: String,
    /// Free-text specification.
    pub spec: String,
    /// Tax rate token such as `11%`.
    pub tax_rate: String,
    /// Quantity.
    pub volume: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Descriptive coefficient label such as `4 Buah`.
    pub coefficient: String,
    /// Detail value before the revision (murni).
    pub detail_value_pure: Decimal,
    /// Detail value, volume times unit price.
    pub detail_value: Decimal,
    /// Planned allocation.
    pub planned: Schedule,
    /// Realized spend.
    pub actual: Schedule,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Default for BudgetLineItem {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            year: now.year(),
            bidang: CodeName::default(),
            standard: CodeName::default(),
            activity: Activity::default(),
            fund: CodeName::default(),
            account: CodeName::default(),
            component: Component::default(),
            unit: String::new(),
            brand: String::new(),
            spec: String::new(),
            tax_rate: String::new(),
            volume: Decimal::ZERO,
            unit_price: Decimal::ZERO,
            coefficient: String::new(),
            detail_value_pure: Decimal::ZERO,
            detail_value: Decimal::ZERO,
            planned: Schedule::default(),
            actual: Schedule::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl BudgetLineItem {
    /// Creates an empty record for the current year.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the amount series for planned or actual spend.
    #[must_use]
    pub const fn schedule(&self, series: Series) -> &Schedule {
        match series {
            Series::Planned => &self.planned,
            Series::Actual => &self.actual,
        }
    }

    /// Mutable access to one amount series.
    pub fn schedule_mut(&mut self, series: Series) -> &mut Schedule {
        match series {
            Series::Planned => &mut self.planned,
            Series::Actual => &mut self.actual,
        }
    }

    /// Realization percentage (actual / planned * 100), 0 when nothing is planned.
    #[must_use]
    pub fn realization_percent(&self) -> Decimal {
        self.actual
            .total
            .checked_div(self.planned.total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ZERO, |percent| percent.round_dp(2))
    }

    /// Planned minus realized total.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        self.planned.total.saturating_sub(self.actual.total)
    }
}

/// Variance calculation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceResult {
    /// Planned amount.
    pub planned: Decimal,
    /// Realized amount.
    pub actual: Decimal,
    /// Variance amount (planned - actual).
    pub variance: Decimal,
    /// Variance percentage.
    pub variance_percent: Decimal,
    /// Realization percentage.
    pub realization_percent: Decimal,
    /// Variance status.
    pub status: VarianceStatus,
}

/// Variance status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Spend is under plan.
    UnderBudget,
    /// Spend exceeds plan.
    OverBudget,
    /// Spend matches plan exactly.
    OnBudget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_record_defaults() {
        let item = BudgetLineItem::new();

        assert_eq!(item.year, Utc::now().year());
        assert_eq!(item.volume, Decimal::ZERO);
        assert_eq!(item.planned.total, Decimal::ZERO);
        assert!(item.activity.code.is_empty());
        assert!(item.tax_rate.is_empty());
    }

    #[test]
    fn test_quarter_months() {
        assert_eq!(quarter_months(1), [1, 2, 3]);
        assert_eq!(quarter_months(3), [7, 8, 9]);
        assert_eq!(quarter_months(4), [10, 11, 12]);
    }

    #[test]
    fn test_quarter_of_month() {
        assert_eq!(quarter_of_month(1), 1);
        assert_eq!(quarter_of_month(3), 1);
        assert_eq!(quarter_of_month(8), 3);
        assert_eq!(quarter_of_month(12), 4);
    }

    #[test]
    fn test_schedule_out_of_range_is_zero() {
        let schedule = Schedule::default();
        assert_eq!(schedule.month(0), Decimal::ZERO);
        assert_eq!(schedule.month(13), Decimal::ZERO);
        assert_eq!(schedule.quarter(5), Decimal::ZERO);
    }

    #[test]
    fn test_realization_percent() {
        let mut item = BudgetLineItem::new();
        item.planned.total = dec!(1000);
        item.actual.total = dec!(250);
        assert_eq!(item.realization_percent(), dec!(25.00));
        assert_eq!(item.remaining(), dec!(750));
    }

    #[test]
    fn test_realization_percent_zero_plan() {
        let mut item = BudgetLineItem::new();
        item.actual.total = dec!(500);
        assert_eq!(item.realization_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let item: BudgetLineItem =
            serde_json::from_str(r#"{"unit":"Rim","volume":"4"}"#).unwrap();
        assert_eq!(item.unit, "Rim");
        assert_eq!(item.volume, dec!(4));
        assert_eq!(item.unit_price, Decimal::ZERO);
    }
}
