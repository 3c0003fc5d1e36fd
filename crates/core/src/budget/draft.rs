//! Form drafts: raw string inputs keyed by field.
//!
//! A draft is what a form holds between edits. It is coerced into a record
//! (non-numeric input counts as 0), run through the calculator, then through
//! the validator. Submission is allowed only when the resulting map is empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::calculator::{PureValue, refresh};
use super::schema::Field;
use super::types::BudgetLineItem;
use super::validation::{ValidationErrors, validate};

/// Numeric inputs that must be typed in, even though 0 is a valid amount.
const REQUIRED_NUMERIC: [Field; 2] = [Field::Volume, Field::UnitPrice];

/// Raw form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft {
    values: BTreeMap<Field, String>,
}

/// A coerced and recomputed draft together with its validation result.
#[derive(Debug, Clone)]
pub struct DraftOutcome {
    /// The record the draft describes, derived fields refreshed.
    pub item: BudgetLineItem,
    /// Failing fields; empty when the draft can be submitted.
    pub errors: ValidationErrors,
}

impl DraftOutcome {
    /// Returns true when the draft can be submitted.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Draft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills a draft from an existing record, for edit forms.
    #[must_use]
    pub fn from_item(item: &BudgetLineItem) -> Self {
        let values = Field::all()
            .iter()
            .filter(|field| !field.is_derived())
            .map(|&field| (field, item.get(field).to_string()))
            .collect();
        Self { values }
    }

    /// Sets one raw input.
    pub fn set(&mut self, field: Field, raw: impl Into<String>) -> &mut Self {
        self.values.insert(field, raw.into());
        self
    }

    /// Builder-style [`Draft::set`].
    #[must_use]
    pub fn with(mut self, field: Field, raw: impl Into<String>) -> Self {
        self.values.insert(field, raw.into());
        self
    }

    /// Raw input for a field, if any was entered.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Returns true when nothing was entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entered fields with their raw values.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, raw)| (*field, raw.as_str()))
    }

    /// Applies the raw inputs on top of `base` without recomputing.
    #[must_use]
    pub fn apply_to(&self, base: &BudgetLineItem) -> BudgetLineItem {
        let mut item = base.clone();
        for (field, raw) in self.iter() {
            item.set_lenient(field, raw);
        }
        item
    }

    /// Coerces, recomputes, and validates the draft on top of `base`.
    #[must_use]
    pub fn evaluate(&self, base: &BudgetLineItem, pure: PureValue) -> DraftOutcome {
        let mut item = self.apply_to(base);
        refresh(&mut item, pure);

        let mut errors = validate(&item);
        for field in REQUIRED_NUMERIC {
            if self.get(field).is_none_or(|raw| raw.trim().is_empty()) {
                errors.insert(field, format!("{} wajib diisi", field.label()));
            }
        }

        DraftOutcome { item, errors }
    }

    /// Evaluates the draft as a brand-new record.
    #[must_use]
    pub fn evaluate_new(&self) -> DraftOutcome {
        self.evaluate(&BudgetLineItem::new(), PureValue::Mirror)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::fixtures::valid_item;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn filled_draft() -> Draft {
        Draft::from_item(&valid_item())
    }

    #[test]
    fn test_from_item_skips_derived_fields() {
        let draft = filled_draft();
        assert_eq!(draft.get(Field::ActivityCode), Some("05.02.01"));
        assert_eq!(draft.get(Field::planned_month(8)), Some("1000"));
        assert_eq!(draft.get(Field::planned_quarter(3)), None);
        assert_eq!(draft.get(Field::DetailValue), None);
    }

    #[test]
    fn test_filled_draft_is_submittable() {
        let outcome = filled_draft().evaluate_new();
        assert!(outcome.is_submittable(), "errors: {}", outcome.errors);
        assert_eq!(outcome.item.detail_value, dec!(1000));
        assert_eq!(outcome.item.detail_value_pure, dec!(1000));
    }

    #[test]
    fn test_each_edit_refreshes_totals() {
        let mut draft = filled_draft();
        draft.set(Field::planned_month(9), "500");
        draft.set(Field::Volume, "3");
        draft.set(Field::UnitPrice, "500");

        let outcome = draft.evaluate_new();
        assert_eq!(outcome.item.planned.quarters[2], dec!(1500));
        assert_eq!(outcome.item.planned.total, dec!(1500));
        assert_eq!(outcome.item.detail_value, dec!(1500));
        assert!(outcome.is_submittable());
    }

    #[test]
    fn test_non_numeric_input_counts_as_zero() {
        let draft = filled_draft().with(Field::planned_month(8), "seribu");

        let outcome = draft.evaluate_new();
        assert_eq!(outcome.item.planned.months[7], Decimal::ZERO);
        assert_eq!(outcome.item.planned.total, Decimal::ZERO);
        // The realized August spend now exceeds the (zero) plan.
        assert!(outcome.errors.contains(Field::actual_month(8)));
        assert!(!outcome.errors.contains(Field::planned_month(8)));
    }

    #[test]
    fn test_empty_numeric_input_is_required_violation() {
        let draft = filled_draft().with(Field::Volume, " ");

        let outcome = draft.evaluate_new();
        assert_eq!(outcome.errors.get(Field::Volume), Some("Volume wajib diisi"));
    }

    #[test]
    fn test_empty_draft_reports_required_fields() {
        let outcome = Draft::new().evaluate_new();

        assert!(outcome.errors.contains(Field::ActivityCode));
        assert!(outcome.errors.contains(Field::BidangName));
        assert!(outcome.errors.contains(Field::UnitPrice));
        assert!(!outcome.errors.contains(Field::Brand));
    }

    #[test]
    fn test_edit_keeps_pure_value() {
        let mut base = valid_item();
        base.detail_value_pure = dec!(800);
        let draft = Draft::from_item(&base).with(Field::UnitPrice, "1200");

        let outcome = draft.evaluate(&base, PureValue::Keep);
        assert_eq!(outcome.item.detail_value, dec!(1200));
        assert_eq!(outcome.item.detail_value_pure, dec!(800));
    }

    #[test]
    fn test_draft_deserializes_from_field_keys() {
        let draft: Draft =
            serde_json::from_str(r#"{"activityCode":"05.02.01","plannedMonth1":"250"}"#).unwrap();
        assert_eq!(draft.get(Field::planned_month(1)), Some("250"));
    }
}
