//! Record ordering by any schema field.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::budget::{BudgetLineItem, Field, FieldValue};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// Sort by one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to compare.
    pub field: Field,
    /// Direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending by `field`.
    #[must_use]
    pub const fn ascending(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Descending by `field`.
    #[must_use]
    pub const fn descending(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Compares two records by the configured field.
    ///
    /// Numbers compare numerically; text compares case-insensitively.
    #[must_use]
    pub fn compare(&self, a: &BudgetLineItem, b: &BudgetLineItem) -> Ordering {
        let ordering = compare_values(a.get(self.field), b.get(self.field));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(&b),
        (FieldValue::Text(a), FieldValue::Text(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
        (a, b) => a.as_decimal().cmp(&b.as_decimal()),
    }
}
