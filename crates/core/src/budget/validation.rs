//! Cross-field validation for budget line items.
//!
//! Rules run in a fixed order (required, length, pattern, numeric range,
//! consistency) and write into one field-keyed map; a later rule replaces an
//! earlier message for the same field. An empty map means the record can be
//! submitted.

use std::collections::BTreeMap;
use std::fmt;

use rkas_shared::types::money::format_id_number;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::detail_value;
use super::schema::{Field, FieldKind, FieldValue, YEAR_RANGE};
use super::types::{BudgetLineItem, MONTHS, QUARTERS, Schedule, Series};

/// Allowed difference between a stored derived value and its recomputation.
pub const TOLERANCE: Decimal = Decimal::ONE;

/// Field-keyed validation messages (Indonesian).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    /// Creates an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns true if the field failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns true when the record is submittable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failing fields with their messages, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Merges another map into this one; entries from `other` win.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Validates a record. Never fails; returns the failing fields.
#[must_use]
pub fn validate(item: &BudgetLineItem) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_required(item, &mut errors);
    check_length(item, &mut errors);
    check_pattern(item, &mut errors);
    check_range(item, &mut errors);
    check_consistency(item, &mut errors);
    errors
}

/// Returns true when the record passes every rule.
#[must_use]
pub fn is_submittable(item: &BudgetLineItem) -> bool {
    validate(item).is_empty()
}

fn check_required(item: &BudgetLineItem, errors: &mut ValidationErrors) {
    for &field in Field::all() {
        if field.descriptor().required && item.get(field).is_blank() {
            errors.insert(field, format!("{} wajib diisi", field.label()));
        }
    }
}

fn check_length(item: &BudgetLineItem, errors: &mut ValidationErrors) {
    for &field in Field::all() {
        let descriptor = field.descriptor();
        let FieldValue::Text(value) = item.get(field) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        let count = value.chars().count();
        let label = field.label();
        let message = match (descriptor.min_len, descriptor.max_len) {
            (Some(min), Some(max)) if count < min || count > max => {
                format!("{label} harus antara {min} dan {max} karakter")
            }
            (None, Some(max)) if count > max => format!("{label} maksimal {max} karakter"),
            (Some(min), None) if count < min => format!("{label} minimal {min} karakter"),
            _ => continue,
        };
        errors.insert(field, message);
    }
}

fn check_pattern(item: &BudgetLineItem, errors: &mut ValidationErrors) {
    for &field in Field::all() {
        let FieldValue::Text(value) = item.get(field) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match field.descriptor().kind {
            FieldKind::Code if !is_code(value) => errors.insert(
                field,
                format!(
                    "{} hanya boleh berisi angka, titik, dan huruf kapital",
                    field.label()
                ),
            ),
            FieldKind::Percent if !is_percent_token(value) => errors.insert(
                field,
                format!("{} harus berupa persentase, contoh 11%", field.label()),
            ),
            _ => {}
        }
    }
}

/// Digits, dots, and uppercase ASCII letters.
fn is_code(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase() || c == '.')
}

/// `11%`, `0%`, `2,5%`; the percent sign is optional.
fn is_percent_token(value: &str) -> bool {
    let number = value.strip_suffix('%').unwrap_or(value).trim_end();
    let (whole, fraction) = match number.split_once(',') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (number, None),
    };
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    digits(whole) && whole.len() <= 3 && fraction.is_none_or(digits)
}

fn check_range(item: &BudgetLineItem, errors: &mut ValidationErrors) {
    if !YEAR_RANGE.contains(&item.year) {
        errors.insert(
            Field::Year,
            format!(
                "{} harus antara {} dan {}",
                Field::Year.label(),
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ),
        );
    }

    for &field in Field::all() {
        let descriptor = field.descriptor();
        if !matches!(descriptor.kind, FieldKind::Amount | FieldKind::Quantity) {
            continue;
        }
        let value = item.get(field).as_decimal();
        if value.is_sign_negative() && !value.is_zero() {
            errors.insert(field, format!("{} tidak boleh negatif", field.label()));
        } else if let Some(max) = descriptor.max_value().filter(|max| value > *max) {
            errors.insert(
                field,
                format!(
                    "{} tidak boleh melebihi {}",
                    field.label(),
                    format_id_number(max)
                ),
            );
        }
    }
}

fn differs(stored: Decimal, expected: Decimal) -> bool {
    stored.saturating_sub(expected).abs() > TOLERANCE
}

fn check_consistency(item: &BudgetLineItem, errors: &mut ValidationErrors) {
    let expected_detail = detail_value(item.volume, item.unit_price);
    if differs(item.detail_value, expected_detail) {
        errors.insert(
            Field::DetailValue,
            format!(
                "{} harus sama dengan {} × {} ({})",
                Field::DetailValue.label(),
                Field::Volume.label(),
                Field::UnitPrice.label(),
                format_id_number(expected_detail)
            ),
        );
    }

    check_schedule_sums(Series::Planned, &item.planned, errors);
    check_schedule_sums(Series::Actual, &item.actual, errors);

    for q in 1..=QUARTERS {
        let field = Field::Quarter(Series::Actual, q as u8);
        if !errors.contains(field) && item.actual.quarter(q) > item.planned.quarter(q) {
            errors.insert(field, exceeds_message(field, item.planned.quarter(q)));
        }
    }

    let total = Field::Total(Series::Actual);
    if !errors.contains(total) && item.actual.total > item.planned.total {
        errors.insert(total, exceeds_message(total, item.planned.total));
    }

    for m in 1..=MONTHS {
        let field = Field::Month(Series::Actual, m as u8);
        if item.actual.month(m) > item.planned.month(m) {
            errors.insert(field, exceeds_message(field, item.planned.month(m)));
        }
    }
}

fn check_schedule_sums(series: Series, schedule: &Schedule, errors: &mut ValidationErrors) {
    for q in 1..=QUARTERS {
        let expected = schedule.months_in_quarter(q);
        if differs(schedule.quarter(q), expected) {
            let field = Field::Quarter(series, q as u8);
            let [first, _, last] = super::types::quarter_months(q);
            errors.insert(
                field,
                format!(
                    "{} harus sama dengan jumlah {} {first}-{last} ({})",
                    field.label(),
                    month_label(series),
                    format_id_number(expected)
                ),
            );
        }
    }

    let expected = schedule.sum_of_quarters();
    if differs(schedule.total, expected) {
        let field = Field::Total(series);
        errors.insert(
            field,
            format!(
                "{} harus sama dengan jumlah {} 1-4 ({})",
                field.label(),
                quarter_label(series),
                format_id_number(expected)
            ),
        );
    }
}

fn month_label(series: Series) -> &'static str {
    match series {
        Series::Planned => "AKB Bulan",
        Series::Actual => "Realisasi Bulan",
    }
}

fn quarter_label(series: Series) -> &'static str {
    match series {
        Series::Planned => "AKB TW",
        Series::Actual => "Realisasi TW",
    }
}

/// `Realisasi Bulan 1 tidak boleh melebihi AKB Bulan 1 (100.000)`.
fn exceeds_message(actual_field: Field, planned: Decimal) -> String {
    let planned_field = match actual_field {
        Field::Month(_, m) => Field::Month(Series::Planned, m),
        Field::Quarter(_, q) => Field::Quarter(Series::Planned, q),
        _ => Field::Total(Series::Planned),
    };
    format!(
        "{} tidak boleh melebihi {} ({})",
        actual_field.label(),
        planned_field.label(),
        format_id_number(planned)
    )
}
