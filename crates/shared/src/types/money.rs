//! Rupiah amounts with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` everywhere; this module only handles
//! the Indonesian text representation (`.` thousands, `,` decimals).

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A Rupiah amount, displayed as `Rp 1.234.567,50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rupiah(pub Decimal);

impl Rupiah {
    /// Zero rupiah.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps an amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the inner amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Rupiah {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rp {}", format_id_number(self.0))
    }
}

/// Formats an amount with Indonesian separators, at most two decimals.
///
/// `1234567.5` becomes `1.234.567,50`; whole amounts carry no decimal part.
#[must_use]
pub fn format_id_number(amount: Decimal) -> String {
    let mut out = group_id_number(amount.round_dp(2));
    if out.split_once(',').is_some_and(|(_, fraction)| fraction.len() == 1) {
        out.push('0');
    }
    out
}

/// Formats an amount with Indonesian separators, keeping every decimal.
///
/// `0.125` becomes `0,125`, so [`parse_id_number`] reads back the same value.
#[must_use]
pub fn format_id_decimal(amount: Decimal) -> String {
    group_id_number(amount)
}

fn group_id_number(amount: Decimal) -> String {
    let value = amount.normalize();
    let negative = value.is_sign_negative() && !value.is_zero();
    let text = value.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + whole.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Parses a number written in Indonesian format.
///
/// Accepts an optional `Rp` prefix, `.` as thousands separator, and `,` as
/// decimal separator. Returns `None` for empty or malformed input.
#[must_use]
pub fn parse_id_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("Rp.")
        .or_else(|| trimmed.strip_prefix("Rp"))
        .or_else(|| trimmed.strip_prefix("rp"))
        .unwrap_or(trimmed);

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parses a plain number as typed into a form field (`1234.5`).
///
/// Returns `None` for empty or non-numeric input.
#[must_use]
pub fn parse_plain_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_id_number(dec!(1062656)), "1.062.656");
        assert_eq!(format_id_number(dec!(999)), "999");
        assert_eq!(format_id_number(dec!(1000)), "1.000");
        assert_eq!(format_id_number(Decimal::ZERO), "0");
    }

    #[test]
    fn test_format_fractional_amount() {
        assert_eq!(format_id_number(dec!(1234567.5)), "1.234.567,50");
        assert_eq!(format_id_number(dec!(0.25)), "0,25");
        assert_eq!(format_id_number(dec!(10.00)), "10");
    }

    #[test]
    fn test_format_full_precision() {
        assert_eq!(format_id_decimal(dec!(0.125)), "0,125");
        assert_eq!(format_id_decimal(dec!(1234567.8912)), "1.234.567,8912");
        assert_eq!(format_id_decimal(dec!(1000.50)), "1.000,5");
        assert_eq!(parse_id_number(&format_id_decimal(dec!(0.125))), Some(dec!(0.125)));
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_id_number(dec!(-50000)), "-50.000");
    }

    #[test]
    fn test_rupiah_display() {
        assert_eq!(Rupiah::new(dec!(856980)).to_string(), "Rp 856.980");
        assert_eq!(Rupiah::ZERO.to_string(), "Rp 0");
    }

    #[test]
    fn test_parse_id_number() {
        assert_eq!(parse_id_number("1.234.567,89"), Some(dec!(1234567.89)));
        assert_eq!(parse_id_number("Rp 214.245"), Some(dec!(214245)));
        assert_eq!(parse_id_number("Rp. 1.000"), Some(dec!(1000)));
        assert_eq!(parse_id_number(" 0 "), Some(Decimal::ZERO));
        assert_eq!(parse_id_number("-2.500"), Some(dec!(-2500)));
        assert_eq!(parse_id_number(""), None);
        assert_eq!(parse_id_number("abc"), None);
    }

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_plain_number("1234.5"), Some(dec!(1234.5)));
        assert_eq!(parse_plain_number("  42 "), Some(dec!(42)));
        assert_eq!(parse_plain_number(""), None);
        assert_eq!(parse_plain_number("4 Buah"), None);
    }
}
