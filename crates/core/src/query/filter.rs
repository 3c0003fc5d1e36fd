//! Record filtering.

use serde::{Deserialize, Serialize};

use crate::budget::{BudgetLineItem, Series};

/// Filter for worksheet listings. Every set criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordFilter {
    /// Case-insensitive text searched across codes, names, and specifications.
    pub search: Option<String>,
    /// Exact budget year.
    pub year: Option<i32>,
    /// Exact bidang code.
    pub bidang_code: Option<String>,
    /// Exact standard code.
    pub standard_code: Option<String>,
    /// Exact activity code.
    pub activity_code: Option<String>,
    /// Exact fund code.
    pub fund_code: Option<String>,
    /// Exact account code.
    pub account_code: Option<String>,
    /// Keep records with a planned or realized amount in this 1-based month.
    pub month: Option<u8>,
}

impl RecordFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a free-text search term.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restricts to one budget year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Restricts to one bidang code.
    #[must_use]
    pub fn with_bidang(mut self, code: impl Into<String>) -> Self {
        self.bidang_code = Some(code.into());
        self
    }

    /// Restricts to one standard code.
    #[must_use]
    pub fn with_standard(mut self, code: impl Into<String>) -> Self {
        self.standard_code = Some(code.into());
        self
    }

    /// Restricts to one activity code.
    #[must_use]
    pub fn with_activity(mut self, code: impl Into<String>) -> Self {
        self.activity_code = Some(code.into());
        self
    }

    /// Restricts to one fund code.
    #[must_use]
    pub fn with_fund(mut self, code: impl Into<String>) -> Self {
        self.fund_code = Some(code.into());
        self
    }

    /// Restricts to one account code.
    #[must_use]
    pub fn with_account(mut self, code: impl Into<String>) -> Self {
        self.account_code = Some(code.into());
        self
    }

    /// Restricts to records active in a 1-based month.
    #[must_use]
    pub const fn with_month(mut self, month: u8) -> Self {
        self.month = Some(month);
        self
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if the record passes every set criterion.
    #[must_use]
    pub fn matches(&self, item: &BudgetLineItem) -> bool {
        self.year.is_none_or(|year| item.year == year)
            && code_matches(self.bidang_code.as_deref(), &item.bidang.code)
            && code_matches(self.standard_code.as_deref(), &item.standard.code)
            && code_matches(self.activity_code.as_deref(), &item.activity.code)
            && code_matches(self.fund_code.as_deref(), &item.fund.code)
            && code_matches(self.account_code.as_deref(), &item.account.code)
            && self.month.is_none_or(|month| active_in(item, month))
            && self.search.as_deref().is_none_or(|term| search_matches(item, term))
    }
}

fn code_matches(wanted: Option<&str>, actual: &str) -> bool {
    wanted.is_none_or(|code| code.trim().is_empty() || code.trim() == actual)
}

fn active_in(item: &BudgetLineItem, month: u8) -> bool {
    let m = usize::from(month);
    [Series::Planned, Series::Actual]
        .into_iter()
        .any(|series| !item.schedule(series).month(m).is_zero())
}

fn search_matches(item: &BudgetLineItem, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [
        item.bidang.code.as_str(),
        item.bidang.name.as_str(),
        item.standard.code.as_str(),
        item.standard.name.as_str(),
        item.activity.code.as_str(),
        item.activity.name.as_str(),
        item.activity.subtitle.as_str(),
        item.fund.code.as_str(),
        item.fund.name.as_str(),
        item.account.code.as_str(),
        item.account.name.as_str(),
        item.component.code.as_str(),
        item.component.name.as_str(),
        item.brand.as_str(),
        item.spec.as_str(),
    ]
    .iter()
    .any(|text| text.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::fixtures::valid_item;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RecordFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&valid_item()));
        assert!(filter.matches(&BudgetLineItem::new()));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let item = valid_item();
        assert!(RecordFilter::new().with_search("kertas hvs").matches(&item));
        assert!(RecordFilter::new().with_search("ALAT TULIS").matches(&item));
        assert!(!RecordFilter::new().with_search("komputer").matches(&item));
    }

    #[test]
    fn test_classification_codes_must_match_exactly() {
        let item = valid_item();
        assert!(RecordFilter::new().with_bidang("02").matches(&item));
        assert!(!RecordFilter::new().with_bidang("0").matches(&item));
        assert!(RecordFilter::new().with_fund("3.02").with_year(2025).matches(&item));
        assert!(!RecordFilter::new().with_year(2024).matches(&item));
    }

    #[test]
    fn test_blank_code_criterion_is_ignored() {
        let item = valid_item();
        assert!(RecordFilter::new().with_activity("  ").matches(&item));
    }

    #[test]
    fn test_month_filter() {
        let mut item = valid_item();
        assert!(RecordFilter::new().with_month(8).matches(&item));
        assert!(!RecordFilter::new().with_month(1).matches(&item));

        item.actual.months[0] = dec!(10);
        assert!(RecordFilter::new().with_month(1).matches(&item));
    }
}
