//! Worksheet queries: filtering, sorting, and pagination.

pub mod filter;
pub mod sort;

use rkas_shared::types::{PageRequest, PageResponse};
use serde::{Deserialize, Serialize};

use crate::budget::BudgetLineItem;

pub use filter::RecordFilter;
pub use sort::{SortDirection, SortSpec};

/// A complete listing request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    /// Which records to keep.
    #[serde(default)]
    pub filter: RecordFilter,
    /// Ordering; insertion order when absent.
    #[serde(default)]
    pub sort: Option<SortSpec>,
    /// Which page to return.
    #[serde(default)]
    pub page: PageRequest,
}

impl RecordQuery {
    /// Creates a query returning the first page of everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the page.
    #[must_use]
    pub const fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Filters and sorts without paginating.
    #[must_use]
    pub fn select<'a>(&self, records: &'a [BudgetLineItem]) -> Vec<&'a BudgetLineItem> {
        let mut selected: Vec<&BudgetLineItem> =
            records.iter().filter(|item| self.filter.matches(item)).collect();
        if let Some(sort) = &self.sort {
            // Stable, so equal keys keep insertion order.
            selected.sort_by(|a, b| sort.compare(a, b));
        }
        selected
    }

    /// Filters, sorts, and returns the requested page.
    #[must_use]
    pub fn run(&self, records: &[BudgetLineItem]) -> PageResponse<BudgetLineItem> {
        let selected: Vec<BudgetLineItem> = self.select(records).into_iter().cloned().collect();
        self.page.paginate(&selected)
    }
}
