//! Persisted visible-column settings for tables and exports.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::file::{read_json, write_json};
use crate::budget::{Field, Series};

/// Ordered list of visible columns, stored as field keys in `columns.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSettings {
    visible: Vec<Field>,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            visible: vec![
                Field::ActivityCode,
                Field::ActivityName,
                Field::AccountCode,
                Field::AccountName,
                Field::ComponentName,
                Field::Unit,
                Field::Volume,
                Field::UnitPrice,
                Field::DetailValue,
                Field::Total(Series::Planned),
                Field::Total(Series::Actual),
            ],
        }
    }
}

impl ColumnSettings {
    /// Shows exactly `fields`, in order, dropping duplicates.
    #[must_use]
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut settings = Self { visible: Vec::new() };
        for field in fields {
            settings.show(field);
        }
        settings
    }

    /// Every schema field, in schema order.
    #[must_use]
    pub fn all() -> Self {
        Self::new(Field::all().iter().copied())
    }

    /// Loads settings from `path`, falling back to the defaults when the file
    /// does not exist or lists no columns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or decoded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let settings: Option<Self> = read_json(path.as_ref())?;
        Ok(settings.filter(|s| !s.visible.is_empty()).unwrap_or_default())
    }

    /// Saves settings to `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        write_json(path.as_ref(), self)
    }

    /// Visible columns in display order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.visible
    }

    /// Returns true if the column is shown.
    #[must_use]
    pub fn is_visible(&self, field: Field) -> bool {
        self.visible.contains(&field)
    }

    /// Appends a column if it is hidden.
    pub fn show(&mut self, field: Field) {
        if !self.is_visible(field) {
            self.visible.push(field);
        }
    }

    /// Removes a column.
    pub fn hide(&mut self, field: Field) {
        self.visible.retain(|f| *f != field);
    }

    /// Shows a hidden column or hides a visible one; returns the new state.
    pub fn toggle(&mut self, field: Field) -> bool {
        if self.is_visible(field) {
            self.hide(field);
            false
        } else {
            self.show(field);
            true
        }
    }
}
