//! Worksheet operations.
//!
//! Every mutation passes through the calculator and validator exactly once,
//! is saved to the store, and only then replaces the in-memory set. A failed
//! save leaves the worksheet as it was. The store is never read back during a
//! session.

use chrono::Utc;
use rkas_shared::types::{PageResponse, RecordId};

use super::error::WorksheetError;
use crate::budget::{BudgetLineItem, BudgetService, Draft, Field, PureValue};
use crate::dashboard::{Dashboard, DashboardService};
use crate::query::RecordQuery;
use crate::store::RecordStore;

/// How imported records combine with the existing set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// Discard existing records.
    #[default]
    Replace,
    /// Keep existing records and add the imported ones after them.
    Append,
}

/// In-memory record set mirrored to a [`RecordStore`].
#[derive(Debug)]
pub struct Worksheet<S> {
    records: Vec<BudgetLineItem>,
    store: S,
}

impl<S: RecordStore> Worksheet<S> {
    /// Loads the record set from `store`.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::Store` if the store cannot be read.
    pub fn open(store: S) -> Result<Self, WorksheetError> {
        let records = store.load()?;
        tracing::info!(store = store.name(), count = records.len(), "worksheet opened");
        Ok(Self { records, store })
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[BudgetLineItem] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the worksheet holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Looks a record up by id.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&BudgetLineItem> {
        self.records.iter().find(|item| item.id == id)
    }

    /// Filters, sorts, and paginates the record set.
    #[must_use]
    pub fn query(&self, query: &RecordQuery) -> PageResponse<BudgetLineItem> {
        query.run(&self.records)
    }

    /// Aggregates the record set for the dashboard.
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        DashboardService::build(&self.records)
    }

    /// Adds a record from a form draft.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::Invalid` when the draft does not validate, or
    /// `WorksheetError::Store` if the change cannot be saved.
    pub fn add(&mut self, draft: &Draft) -> Result<&BudgetLineItem, WorksheetError> {
        let outcome = draft.evaluate_new();
        if !outcome.is_submittable() {
            return Err(WorksheetError::Invalid(outcome.errors));
        }
        self.push(outcome.item)
    }

    /// Adds a fully populated record, keeping its id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::Invalid` when the record does not validate, or
    /// `WorksheetError::Store` if the change cannot be saved.
    pub fn add_item(&mut self, item: &BudgetLineItem) -> Result<&BudgetLineItem, WorksheetError> {
        let item = BudgetService::prepare(item, PureValue::Mirror)?;
        self.push(item)
    }

    fn push(&mut self, item: BudgetLineItem) -> Result<&BudgetLineItem, WorksheetError> {
        let mut next = self.records.clone();
        let (id, activity) = (item.id, item.activity.code.clone());
        next.push(item);
        self.commit(next)?;
        tracing::info!(%id, %activity, "record added");
        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// Replaces a record's inputs with a form draft.
    ///
    /// The id, creation time, and pre-revision detail value are kept.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::NotFound` for an unknown id,
    /// `WorksheetError::Invalid` when the draft does not validate, or
    /// `WorksheetError::Store` if the change cannot be saved.
    pub fn update(&mut self, id: RecordId, draft: &Draft) -> Result<&BudgetLineItem, WorksheetError> {
        let index = self.position(id)?;
        let outcome = draft.evaluate(&self.records[index], PureValue::Keep);
        if !outcome.is_submittable() {
            return Err(WorksheetError::Invalid(outcome.errors));
        }
        self.replace_at(index, outcome.item)
    }

    /// Applies strict field edits such as `unitPrice=1500` to one record.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::NotFound` for an unknown id,
    /// `WorksheetError::Budget` for non-numeric input to a numeric field,
    /// `WorksheetError::Invalid` when the result does not validate, or
    /// `WorksheetError::Store` if the change cannot be saved.
    pub fn edit_fields<'a>(
        &mut self,
        id: RecordId,
        changes: impl IntoIterator<Item = (Field, &'a str)>,
    ) -> Result<&BudgetLineItem, WorksheetError> {
        let index = self.position(id)?;
        let mut item = self.records[index].clone();
        for (field, raw) in changes {
            item.set(field, raw)?;
        }
        let item = BudgetService::prepare(&item, PureValue::Keep)?;
        self.replace_at(index, item)
    }

    fn replace_at(
        &mut self,
        index: usize,
        mut item: BudgetLineItem,
    ) -> Result<&BudgetLineItem, WorksheetError> {
        let current = &self.records[index];
        item.id = current.id;
        item.created_at = current.created_at;
        item.updated_at = Utc::now();

        let id = item.id;
        let mut next = self.records.clone();
        next[index] = item;
        self.commit(next)?;
        tracing::info!(%id, "record updated");
        Ok(&self.records[index])
    }

    /// Deletes one record.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::NotFound` for an unknown id, or
    /// `WorksheetError::Store` if the change cannot be saved.
    pub fn delete(&mut self, id: RecordId) -> Result<BudgetLineItem, WorksheetError> {
        let index = self.position(id)?;
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        tracing::info!(%id, "record deleted");
        Ok(removed)
    }

    /// Deletes every record whose id is listed; unknown ids are skipped.
    /// Returns how many records were removed.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::Store` if the change cannot be saved.
    pub fn delete_many(&mut self, ids: &[RecordId]) -> Result<usize, WorksheetError> {
        let next: Vec<_> = self
            .records
            .iter()
            .filter(|item| !ids.contains(&item.id))
            .cloned()
            .collect();
        let removed = self.records.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
            tracing::info!(count = removed, "records deleted");
        }
        Ok(removed)
    }

    /// Brings in a batch of records, for example from a legacy import.
    ///
    /// The batch is all-or-nothing: if any record fails validation nothing
    /// changes. Returns how many records were added.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::Invalid` for the first failing record, or
    /// `WorksheetError::Store` if the change cannot be saved.
    pub fn import(
        &mut self,
        items: Vec<BudgetLineItem>,
        mode: ImportMode,
    ) -> Result<usize, WorksheetError> {
        let prepared = items
            .iter()
            .map(|item| BudgetService::prepare(item, PureValue::Keep))
            .collect::<Result<Vec<_>, _>>()?;
        let count = prepared.len();

        let next = match mode {
            ImportMode::Replace => prepared,
            ImportMode::Append => {
                let mut next = self.records.clone();
                next.extend(prepared);
                next
            }
        };
        self.commit(next)?;
        tracing::info!(count, ?mode, total = self.records.len(), "records imported");
        Ok(count)
    }

    /// Removes every record.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::Store` if the change cannot be saved.
    pub fn clear(&mut self) -> Result<(), WorksheetError> {
        self.commit(Vec::new())?;
        tracing::info!("worksheet cleared");
        Ok(())
    }

    fn position(&self, id: RecordId) -> Result<usize, WorksheetError> {
        self.records
            .iter()
            .position(|item| item.id == id)
            .ok_or(WorksheetError::NotFound(id))
    }

    /// Saves `next`, then makes it the current record set.
    fn commit(&mut self, next: Vec<BudgetLineItem>) -> Result<(), WorksheetError> {
        self.store.save(&next).map_err(|err| {
            tracing::warn!(store = self.store.name(), error = %err, "failed to save records");
            WorksheetError::Store(err)
        })?;
        self.records = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::fixtures::valid_item;
    use crate::budget::Series;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn worksheet() -> Worksheet<MemoryStore> {
        Worksheet::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_add_from_draft_mirrors_pure_value() {
        let mut sheet = worksheet();
        let draft = Draft::from_item(&valid_item()).with(Field::Volume, "2");

        let added = sheet.add(&draft).unwrap().clone();
        assert_eq!(added.detail_value, dec!(2000));
        assert_eq!(added.detail_value_pure, dec!(2000));
        assert_eq!(sheet.store().load().unwrap(), vec![added]);
    }

    #[test]
    fn test_add_rejects_invalid_draft() {
        let mut sheet = worksheet();
        let draft = Draft::from_item(&valid_item()).with(Field::ActivityCode, "");

        let err = sheet.add(&draft).unwrap_err();
        let WorksheetError::Invalid(errors) = err else {
            panic!("expected validation failure");
        };
        assert!(errors.contains(Field::ActivityCode));
        assert!(sheet.is_empty());
        assert!(sheet.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut sheet = worksheet();
        let original = sheet.add_item(&valid_item()).unwrap().clone();

        let draft = Draft::from_item(&original).with(Field::UnitPrice, "1500");
        let updated = sheet.update(original.id, &draft).unwrap().clone();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(updated.detail_value, dec!(1500));
        assert_eq!(updated.detail_value_pure, dec!(1000));
    }

    #[test]
    fn test_edit_fields_is_strict() {
        let mut sheet = worksheet();
        let id = sheet.add_item(&valid_item()).unwrap().id;

        let err = sheet.edit_fields(id, [(Field::UnitPrice, "mahal")]).unwrap_err();
        assert!(matches!(err, WorksheetError::Budget(_)));

        let edited = sheet
            .edit_fields(id, [(Field::planned_month(8), "2000"), (Field::ComponentName, "Map")])
            .unwrap();
        assert_eq!(edited.planned.total, dec!(2000));
        assert_eq!(edited.component.name, "Map");
    }

    #[test]
    fn test_edit_rejects_over_realization() {
        let mut sheet = worksheet();
        let id = sheet.add_item(&valid_item()).unwrap().id;

        let err = sheet.edit_fields(id, [(Field::actual_month(8), "1500")]).unwrap_err();
        assert!(matches!(err, WorksheetError::Invalid(ref e) if e.contains(Field::actual_month(8))));
        assert_eq!(sheet.get(id).unwrap().actual.total, dec!(1000));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut sheet = worksheet();
        let id = RecordId::new();

        assert!(matches!(sheet.delete(id), Err(WorksheetError::NotFound(_))));
        assert!(matches!(sheet.update(id, &Draft::new()), Err(WorksheetError::NotFound(_))));
    }

    #[test]
    fn test_delete_many() {
        let mut sheet = worksheet();
        let a = sheet.add_item(&valid_item()).unwrap().id;
        let b = sheet.add_item(&valid_item()).unwrap().id;
        let c = sheet.add_item(&valid_item()).unwrap().id;

        assert_eq!(sheet.delete_many(&[a, c, RecordId::new()]).unwrap(), 2);
        let remaining: Vec<_> = sheet.records().iter().map(|item| item.id).collect();
        assert_eq!(remaining, vec![b]);
        assert_eq!(sheet.store().load().unwrap().len(), 1);
    }

    #[test]
    fn test_import_replace_and_append() {
        let mut sheet = worksheet();
        sheet.add_item(&valid_item()).unwrap();

        sheet.import(vec![valid_item(), valid_item()], ImportMode::Replace).unwrap();
        assert_eq!(sheet.len(), 2);

        sheet.import(vec![valid_item()], ImportMode::Append).unwrap();
        assert_eq!(sheet.len(), 3);
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut sheet = worksheet();
        sheet.add_item(&valid_item()).unwrap();
        let mut bad = valid_item();
        bad.actual.months[7] = dec!(5000);

        let err = sheet.import(vec![valid_item(), bad], ImportMode::Replace).unwrap_err();
        assert!(matches!(err, WorksheetError::Invalid(_)));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_store_failure_surfaces() {
        let mut sheet = worksheet();
        sheet.store().set_online(false);

        let err = sheet.add_item(&valid_item()).unwrap_err();
        assert!(matches!(err, WorksheetError::Store(_)));
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_failed_save_leaves_records_unchanged() {
        let mut sheet = worksheet();
        let kept = sheet.add_item(&valid_item()).unwrap().clone();
        sheet.store().set_online(false);

        assert!(sheet.add_item(&valid_item()).is_err());
        assert!(sheet.edit_fields(kept.id, [(Field::UnitPrice, "900")]).is_err());
        assert!(sheet.delete(kept.id).is_err());
        assert!(sheet.delete_many(&[kept.id]).is_err());
        assert!(sheet.import(vec![valid_item()], ImportMode::Append).is_err());
        assert!(sheet.clear().is_err());
        assert_eq!(sheet.records(), std::slice::from_ref(&kept));

        sheet.store().set_online(true);
        sheet.add_item(&valid_item()).unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.store().load().unwrap().len(), 2);
    }

    #[test]
    fn test_dashboard_reflects_records() {
        let mut sheet = worksheet();
        sheet.add_item(&valid_item()).unwrap();

        let dashboard = sheet.dashboard();
        assert_eq!(dashboard.summary.total_planned, dec!(1000));
        assert_eq!(dashboard.by_quarter[2].actual, dec!(1000));
        assert_eq!(
            sheet.records()[0].schedule(Series::Actual).total,
            dashboard.summary.total_actual
        );
    }
}
