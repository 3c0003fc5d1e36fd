//! Record persistence.
//!
//! The worksheet never touches storage directly; it is handed a
//! [`RecordStore`] and mirrors its record set into it after every mutation.
//!
//! - [`JsonFileStore`]: the local persistent cache (`records.json`)
//! - [`MemoryStore`]: process-local store, also used as a stand-in remote
//! - [`FallbackStore`]: prefers a primary store, degrades to the local cache

mod columns;
mod error;
mod fallback;
mod file;
mod memory;

pub use columns::ColumnSettings;
pub use error::StoreError;
pub use fallback::FallbackStore;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::budget::BudgetLineItem;

/// A place the worksheet's record set is loaded from and saved to.
///
/// `save` replaces the whole stored set; stores hold no partial state.
pub trait RecordStore: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Loads every stored record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    fn load(&self) -> Result<Vec<BudgetLineItem>, StoreError>;

    /// Replaces the stored record set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    fn save(&self, records: &[BudgetLineItem]) -> Result<(), StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn load(&self) -> Result<Vec<BudgetLineItem>, StoreError> {
        (**self).load()
    }

    fn save(&self, records: &[BudgetLineItem]) -> Result<(), StoreError> {
        (**self).save(records)
    }
}
