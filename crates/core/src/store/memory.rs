//! In-memory record store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::error::StoreError;
use super::RecordStore;
use crate::budget::BudgetLineItem;

/// Keeps records in process memory.
///
/// Can be switched offline to stand in for an unreachable remote store.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<Vec<BudgetLineItem>>,
    online: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl MemoryStore {
    /// Creates an empty, reachable store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reachable store holding `records`.
    #[must_use]
    pub fn with_records(records: Vec<BudgetLineItem>) -> Self {
        Self {
            records: RwLock::new(records),
            online: AtomicBool::new(true),
        }
    }

    /// Marks the store reachable or unreachable.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::unavailable("memory store is offline"))
        }
    }
}

impl RecordStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<Vec<BudgetLineItem>, StoreError> {
        self.ensure_online()?;
        self.records
            .read()
            .map(|records| records.clone())
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }

    fn save(&self, records: &[BudgetLineItem]) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut stored = self
            .records
            .write()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))?;
        *stored = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::fixtures::valid_item;

    #[test]
    fn test_save_replaces_contents() {
        let store = MemoryStore::with_records(vec![valid_item(), valid_item()]);
        let replacement = vec![valid_item()];

        store.save(&replacement).unwrap();
        assert_eq!(store.load().unwrap(), replacement);
    }

    #[test]
    fn test_offline_store_fails() {
        let store = MemoryStore::new();
        store.set_online(false);

        assert!(matches!(store.load(), Err(StoreError::Unavailable(_))));
        assert!(store.save(&[]).is_err());

        store.set_online(true);
        assert!(store.load().unwrap().is_empty());
    }
}
