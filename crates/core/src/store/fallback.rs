//! Primary store with a local cache fallback.

use super::error::StoreError;
use super::RecordStore;
use crate::budget::BudgetLineItem;

/// Reads from the primary store when it is reachable and keeps the local
/// cache in step; writes always land in the local cache first.
///
/// Failures of the primary alone are logged and never surface. Failures of
/// the local cache do.
#[derive(Debug)]
pub struct FallbackStore<P, L> {
    primary: P,
    local: L,
}

impl<P: RecordStore, L: RecordStore> FallbackStore<P, L> {
    /// Combines a primary store with a local cache.
    pub const fn new(primary: P, local: L) -> Self {
        Self { primary, local }
    }

    /// The primary store.
    pub const fn primary(&self) -> &P {
        &self.primary
    }

    /// The local cache.
    pub const fn local(&self) -> &L {
        &self.local
    }
}

impl<P: RecordStore, L: RecordStore> RecordStore for FallbackStore<P, L> {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn load(&self) -> Result<Vec<BudgetLineItem>, StoreError> {
        match self.primary.load() {
            Ok(records) => {
                if let Err(err) = self.local.save(&records) {
                    tracing::warn!(store = self.local.name(), error = %err, "failed to refresh local cache");
                }
                Ok(records)
            }
            Err(err) => {
                tracing::warn!(
                    store = self.primary.name(),
                    error = %err,
                    "primary store unreachable, serving local cache"
                );
                self.local.load()
            }
        }
    }

    fn save(&self, records: &[BudgetLineItem]) -> Result<(), StoreError> {
        self.local.save(records)?;
        if let Err(err) = self.primary.save(records) {
            tracing::warn!(
                store = self.primary.name(),
                error = %err,
                "primary store unreachable, changes kept in local cache"
            );
        }
        Ok(())
    }
}
