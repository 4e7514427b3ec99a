//! Repository seams the engines are injected with. The core owns no ambient
//! state; everything it reads or mutates goes through these traits.

pub mod memory;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Account, Category, Counterparty, EntrySource, LedgerEntry, Obligation};

pub use memory::{MemoryDirectory, MemoryLedgerStore, MemoryObligationStore};

/// Failure reported by a backing store. The core never retries these; they
/// surface to the caller wrapped with the phase that was running.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Partial update of an obligation's settlement fields. The synchronizer
/// touches nothing else; edit forms go through full updates upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObligationPatch {
    pub settled: Option<bool>,
    /// `Some(None)` clears the settlement timestamp.
    pub settled_date: Option<Option<DateTime<Utc>>>,
}

impl ObligationPatch {
    /// Marks the obligation settled at `at`.
    pub fn settle(at: DateTime<Utc>) -> Self {
        Self {
            settled: Some(true),
            settled_date: Some(Some(at)),
        }
    }

    /// Clears the settlement flag and timestamp together.
    pub fn unsettle() -> Self {
        Self {
            settled: Some(false),
            settled_date: Some(None),
        }
    }

    pub fn apply(&self, obligation: &mut Obligation) {
        if let Some(settled) = self.settled {
            obligation.settled = settled;
        }
        if let Some(settled_date) = self.settled_date {
            obligation.settled_date = settled_date;
        }
    }
}

/// CRUD over payable/receivable obligation records.
pub trait ObligationStore {
    fn get(&self, id: Uuid) -> StoreResult<Option<Obligation>>;
    fn list(&self) -> StoreResult<Vec<Obligation>>;
    fn create(&mut self, obligation: Obligation) -> StoreResult<Uuid>;
    /// Applies the patch and returns the updated record, or `None` when the
    /// obligation does not exist.
    fn update(&mut self, id: Uuid, patch: ObligationPatch) -> StoreResult<Option<Obligation>>;
    /// Returns whether a record was actually removed.
    fn delete(&mut self, id: Uuid) -> StoreResult<bool>;
}

/// CRUD over ledger entries. Source lookup runs over `list()`; no dedicated
/// index is assumed of the backend.
pub trait LedgerStore {
    fn list(&self) -> StoreResult<Vec<LedgerEntry>>;
    fn create(&mut self, entry: LedgerEntry) -> StoreResult<Uuid>;
    fn delete(&mut self, id: Uuid) -> StoreResult<bool>;

    /// All entries back-referencing `source`. More than one is a consistency
    /// violation the callers report.
    fn find_by_source(&self, source: EntrySource) -> StoreResult<Vec<LedgerEntry>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|entry| entry.source == source)
            .collect())
    }
}

/// Read-only resolution of directory records: account names for the
/// settlement prompt, counterparty/category names for rendered list cells.
pub trait Directory {
    fn account(&self, id: Uuid) -> Option<&Account>;
    fn counterparty(&self, id: Uuid) -> Option<&Counterparty>;
    fn category(&self, id: Uuid) -> Option<&Category>;

    /// Accounts offered when settlement needs one selected.
    fn accounts(&self) -> Vec<&Account>;

    fn counterparty_name(&self, id: Uuid) -> String {
        self.counterparty(id)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }

    fn category_name(&self, id: Uuid) -> String {
        self.category(id).map(|c| c.name.clone()).unwrap_or_default()
    }
}
