//! Obligation deletion with ledger cleanup.

use tracing::debug;
use uuid::Uuid;

use crate::errors::{CoreError, CoreResult, SyncPhase};
use crate::store::{LedgerStore, ObligationStore};

pub struct CascadeDeleter;

impl CascadeDeleter {
    /// Deletes an obligation together with any ledger entry that
    /// back-references it. Returns whether an obligation was removed;
    /// deleting an absent obligation is a successful no-op.
    ///
    /// Linked entries go first: removing the obligation before its entry
    /// would strand a reference to a missing id. The ledger probe runs even
    /// for unsettled obligations, so an entry left behind by an interrupted
    /// unsettle is cleaned up rather than orphaned.
    ///
    /// Sibling installment/recurrence instances are never touched;
    /// `parent_id` is a lookup relation, not a deletion trigger.
    pub fn delete(
        obligations: &mut dyn ObligationStore,
        ledger: &mut dyn LedgerStore,
        id: Uuid,
    ) -> CoreResult<bool> {
        let obligation = obligations
            .get(id)
            .map_err(|e| CoreError::persistence(SyncPhase::ObligationLookup, e))?;
        let Some(obligation) = obligation else {
            return Ok(false);
        };

        let linked = ledger
            .find_by_source(obligation.source())
            .map_err(|e| CoreError::persistence(SyncPhase::LedgerLookup, e))?;
        for entry in &linked {
            ledger
                .delete(entry.id)
                .map_err(|e| CoreError::persistence(SyncPhase::LedgerDelete, e))?;
            debug!(obligation = %id, entry = %entry.id, "cascade removed linked entry");
        }

        obligations
            .delete(id)
            .map_err(|e| CoreError::persistence(SyncPhase::ObligationDelete, e))?;
        debug!(obligation = %id, "obligation deleted");
        Ok(true)
    }
}
