//! Settlement synchronization between obligations and the cash ledger.
//!
//! The two stores are independent and share no transaction. Every operation
//! here touches the obligation store before the ledger store so that a crash
//! between the two calls leaves a state the next retry detects and repairs:
//! settle re-runs its idempotency probe, unsettle finds no entry and no-ops.

use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::{LedgerEntry, Obligation};
use crate::errors::{CoreError, CoreResult, SyncPhase};
use crate::store::{LedgerStore, ObligationPatch, ObligationStore};

/// Orchestrates settle/unsettle transitions. Symmetric for payables and
/// receivables; the obligation's own kind decides the entry kind and source
/// tag.
pub struct SettlementSynchronizer;

impl SettlementSynchronizer {
    /// Marks an obligation settled and guarantees exactly one linked ledger
    /// entry exists afterwards.
    ///
    /// `account_override` resolves the funding account when the obligation
    /// carries none; with neither present the operation signals
    /// [`CoreError::AccountRequired`] and persists nothing.
    pub fn settle(
        obligations: &mut dyn ObligationStore,
        ledger: &mut dyn LedgerStore,
        clock: &dyn Clock,
        id: Uuid,
        account_override: Option<Uuid>,
    ) -> CoreResult<Obligation> {
        let obligation = obligations
            .get(id)
            .map_err(|e| CoreError::persistence(SyncPhase::ObligationLookup, e))?
            .ok_or(CoreError::NotFound {
                entity: "obligation",
                id,
            })?;

        let account_id = account_override
            .or(obligation.account_id)
            .ok_or(CoreError::AccountRequired(id))?;

        let source = obligation.source();
        let linked = ledger
            .find_by_source(source)
            .map_err(|e| CoreError::persistence(SyncPhase::LedgerLookup, e))?;
        if linked.len() > 1 {
            return Err(CoreError::DuplicateLedgerEntry {
                entry_source: source,
                count: linked.len(),
            });
        }

        let now = clock.now();
        let updated = obligations
            .update(id, ObligationPatch::settle(now))
            .map_err(|e| CoreError::persistence(SyncPhase::ObligationUpdate, e))?
            .ok_or(CoreError::NotFound {
                entity: "obligation",
                id,
            })?;

        if linked.is_empty() {
            let entry = LedgerEntry::new(
                updated.kind.entry_kind(),
                updated.counterparty_id,
                updated.category_id,
                account_id,
                updated.value,
                now.date_naive(),
            )
            .with_observations(updated.observations.clone())
            .with_source(source);
            ledger
                .create(entry)
                .map_err(|e| CoreError::persistence(SyncPhase::LedgerCreate, e))?;
            debug!(obligation = %id, "settled with new ledger entry");
        } else {
            // Entry already present from an earlier attempt; only the flags
            // needed refreshing.
            debug!(obligation = %id, "settle retried, reusing linked entry");
        }

        Ok(updated)
    }

    /// Clears the settlement flag and removes the linked ledger entry if one
    /// exists. Safe to repeat: a second run finds nothing to do on either
    /// store.
    pub fn unsettle(
        obligations: &mut dyn ObligationStore,
        ledger: &mut dyn LedgerStore,
        id: Uuid,
    ) -> CoreResult<()> {
        let obligation = obligations
            .get(id)
            .map_err(|e| CoreError::persistence(SyncPhase::ObligationLookup, e))?;
        let Some(obligation) = obligation else {
            // Already gone; nothing to clear.
            return Ok(());
        };

        obligations
            .update(id, ObligationPatch::unsettle())
            .map_err(|e| CoreError::persistence(SyncPhase::ObligationUpdate, e))?;

        let source = obligation.source();
        let linked = ledger
            .find_by_source(source)
            .map_err(|e| CoreError::persistence(SyncPhase::LedgerLookup, e))?;
        if linked.len() > 1 {
            return Err(CoreError::DuplicateLedgerEntry {
                entry_source: source,
                count: linked.len(),
            });
        }
        if let Some(entry) = linked.first() {
            ledger
                .delete(entry.id)
                .map_err(|e| CoreError::persistence(SyncPhase::LedgerDelete, e))?;
            debug!(obligation = %id, entry = %entry.id, "unsettled, linked entry removed");
        }

        Ok(())
    }
}
