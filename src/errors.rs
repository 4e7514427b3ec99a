use thiserror::Error;
use uuid::Uuid;

use crate::domain::entry::EntrySource;

/// Which half of a two-store operation was running when a store call failed.
///
/// The synchronizer and deleter touch the obligation store and the ledger
/// store in a fixed order without a shared transaction; callers deciding
/// whether to retry need to know how far the sequence got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    ObligationLookup,
    ObligationUpdate,
    LedgerLookup,
    LedgerCreate,
    LedgerDelete,
    ObligationDelete,
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SyncPhase::ObligationLookup => "obligation lookup",
            SyncPhase::ObligationUpdate => "obligation update",
            SyncPhase::LedgerLookup => "ledger entry lookup",
            SyncPhase::LedgerCreate => "ledger entry creation",
            SyncPhase::LedgerDelete => "ledger entry deletion",
            SyncPhase::ObligationDelete => "obligation deletion",
        };
        f.write_str(label)
    }
}

/// Error type that captures failures of the synchronization core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required input is missing or malformed; the caller must supply it
    /// and retry. Never defaulted silently.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Settlement was requested for an obligation with no account on record
    /// and no override supplied. The caller must prompt for one.
    #[error("obligation {0} has no account; one must be selected before settlement")]
    AccountRequired(Uuid),

    /// An obligation or ledger entry was absent where one was required.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// An underlying store call failed. Not retried automatically; the phase
    /// tells the caller which half of the sequence to reason about.
    #[error("persistence failure during {phase}: {message}")]
    Persistence { phase: SyncPhase, message: String },

    /// More than one ledger entry carries the same obligation back-reference.
    /// Ambiguous which entry is authoritative, so this is reported, never
    /// resolved silently.
    #[error("{count} ledger entries share source {entry_source:?}; expected at most one")]
    DuplicateLedgerEntry {
        entry_source: EntrySource,
        count: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub(crate) fn persistence(phase: SyncPhase, err: crate::store::StoreError) -> Self {
        CoreError::Persistence {
            phase,
            message: err.to_string(),
        }
    }
}
