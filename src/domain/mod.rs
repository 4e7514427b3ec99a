pub mod directory;
pub mod entry;
pub mod obligation;

pub use directory::{Account, AccountKind, Category, CategoryKind, Counterparty, CounterpartyRole};
pub use entry::{EntryKind, EntrySource, LedgerEntry};
pub use obligation::{Obligation, ObligationKind, RecurrenceType, Schedule};
