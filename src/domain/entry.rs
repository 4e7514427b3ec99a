use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    Revenue,
    Expense,
}

/// Ties a ledger entry to the obligation that caused it, or `Manual` when
/// the user recorded the movement directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntrySource {
    Manual,
    Payable(Uuid),
    Receivable(Uuid),
}

impl EntrySource {
    pub fn is_manual(&self) -> bool {
        matches!(self, EntrySource::Manual)
    }

    /// The originating obligation id, when there is one.
    pub fn obligation_id(&self) -> Option<Uuid> {
        match self {
            EntrySource::Manual => None,
            EntrySource::Payable(id) | EntrySource::Receivable(id) => Some(*id),
        }
    }

    fn manual_default() -> Self {
        EntrySource::Manual
    }
}

/// A recorded cash movement in the transaction log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub counterparty_id: Uuid,
    pub category_id: Uuid,
    pub account_id: Uuid,
    pub value: Decimal,
    pub payment_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default = "EntrySource::manual_default")]
    pub source: EntrySource,
}

impl LedgerEntry {
    pub fn new(
        kind: EntryKind,
        counterparty_id: Uuid,
        category_id: Uuid,
        account_id: Uuid,
        value: Decimal,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            counterparty_id,
            category_id,
            account_id,
            value,
            payment_date,
            observations: None,
            source: EntrySource::Manual,
        }
    }

    pub fn with_source(mut self, source: EntrySource) -> Self {
        self.source = source;
        self
    }

    pub fn with_observations(mut self, observations: Option<String>) -> Self {
        self.observations = observations;
        self
    }
}
