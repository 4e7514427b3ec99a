use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::directory::CategoryKind;
use super::entry::{EntryKind, EntrySource};

/// Whether money is owed to us or by us.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ObligationKind {
    /// Money we owe a supplier.
    Payable,
    /// Money a client owes us.
    Receivable,
}

impl ObligationKind {
    /// The ledger entry kind a settled obligation of this kind produces.
    pub fn entry_kind(self) -> EntryKind {
        match self {
            ObligationKind::Payable => EntryKind::Expense,
            ObligationKind::Receivable => EntryKind::Revenue,
        }
    }

    /// The category side this obligation kind accepts: expense categories
    /// for payables, revenue categories for receivables.
    pub fn category_kind(self) -> CategoryKind {
        match self {
            ObligationKind::Payable => CategoryKind::Expense,
            ObligationKind::Receivable => CategoryKind::Revenue,
        }
    }

    /// The source tag linking a ledger entry back to an obligation of this kind.
    pub fn source_for(self, id: Uuid) -> EntrySource {
        match self {
            ObligationKind::Payable => EntrySource::Payable(id),
            ObligationKind::Receivable => EntrySource::Receivable(id),
        }
    }
}

/// How the obligation was planned. Instance generation happens upstream;
/// this only records the plan's shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Schedule {
    #[default]
    Single,
    Installment {
        installments: u32,
    },
    Recurring {
        recurrence: RecurrenceType,
        count: u32,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceType {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// A payable or receivable record representing money owed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Obligation {
    pub id: Uuid,
    pub kind: ObligationKind,
    /// Supplier for payables, client for receivables.
    pub counterparty_id: Uuid,
    pub category_id: Uuid,
    /// Funding/target account. May be absent until settlement time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    pub value: Decimal,
    pub due_date: NaiveDate,
    pub settled: bool,
    /// Present iff `settled` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub schedule: Schedule,
    /// Back-reference to the originating obligation when this instance was
    /// generated from an installment/recurrence plan. Lookup only, never a
    /// deletion trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl Obligation {
    pub fn new(
        kind: ObligationKind,
        counterparty_id: Uuid,
        category_id: Uuid,
        value: Decimal,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            counterparty_id,
            category_id,
            account_id: None,
            value,
            due_date,
            settled: false,
            settled_date: None,
            schedule: Schedule::Single,
            parent_id: None,
            observations: None,
        }
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = Some(observations.into());
        self
    }

    /// The source tag its ledger entry carries.
    pub fn source(&self) -> EntrySource {
        self.kind.source_for(self.id)
    }
}
