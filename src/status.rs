use chrono::NaiveDate;

use crate::domain::{Obligation, ObligationKind};

/// Days ahead of the due date at which an open obligation becomes `DueSoon`.
/// The boundary is inclusive: due exactly this many days out is still soon.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Display status of an obligation. Derived, never stored; recompute against
/// a reference date whenever it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObligationStatus {
    Settled,
    Overdue,
    DueSoon,
    Pending,
}

impl ObligationStatus {
    /// Derives the status from the settlement flag and due date at day
    /// granularity. Settlement wins regardless of the due date.
    pub fn derive(settled: bool, due_date: NaiveDate, today: NaiveDate) -> Self {
        Self::derive_with_window(settled, due_date, today, DUE_SOON_WINDOW_DAYS)
    }

    /// Same derivation with a caller-chosen due-soon window.
    pub fn derive_with_window(
        settled: bool,
        due_date: NaiveDate,
        today: NaiveDate,
        window_days: i64,
    ) -> Self {
        if settled {
            ObligationStatus::Settled
        } else if due_date < today {
            ObligationStatus::Overdue
        } else if (due_date - today).num_days() <= window_days {
            ObligationStatus::DueSoon
        } else {
            ObligationStatus::Pending
        }
    }

    /// Derives the status of an obligation record.
    pub fn of(obligation: &Obligation, today: NaiveDate) -> Self {
        Self::derive(obligation.settled, obligation.due_date, today)
    }

    /// Localized display label, the exact text list filters match against.
    /// Settlement wording depends on the obligation side: a payable is
    /// "Pago", a receivable "Recebido".
    pub fn label(&self, kind: ObligationKind) -> &'static str {
        match (self, kind) {
            (ObligationStatus::Settled, ObligationKind::Payable) => "Pago",
            (ObligationStatus::Settled, ObligationKind::Receivable) => "Recebido",
            (ObligationStatus::Overdue, _) => "Vencido",
            (ObligationStatus::DueSoon, _) => "Em breve",
            (ObligationStatus::Pending, _) => "Pendente",
        }
    }
}
