use chrono::NaiveDate;
use obligation_core::{
    cascade::CascadeDeleter,
    clock::FixedClock,
    domain::{Obligation, ObligationKind},
    errors::{CoreError, SyncPhase},
    status::ObligationStatus,
    store::{
        LedgerStore, MemoryLedgerStore, MemoryObligationStore, ObligationStore, StoreError,
        StoreResult,
    },
    sync::SettlementSynchronizer,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn prepared_obligation(
    store: &mut MemoryObligationStore,
    kind: ObligationKind,
    due: NaiveDate,
) -> Obligation {
    let obligation = Obligation::new(kind, Uuid::new_v4(), Uuid::new_v4(), dec!(420.90), due)
        .with_account(Uuid::new_v4());
    store.create(obligation.clone()).unwrap();
    obligation
}

#[test]
fn settle_then_unsettle_restores_the_date_derived_status() {
    let mut obligations = MemoryObligationStore::new();
    let mut ledger = MemoryLedgerStore::new();
    let today = date(2024, 1, 3);
    let clock = FixedClock::on_date(today);

    // Overdue, due-soon, and pending relative to the reference date.
    let cases = [
        (date(2024, 1, 1), ObligationStatus::Overdue),
        (date(2024, 1, 5), ObligationStatus::DueSoon),
        (date(2024, 3, 1), ObligationStatus::Pending),
    ];
    for (due, expected) in cases {
        let obligation = prepared_obligation(&mut obligations, ObligationKind::Payable, due);
        let settled = SettlementSynchronizer::settle(
            &mut obligations,
            &mut ledger,
            &clock,
            obligation.id,
            None,
        )
        .unwrap();
        assert_eq!(
            ObligationStatus::of(&settled, today),
            ObligationStatus::Settled
        );

        SettlementSynchronizer::unsettle(&mut obligations, &mut ledger, obligation.id).unwrap();
        let reverted = obligations.get(obligation.id).unwrap().unwrap();
        assert_eq!(ObligationStatus::of(&reverted, today), expected);
    }
}

#[test]
fn delete_after_settle_removes_obligation_and_entry() {
    let mut obligations = MemoryObligationStore::new();
    let mut ledger = MemoryLedgerStore::new();
    let clock = FixedClock::on_date(date(2024, 2, 1));
    let obligation =
        prepared_obligation(&mut obligations, ObligationKind::Receivable, date(2024, 2, 10));

    SettlementSynchronizer::settle(&mut obligations, &mut ledger, &clock, obligation.id, None)
        .unwrap();
    assert_eq!(ledger.entries().len(), 1);

    CascadeDeleter::delete(&mut obligations, &mut ledger, obligation.id).unwrap();
    assert!(obligations.get(obligation.id).unwrap().is_none());
    assert!(ledger.list().unwrap().is_empty());
}

/// Ledger store that fails its first `create`, simulating a crash between
/// the obligation update and the ledger write.
struct FlakyLedger {
    inner: MemoryLedgerStore,
    fail_creates: usize,
}

impl LedgerStore for FlakyLedger {
    fn list(&self) -> StoreResult<Vec<obligation_core::domain::LedgerEntry>> {
        self.inner.list()
    }

    fn create(&mut self, entry: obligation_core::domain::LedgerEntry) -> StoreResult<Uuid> {
        if self.fail_creates > 0 {
            self.fail_creates -= 1;
            return Err(StoreError::Backend("ledger write refused".into()));
        }
        self.inner.create(entry)
    }

    fn delete(&mut self, id: Uuid) -> StoreResult<bool> {
        self.inner.delete(id)
    }
}

#[test]
fn failed_ledger_write_is_recovered_by_retrying_settle() {
    let mut obligations = MemoryObligationStore::new();
    let mut ledger = FlakyLedger {
        inner: MemoryLedgerStore::new(),
        fail_creates: 1,
    };
    let clock = FixedClock::on_date(date(2024, 5, 1));
    let obligation =
        prepared_obligation(&mut obligations, ObligationKind::Payable, date(2024, 5, 20));

    let err = SettlementSynchronizer::settle(
        &mut obligations,
        &mut ledger,
        &clock,
        obligation.id,
        None,
    )
    .expect_err("first attempt fails on the ledger half");
    match err {
        CoreError::Persistence { phase, .. } => assert_eq!(phase, SyncPhase::LedgerCreate),
        other => panic!("expected persistence error, got {other:?}"),
    }

    // The inconsistency window: obligation flagged settled, no entry yet.
    assert!(obligations.get(obligation.id).unwrap().unwrap().settled);
    assert!(ledger.list().unwrap().is_empty());

    // Retrying the whole operation is safe and produces exactly one entry.
    SettlementSynchronizer::settle(&mut obligations, &mut ledger, &clock, obligation.id, None)
        .unwrap();
    assert_eq!(ledger.list().unwrap().len(), 1);
}

#[test]
fn receivable_settlement_uses_the_settlement_day_as_payment_date() {
    let mut obligations = MemoryObligationStore::new();
    let mut ledger = MemoryLedgerStore::new();
    let settlement_day = date(2024, 6, 15);
    let clock = FixedClock::on_date(settlement_day);
    let obligation =
        prepared_obligation(&mut obligations, ObligationKind::Receivable, date(2024, 6, 1));

    SettlementSynchronizer::settle(&mut obligations, &mut ledger, &clock, obligation.id, None)
        .unwrap();
    let entries = ledger.list().unwrap();
    assert_eq!(entries[0].payment_date, settlement_day);
    assert_eq!(entries[0].value, dec!(420.90));
}
