use chrono::NaiveDate;
use obligation_core::{
    clock::FixedClock,
    domain::{Account, AccountKind, Category, CategoryKind, Counterparty, CounterpartyRole,
        Obligation, ObligationKind},
    storage::Snapshot,
    store::{LedgerStore, MemoryDirectory, MemoryLedgerStore, MemoryObligationStore,
        ObligationStore},
    sync::SettlementSynchronizer,
};
use rust_decimal_macros::dec;
use tempfile::tempdir;

#[test]
fn snapshot_roundtrip_preserves_the_dataset() {
    let mut directory = MemoryDirectory::new();
    let supplier =
        directory.add_counterparty(Counterparty::new("Fornecedor A", CounterpartyRole::Supplier));
    let category = directory.add_category(Category::new("Serviços", CategoryKind::Expense));
    let account = directory.add_account(Account::new("Conta corrente", AccountKind::Checking));

    let mut obligations = MemoryObligationStore::new();
    let due = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let obligation = Obligation::new(ObligationKind::Payable, supplier, category, dec!(59.90), due)
        .with_account(account)
        .with_observations("mensalidade");
    let id = obligations.create(obligation).unwrap();

    let mut ledger = MemoryLedgerStore::new();
    let clock = FixedClock::on_date(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());
    SettlementSynchronizer::settle(&mut obligations, &mut ledger, &clock, id, None).unwrap();

    let temp = tempdir().unwrap();
    let path = temp.path().join("tracker.json");
    Snapshot::new(obligations, ledger, directory)
        .save_to(&path)
        .unwrap();

    let restored = Snapshot::load_from(&path).unwrap();
    let record = restored.obligations.get(id).unwrap().unwrap();
    assert!(record.settled);
    assert_eq!(record.value, dec!(59.90));
    assert_eq!(record.observations.as_deref(), Some("mensalidade"));

    let entries = restored.ledger.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].value, dec!(59.90));
    assert_eq!(entries[0].source.obligation_id(), Some(id));
}

#[test]
fn saving_twice_overwrites_cleanly() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("tracker.json");

    Snapshot::default().save_to(&path).unwrap();
    let mut snapshot = Snapshot::load_from(&path).unwrap();
    let due = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
    snapshot
        .obligations
        .create(Obligation::new(
            ObligationKind::Receivable,
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4(),
            dec!(10),
            due,
        ))
        .unwrap();
    snapshot.save_to(&path).unwrap();

    let reloaded = Snapshot::load_from(&path).unwrap();
    assert_eq!(reloaded.obligations.records().len(), 1);
}
