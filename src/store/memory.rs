//! Vec-backed store implementations for tests and in-process embedding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, Category, Counterparty, LedgerEntry, Obligation};
use crate::store::{
    Directory, LedgerStore, ObligationPatch, ObligationStore, StoreResult,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryObligationStore {
    obligations: Vec<Obligation>,
}

impl MemoryObligationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(obligations: Vec<Obligation>) -> Self {
        Self { obligations }
    }

    pub fn records(&self) -> &[Obligation] {
        &self.obligations
    }
}

impl ObligationStore for MemoryObligationStore {
    fn get(&self, id: Uuid) -> StoreResult<Option<Obligation>> {
        Ok(self.obligations.iter().find(|o| o.id == id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<Obligation>> {
        Ok(self.obligations.clone())
    }

    fn create(&mut self, obligation: Obligation) -> StoreResult<Uuid> {
        let id = obligation.id;
        self.obligations.push(obligation);
        Ok(id)
    }

    fn update(&mut self, id: Uuid, patch: ObligationPatch) -> StoreResult<Option<Obligation>> {
        match self.obligations.iter_mut().find(|o| o.id == id) {
            Some(obligation) => {
                patch.apply(obligation);
                Ok(Some(obligation.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete(&mut self, id: Uuid) -> StoreResult<bool> {
        let before = self.obligations.len();
        self.obligations.retain(|o| o.id != id);
        Ok(self.obligations.len() < before)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedgerStore {
    entries: Vec<LedgerEntry>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn list(&self) -> StoreResult<Vec<LedgerEntry>> {
        Ok(self.entries.clone())
    }

    fn create(&mut self, entry: LedgerEntry) -> StoreResult<Uuid> {
        let id = entry.id;
        self.entries.push(entry);
        Ok(id)
    }

    fn delete(&mut self, id: Uuid) -> StoreResult<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        Ok(self.entries.len() < before)
    }
}

/// In-memory directory of accounts, counterparties, and categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDirectory {
    accounts: Vec<Account>,
    counterparties: Vec<Counterparty>,
    categories: Vec<Category>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        id
    }

    pub fn add_counterparty(&mut self, counterparty: Counterparty) -> Uuid {
        let id = counterparty.id;
        self.counterparties.push(counterparty);
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        id
    }
}

impl Directory for MemoryDirectory {
    fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn counterparty(&self, id: Uuid) -> Option<&Counterparty> {
        self.counterparties.iter().find(|c| c.id == id)
    }

    fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn accounts(&self) -> Vec<&Account> {
        self.accounts.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountKind, ObligationKind};
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn sample_obligation() -> Obligation {
        Obligation::new(
            ObligationKind::Payable,
            Uuid::new_v4(),
            Uuid::new_v4(),
            dec!(50),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    #[test]
    fn update_patches_settlement_fields_only() {
        let mut store = MemoryObligationStore::new();
        let obligation = sample_obligation();
        let id = store.create(obligation.clone()).unwrap();

        let now = Utc::now();
        let updated = store
            .update(id, ObligationPatch::settle(now))
            .unwrap()
            .expect("record exists");
        assert!(updated.settled);
        assert_eq!(updated.settled_date, Some(now));
        assert_eq!(updated.value, obligation.value);
        assert_eq!(updated.due_date, obligation.due_date);
    }

    #[test]
    fn update_missing_returns_none() {
        let mut store = MemoryObligationStore::new();
        let patched = store
            .update(Uuid::new_v4(), ObligationPatch::unsettle())
            .unwrap();
        assert!(patched.is_none());
    }

    #[test]
    fn delete_reports_whether_a_record_existed() {
        let mut store = MemoryObligationStore::new();
        let id = store.create(sample_obligation()).unwrap();
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
    }

    #[test]
    fn directory_resolves_names() {
        let mut directory = MemoryDirectory::new();
        let account_id = directory.add_account(Account::new("Caixa", AccountKind::Cash));
        assert_eq!(directory.account(account_id).unwrap().name, "Caixa");
        assert_eq!(directory.counterparty_name(Uuid::new_v4()), "");
    }
}
