//! The record store: an immutable, pre-loaded snapshot of every record the
//! dashboard reads. Nothing in the core mutates it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::{Account, BudgetCategory, Goal, Investment, Transaction};

/// Serialized shape of a snapshot as produced by a loader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub accounts: Vec<Account>,
    pub budget_categories: Vec<BudgetCategory>,
    pub investments: Vec<Investment>,
    pub goals: Vec<Goal>,
}

/// Result of resolving a transaction's account reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccountRef<'a> {
    Known(&'a Account),
    Unknown,
}

impl<'a> AccountRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            AccountRef::Known(a) => &a.name,
            AccountRef::Unknown => "Unknown account",
        }
    }

    pub fn account(&self) -> Option<&'a Account> {
        match self {
            AccountRef::Known(a) => Some(a),
            AccountRef::Unknown => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    snapshot: Snapshot,
    account_index: HashMap<String, usize>,
}

impl RecordStore {
    /// Freeze a snapshot. When two accounts share an id the first one wins.
    pub fn new(snapshot: Snapshot) -> Self {
        let mut account_index = HashMap::new();
        for (i, account) in snapshot.accounts.iter().enumerate() {
            account_index.entry(account.id.clone()).or_insert(i);
        }
        debug!(
            transactions = snapshot.transactions.len(),
            accounts = snapshot.accounts.len(),
            budgets = snapshot.budget_categories.len(),
            investments = snapshot.investments.len(),
            goals = snapshot.goals.len(),
            "record store loaded"
        );
        Self {
            snapshot,
            account_index,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.snapshot.transactions
    }

    pub fn accounts(&self) -> &[Account] {
        &self.snapshot.accounts
    }

    pub fn budget_categories(&self) -> &[BudgetCategory] {
        &self.snapshot.budget_categories
    }

    pub fn investments(&self) -> &[Investment] {
        &self.snapshot.investments
    }

    pub fn goals(&self) -> &[Goal] {
        &self.snapshot.goals
    }

    /// Give the records back, e.g. to extend them with an import before re-freezing.
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.account_index
            .get(id)
            .and_then(|&i| self.snapshot.accounts.get(i))
    }

    pub fn resolve_account(&self, txn: &Transaction) -> AccountRef<'_> {
        match self.account(&txn.account_id) {
            Some(a) => AccountRef::Known(a),
            None => AccountRef::Unknown,
        }
    }

    /// Transactions whose account reference does not resolve
    pub fn unresolved_transactions(&self) -> Vec<&Transaction> {
        self.transactions()
            .iter()
            .filter(|t| !self.account_index.contains_key(&t.account_id))
            .collect()
    }

    /// Problems a loader should surface: dangling account refs, duplicate ids
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for txn in self.unresolved_transactions() {
            warnings.push(format!(
                "transaction {} references unknown account {}",
                txn.id, txn.account_id
            ));
        }
        if self.account_index.len() != self.snapshot.accounts.len() {
            warnings.push("duplicate account ids; first occurrence wins".to_string());
        }
        let mut budget_ids = HashSet::new();
        for b in self.budget_categories() {
            if !budget_ids.insert(b.id.as_str()) {
                warnings.push(format!("duplicate budget category id {}", b.id));
            }
        }
        warnings
    }
}

impl From<Snapshot> for RecordStore {
    fn from(snapshot: Snapshot) -> Self {
        RecordStore::new(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AccountType, Flexibility, TransactionType};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn store() -> RecordStore {
        RecordStore::new(Snapshot {
            transactions: vec![
                Transaction::new("t1", day(), "Coffee", "Blue Bottle", -6.0, "Dining", TransactionType::Expense, "chk"),
                Transaction::new("t2", day(), "Cash gift", "Venmo", 50.0, "Gifts", TransactionType::Income, "ghost"),
                Transaction::new("t3", day(), "Lunch", "Sweetgreen", -14.0, "Dining", TransactionType::Expense, "chk"),
            ],
            accounts: vec![Account::new("chk", "Everyday Checking", "Chase", AccountType::Checking, 1200.0, day())],
            budget_categories: vec![
                BudgetCategory::new("b1", "Dining", 200.0, 20.0, Flexibility::Flexible),
                BudgetCategory::new("b1", "Dining again", 10.0, 0.0, Flexibility::Flexible),
            ],
            ..Snapshot::default()
        })
    }

    #[test]
    fn test_resolve_known_and_unknown_accounts() {
        let s = store();
        let known = s.resolve_account(&s.transactions()[0]);
        assert_eq!(known.name(), "Everyday Checking");
        assert!(known.account().is_some());

        let unknown = s.resolve_account(&s.transactions()[1]);
        assert_eq!(unknown, AccountRef::Unknown);
        assert_eq!(unknown.name(), "Unknown account");
    }

    #[test]
    fn test_unresolved_and_warnings() {
        let s = store();
        let unresolved = s.unresolved_transactions();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].id, "t2");

        let warnings = s.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("ghost"));
        assert!(warnings[1].contains("b1"));
    }

    #[test]
    fn test_snapshot_json_defaults() {
        let snap: Snapshot = serde_json::from_str(r#"{"goals": []}"#).unwrap();
        assert!(RecordStore::from(snap).transactions().is_empty());
    }
}
