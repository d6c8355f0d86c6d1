//! Bulk export and import of the ledger.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    ledger::Ledger,
    transaction::{AccountId, Transaction},
};

/// A copy of every transaction in the ledger, grouped by account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The transactions for each account in the order they were recorded.
    pub transactions: BTreeMap<AccountId, Vec<Transaction>>,
}

/// What was loaded by [Ledger::import_all].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// The number of accounts in the ledger after the import.
    pub accounts_count: usize,
    /// The number of transactions in the ledger after the import.
    pub total_transactions: usize,
}

impl Ledger {
    /// Copy every transaction in the ledger.
    pub fn export_all(&self) -> Snapshot {
        Snapshot {
            transactions: self.accounts.clone(),
        }
    }

    /// Replace every transaction in the ledger with those in `snapshot`.
    ///
    /// Accounts with no transactions are dropped. New transaction IDs continue
    /// from the largest ID seen so far, so they never clash with imported ones.
    /// Budget rules are kept.
    ///
    /// # Errors
    /// Returns [Error::InvalidImport] and leaves the ledger unchanged if a
    /// transaction is filed under a different account than its own, or if two
    /// transactions share an ID.
    pub fn import_all(&mut self, snapshot: Snapshot) -> Result<ImportReport, Error> {
        let mut seen_ids = HashSet::new();

        for (account_id, transactions) in &snapshot.transactions {
            for transaction in transactions {
                if &transaction.account_id != account_id {
                    return Err(Error::InvalidImport(format!(
                        "transaction {} belongs to IBAN {} but is listed under {}",
                        transaction.id, transaction.account_id, account_id
                    )));
                }

                if !seen_ids.insert(transaction.id) {
                    return Err(Error::InvalidImport(format!(
                        "transaction ID {} appears more than once",
                        transaction.id
                    )));
                }
            }
        }

        let largest_id = seen_ids
            .iter()
            .map(|id| id.sequence_number())
            .max()
            .unwrap_or_default();

        self.accounts = snapshot
            .transactions
            .into_iter()
            .filter(|(_, transactions)| !transactions.is_empty())
            .collect();
        self.last_transaction_id = self.last_transaction_id.max(largest_id);

        Ok(ImportReport {
            accounts_count: self.account_count(),
            total_transactions: seen_ids.len(),
        })
    }
}
