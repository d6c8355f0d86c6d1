//! Linear searches over the transactions in the ledger.

use rust_decimal::Decimal;
use time::Date;

use crate::{ledger::Ledger, transaction::Transaction};

/// The transactions recorded against a single account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountTransactions<'a> {
    /// The account's transactions in the order they were recorded.
    pub transactions: &'a [Transaction],
    /// The account's current balance.
    pub balance: Decimal,
}

impl Ledger {
    /// Every transaction dated `date`.
    pub fn search_by_date(&self, date: Date) -> Vec<&Transaction> {
        self.transactions()
            .filter(|transaction| transaction.date == date)
            .collect()
    }

    /// The transactions and balance for `account_id`, or `None` if the
    /// account has no transactions.
    pub fn search_by_account(&self, account_id: &str) -> Option<AccountTransactions<'_>> {
        self.accounts
            .get(account_id)
            .map(|transactions| AccountTransactions {
                transactions,
                balance: self.balance(account_id),
            })
    }

    /// Every transaction in `category`, ignoring case.
    pub fn search_by_category(&self, category: &str) -> Vec<&Transaction> {
        let category = category.to_lowercase();

        self.transactions()
            .filter(|transaction| transaction.category.to_lowercase() == category)
            .collect()
    }
}
