//! Totals over the whole ledger.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    ledger::Ledger,
    transaction::{Transaction, TransactionKind},
};

/// The income and expenses recorded under one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// The total income in the category.
    pub income: Decimal,
    /// The total expenses in the category.
    pub expense: Decimal,
}

/// Totals across every account in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Total income minus total expenses.
    pub total_balance: Decimal,
    /// The sum of all income.
    pub total_income: Decimal,
    /// The sum of all expenses.
    pub total_expenses: Decimal,
    /// The number of transactions.
    pub total_transactions: usize,
    /// The number of accounts with at least one transaction.
    pub accounts_count: usize,
    /// Income and expense totals for each category.
    pub category_breakdown: BTreeMap<String, CategoryTotals>,
}

impl Summary {
    fn add(&mut self, transaction: &Transaction) {
        let totals = self
            .category_breakdown
            .entry(transaction.category.clone())
            .or_default();
        let amount = transaction.amount.value();

        match transaction.kind {
            TransactionKind::Income => {
                self.total_income += amount;
                totals.income += amount;
            }
            TransactionKind::Expense => {
                self.total_expenses += amount;
                totals.expense += amount;
            }
        }

        self.total_transactions += 1;
    }
}

impl Ledger {
    /// Total income, expenses and transaction counts for the whole ledger,
    /// broken down by category.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            accounts_count: self.account_count(),
            ..Default::default()
        };

        for transaction in self.transactions() {
            summary.add(transaction);
        }

        summary.total_balance = summary.total_income - summary.total_expenses;

        summary
    }
}
