//! The ledger itself: recording and removing transactions and computing balances.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error,
    ledger::budget::{BudgetRule, CalendarMonth},
    transaction::{
        AccountId, TRANSACTION_ID_START, Transaction, TransactionBuilder, TransactionId,
        TransactionKind,
    },
};

/// All transactions, grouped by account in the order they were recorded.
///
/// An account only appears in the ledger while it has at least one
/// transaction. Balances are never stored, they are computed from the
/// transactions each time they are needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub(super) accounts: BTreeMap<AccountId, Vec<Transaction>>,
    pub(super) last_transaction_id: u64,
    budget_rules: Vec<BudgetRule>,
}

/// The result of recording a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTransaction {
    /// The ID assigned to the new transaction.
    pub id: TransactionId,
    /// The balance of the account after the transaction.
    pub new_balance: Decimal,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger with the default budget rule for the "Fun" category.
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
            last_transaction_id: TRANSACTION_ID_START,
            budget_rules: vec![BudgetRule::fun()],
        }
    }

    /// Replace the budget rules checked when recording expenses.
    pub fn with_budget_rules(mut self, budget_rules: Vec<BudgetRule>) -> Self {
        self.budget_rules = budget_rules;
        self
    }

    /// The budget rules checked when recording expenses.
    pub fn budget_rules(&self) -> &[BudgetRule] {
        &self.budget_rules
    }

    /// Record income and return the account's new balance.
    ///
    /// The transaction is recorded under "Salary" if no category is given.
    /// `now` is the local time, used as the creation time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyAccountId] if the account ID is blank,
    /// - or [Error::TransactionIdOverflow] if there are no transaction IDs left.
    pub fn add_income(
        &mut self,
        builder: TransactionBuilder,
        now: OffsetDateTime,
    ) -> Result<RecordedTransaction, Error> {
        check_account_id(&builder.account_id)?;

        self.record(builder, TransactionKind::Income, now)
    }

    /// Record an expense and return the account's new balance.
    ///
    /// The transaction is recorded under "Entertainment" if no category is
    /// given. `now` is the local time, used as the creation time and to find
    /// the current month for budget rules.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyAccountId] if the account ID is blank,
    /// - [Error::BudgetWarning] if the expense breaks the budget rule for its category,
    /// - [Error::InsufficientBalance] if the expense is more than the account's balance,
    /// - or [Error::TransactionIdOverflow] if there are no transaction IDs left.
    pub fn add_expense(
        &mut self,
        builder: TransactionBuilder,
        now: OffsetDateTime,
    ) -> Result<RecordedTransaction, Error> {
        check_account_id(&builder.account_id)?;

        let category = builder.category_or_default(TransactionKind::Expense);

        if let Some(rule) = self
            .budget_rules
            .iter()
            .find(|rule| rule.applies_to(category))
        {
            let month_to_date = self.monthly_category_spending(
                &builder.account_id,
                category,
                CalendarMonth::of(now.date()),
            );

            rule.check(builder.amount, month_to_date)
                .map_err(Error::BudgetWarning)?;
        }

        let balance = self.balance(&builder.account_id);

        if balance < builder.amount.value() {
            return Err(Error::InsufficientBalance {
                balance,
                required: builder.amount.value(),
            });
        }

        self.record(builder, TransactionKind::Expense, now)
    }

    fn record(
        &mut self,
        builder: TransactionBuilder,
        kind: TransactionKind,
        now: OffsetDateTime,
    ) -> Result<RecordedTransaction, Error> {
        let id = self.next_transaction_id()?;
        let transaction = builder.finalize(id, kind, now);
        let account_id = transaction.account_id.clone();

        self.accounts
            .entry(account_id.clone())
            .or_default()
            .push(transaction);

        Ok(RecordedTransaction {
            id,
            new_balance: self.balance(&account_id),
        })
    }

    fn next_transaction_id(&mut self) -> Result<TransactionId, Error> {
        self.last_transaction_id = self
            .last_transaction_id
            .checked_add(1)
            .ok_or(Error::TransactionIdOverflow)?;

        Ok(TransactionId::new(self.last_transaction_id))
    }

    /// Remove the transaction `transaction_id` from `account_id` and return it.
    ///
    /// The account is removed from the ledger along with its last transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::AccountNotFound] if the account has no transactions,
    /// - or [Error::TransactionNotFound] if the account has no transaction with that ID.
    pub fn remove_transaction(
        &mut self,
        account_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction, Error> {
        let transactions = self
            .accounts
            .get_mut(account_id)
            .ok_or(Error::AccountNotFound)?;

        let position = transaction_id
            .parse::<TransactionId>()
            .ok()
            .and_then(|id| transactions.iter().position(|transaction| transaction.id == id))
            .ok_or_else(|| Error::TransactionNotFound(transaction_id.to_owned()))?;

        let removed = transactions.remove(position);

        if transactions.is_empty() {
            self.accounts.remove(account_id);
        }

        Ok(removed)
    }

    /// The balance of `account_id`: total income minus total expenses.
    ///
    /// Accounts with no transactions have a balance of zero.
    pub fn balance(&self, account_id: &str) -> Decimal {
        self.accounts
            .get(account_id)
            .map(|transactions| transactions.iter().map(Transaction::signed_amount).sum())
            .unwrap_or(Decimal::ZERO)
    }

    /// The total of the expenses for `account_id` in `category` dated within `month`.
    pub fn monthly_category_spending(
        &self,
        account_id: &str,
        category: &str,
        month: CalendarMonth,
    ) -> Decimal {
        self.accounts
            .get(account_id)
            .into_iter()
            .flatten()
            .filter(|transaction| {
                transaction.kind == TransactionKind::Expense
                    && transaction.category == category
                    && month.contains(transaction.date)
            })
            .map(|transaction| transaction.amount.value())
            .sum()
    }

    /// Every transaction across all accounts, most recently created first.
    ///
    /// Transactions created at the same time are ordered by descending ID.
    pub fn list_all(&self) -> Vec<&Transaction> {
        let mut transactions: Vec<_> = self.transactions().collect();
        transactions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        transactions
    }

    /// Whether the ledger has no transactions.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// The number of accounts with at least one transaction.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Iterate over every transaction, grouped by account in account order.
    pub(super) fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.accounts.values().flatten()
    }
}

fn check_account_id(account_id: &str) -> Result<(), Error> {
    if account_id.trim().is_empty() {
        return Err(Error::EmptyAccountId);
    }

    Ok(())
}

#[cfg(test)]
mod add_income_tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        ledger::Ledger,
        test_utils::{amount, test_now},
        transaction::{Transaction, TransactionId, TransactionKind},
    };

    #[test]
    fn first_transaction_id_is_txn1001() {
        let mut ledger = Ledger::new();

        let recorded = ledger
            .add_income(
                Transaction::build("IBAN1", amount(dec!(100)), date!(2024 - 01 - 01)),
                test_now(),
            )
            .unwrap();

        assert_eq!(recorded.id, TransactionId::new(1001));
        assert_eq!(recorded.id.to_string(), "TXN1001");
    }

    #[test]
    fn increases_balance_by_amount() {
        let mut ledger = Ledger::new();
        let today = date!(2024 - 01 - 01);

        for (value, want_balance) in [
            (dec!(100), dec!(100)),
            (dec!(0.5), dec!(100.5)),
            (dec!(1234.25), dec!(1334.75)),
        ] {
            let old_balance = ledger.balance("IBAN1");

            let recorded = ledger
                .add_income(Transaction::build("IBAN1", amount(value), today), test_now())
                .unwrap();

            assert_eq!(recorded.new_balance, old_balance + value);
            assert_eq!(recorded.new_balance, want_balance);
        }
    }

    #[test]
    fn uses_salary_as_default_category() {
        let mut ledger = Ledger::new();

        ledger
            .add_income(
                Transaction::build("IBAN1", amount(dec!(100)), date!(2024 - 01 - 01)),
                test_now(),
            )
            .unwrap();

        let transaction = ledger.list_all()[0];
        assert_eq!(transaction.category, "Salary");
        assert_eq!(transaction.kind, TransactionKind::Income);
        assert_eq!(transaction.created_at, test_now());
    }

    #[test]
    fn ids_are_unique_across_accounts() {
        let mut ledger = Ledger::new();
        let today = date!(2024 - 01 - 01);

        let first = ledger
            .add_income(Transaction::build("IBAN1", amount(dec!(1)), today), test_now())
            .unwrap();
        let second = ledger
            .add_income(Transaction::build("IBAN2", amount(dec!(1)), today), test_now())
            .unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn rejects_blank_account_id() {
        let mut ledger = Ledger::new();

        let result = ledger.add_income(
            Transaction::build("  ", amount(dec!(1)), date!(2024 - 01 - 01)),
            test_now(),
        );

        assert_eq!(result, Err(Error::EmptyAccountId));
        assert!(ledger.is_empty());
    }
}



#[cfg(test)]
mod remove_transaction_tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        ledger::Ledger,
        test_utils::{amount, test_now},
        transaction::Transaction,
    };

    fn ledger_with_two_transactions() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_income(
                Transaction::build("IBAN1", amount(dec!(100)), date!(2024 - 01 - 01)),
                test_now(),
            )
            .unwrap();
        ledger
            .add_expense(
                Transaction::build("IBAN1", amount(dec!(30)), date!(2024 - 01 - 02))
                    .category("Food"),
                test_now(),
            )
            .unwrap();
        ledger
    }

    #[test]
    fn removed_amount_is_excluded_from_balance() {
        let mut ledger = ledger_with_two_transactions();

        let removed = ledger.remove_transaction("IBAN1", "TXN1002").unwrap();

        assert_eq!(removed.amount, amount(dec!(30)));
        assert_eq!(ledger.balance("IBAN1"), dec!(100));
    }

    #[test]
    fn removes_from_any_position() {
        let mut ledger = ledger_with_two_transactions();

        ledger.remove_transaction("IBAN1", "TXN1001").unwrap();

        assert_eq!(ledger.balance("IBAN1"), dec!(-30));
        assert_eq!(ledger.list_all().len(), 1);
    }

    #[test]
    fn removing_last_transaction_removes_account() {
        let mut ledger = ledger_with_two_transactions();

        ledger.remove_transaction("IBAN1", "TXN1002").unwrap();
        ledger.remove_transaction("IBAN1", "TXN1001").unwrap();

        assert!(ledger.is_empty());
        assert_eq!(ledger.account_count(), 0);
        assert_eq!(ledger.search_by_account("IBAN1"), None);
    }

    #[test]
    fn fails_for_unknown_account() {
        let mut ledger = ledger_with_two_transactions();

        assert_eq!(
            ledger.remove_transaction("IBAN2", "TXN1001"),
            Err(Error::AccountNotFound)
        );
    }

    #[test]
    fn fails_for_unknown_transaction() {
        let mut ledger = ledger_with_two_transactions();

        assert_eq!(
            ledger.remove_transaction("IBAN1", "TXN4242"),
            Err(Error::TransactionNotFound("TXN4242".to_owned()))
        );
        assert_eq!(
            ledger.remove_transaction("IBAN1", "not-an-id"),
            Err(Error::TransactionNotFound("not-an-id".to_owned()))
        );
        assert_eq!(
            ledger.remove_transaction("IBAN1", "TXN01001"),
            Err(Error::TransactionNotFound("TXN01001".to_owned()))
        );
        assert_eq!(ledger.list_all().len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut ledger = ledger_with_two_transactions();
        ledger.remove_transaction("IBAN1", "TXN1002").unwrap();

        let recorded = ledger
            .add_income(
                Transaction::build("IBAN1", amount(dec!(1)), date!(2024 - 01 - 03)),
                test_now(),
            )
            .unwrap();

        assert_eq!(recorded.id.to_string(), "TXN1003");
    }
}
