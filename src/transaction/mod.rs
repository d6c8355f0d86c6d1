//! Transactions and the endpoints that record, list and remove them.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The request body for recording income and expenses
//! - Route handlers for adding, listing and removing transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod transactions_endpoint;

pub use core::{
    AccountId, Amount, AmountError, TRANSACTION_ID_START, Transaction, TransactionBuilder,
    TransactionId, TransactionKind, parse_date,
};
pub use create_endpoint::{add_expense_endpoint, add_income_endpoint};
pub use delete_endpoint::remove_transaction_endpoint;
pub use transactions_endpoint::get_transactions_endpoint;
