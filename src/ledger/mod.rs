//! The in-memory ledger of transactions grouped by account.
//!
//! This module contains the business rules of the application:
//! - The [Ledger] for recording and removing transactions and computing balances
//! - Category budget rules that block expenses over a limit
//! - Search and summary views over every transaction
//! - Snapshots for exporting and importing the whole ledger

mod budget;
mod core;
mod search;
mod snapshot;
mod summary;

pub use budget::{BudgetRule, BudgetWarning, CalendarMonth};
pub use core::{Ledger, RecordedTransaction};
pub use snapshot::{ImportReport, Snapshot};
pub use summary::Summary;
