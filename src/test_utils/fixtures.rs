use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use time::{OffsetDateTime, macros::datetime};

use crate::{AppState, ledger::Ledger, transaction::Amount};

/// A fixed point in time for tests that depend on the current month.
pub(crate) fn test_now() -> OffsetDateTime {
    datetime!(2024-01-15 10:00 UTC)
}

#[track_caller]
pub(crate) fn amount(value: Decimal) -> Amount {
    Amount::new(value).expect("Could not create test amount")
}

pub(crate) fn test_state(ledger: Ledger) -> AppState {
    AppState {
        ledger: Arc::new(Mutex::new(ledger)),
        local_timezone: "Etc/UTC".to_owned(),
    }
}
