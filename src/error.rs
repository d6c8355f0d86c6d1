//! Defines the app level error type and its conversion to JSON status messages.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use crate::{
    currency::format_currency,
    ledger::BudgetWarning,
    response::StatusMessage,
    transaction::AmountError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount of a transaction was not a number or was not positive.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// The date of a transaction was not a calendar date of the form `YYYY-MM-DD`.
    #[error("Invalid date \"{0}\", expected a date of the form YYYY-MM-DD")]
    InvalidDate(String),

    /// A transaction was submitted without an account identifier.
    #[error("IBAN cannot be empty")]
    EmptyAccountId,

    /// An expense is larger than the account's current balance.
    ///
    /// Balances may never go negative, so the expense is not recorded.
    #[error(
        "Insufficient balance! Current balance: {}, Required: {}",
        format_currency(.balance),
        format_currency(.required)
    )]
    InsufficientBalance {
        /// The balance of the account before the expense.
        balance: Decimal,
        /// The amount of the rejected expense.
        required: Decimal,
    },

    /// An expense would break a budget rule.
    ///
    /// This is a soft failure that is reported as a warning rather than an
    /// error, but the expense is still not recorded.
    #[error(transparent)]
    BudgetWarning(BudgetWarning),

    /// The account has no transactions in the ledger.
    #[error("IBAN not found in records")]
    AccountNotFound,

    /// The account does not have a transaction with the given ID.
    #[error("Transaction ID {0} not found")]
    TransactionNotFound(String),

    /// Every transaction ID has been used, so no more transactions can be recorded.
    #[error("No transaction IDs are left to assign")]
    TransactionIdOverflow,

    /// The snapshot could not be imported. The ledger is left unchanged.
    #[error("Error importing data: {0}")]
    InvalidImport(String),

    /// The request body or path could not be parsed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Could not acquire the ledger lock.
    #[error("could not acquire the ledger lock")]
    LedgerLock,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl Error {
    /// The HTTP status code that goes with the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidAmount(_)
            | Error::InvalidDate(_)
            | Error::EmptyAccountId
            | Error::InvalidImport(_)
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::BudgetWarning(_) => StatusCode::OK,
            Error::AccountNotFound | Error::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            Error::LedgerLock | Error::InvalidTimezone(_) | Error::TransactionIdOverflow => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::BudgetWarning(warning) => {
                StatusMessage::warning(warning.to_string()).into_response()
            }
            Error::InvalidTimezone(ref timezone) => {
                tracing::error!("Could not get local timezone \"{timezone}\"");
                (
                    self.status_code(),
                    StatusMessage::error(format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to a valid, canonical timezone string"
                    )),
                )
                    .into_response()
            }
            // The lock error is logged where it happens, it is not intended to be shown to the client.
            Error::LedgerLock => (
                self.status_code(),
                StatusMessage::error(
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            )
                .into_response(),
            error => (error.status_code(), StatusMessage::error(error.to_string())).into_response(),
        }
    }
}
