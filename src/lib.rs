//! Pocket Ledger is a small web service for tracking personal income and expenses.
//!
//! Transactions are grouped by account (IBAN) and kept in memory. Expenses
//! that would overdraw an account are rejected, and spending in the "Fun"
//! category is held to per-transaction and monthly limits.
//!
//! This library provides a REST API that speaks JSON.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod currency;
mod endpoints;
mod error;
mod export;
mod extract;
mod import;
mod ledger;
mod logging;
mod response;
mod routing;
mod search;
mod summary;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use error::Error;
pub use export::ExportDocument;
pub use ledger::{
    BudgetRule, BudgetWarning, CalendarMonth, ImportReport, Ledger, RecordedTransaction, Snapshot,
    Summary,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use response::{Status, StatusMessage};
pub use routing::build_router;
pub use transaction::{Amount, Transaction, TransactionBuilder, TransactionId, TransactionKind};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
