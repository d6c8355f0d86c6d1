//! Defines the endpoint for removing a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_ledger,
    extract::JsonBody,
    ledger::Ledger,
    response::Status,
    transaction::Transaction,
};

/// The state needed to remove a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The ledger to remove transactions from.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The request body for removing a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTransactionForm {
    /// The account the transaction belongs to.
    pub iban: String,
    /// The ID of the transaction, e.g. "TXN1001".
    pub tid: String,
}

/// The response body for a removed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRemoved {
    /// Always [Status::Success].
    pub status: Status,
    /// Details for the user.
    pub message: String,
    /// The transaction that was removed.
    pub removed_transaction: Transaction,
}

/// A route handler for removing a transaction, responds with the removed transaction.
pub async fn remove_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    JsonBody(form): JsonBody<RemoveTransactionForm>,
) -> Response {
    match remove_transaction(&state, &form) {
        Ok(removed) => Json(removed).into_response(),
        Err(error) => {
            tracing::error!(
                "Could not remove transaction {} from {}: {error}",
                form.tid,
                form.iban
            );
            error.into_response()
        }
    }
}

fn remove_transaction(
    state: &DeleteTransactionState,
    form: &RemoveTransactionForm,
) -> Result<TransactionRemoved, Error> {
    let removed = lock_ledger(&state.ledger)?.remove_transaction(&form.iban, &form.tid)?;

    Ok(TransactionRemoved {
        status: Status::Success,
        message: format!("Transaction {} removed successfully", removed.id),
        removed_transaction: removed,
    })
}
