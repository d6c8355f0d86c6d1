//! Defines the endpoint for listing every transaction.
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
    ledger::Ledger,
    response::{Status, StatusMessage},
    transaction::Transaction,
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The ledger to read transactions from.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The response body listing transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionList {
    /// Always [Status::Success].
    pub status: Status,
    /// Every transaction, most recently created first.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing every transaction, most recently created first.
///
/// Responds with an info message if there are no transactions.
pub async fn get_transactions_endpoint(State(state): State<TransactionsState>) -> Response {
    match list_transactions(&state) {
        Ok(Some(list)) => Json(list).into_response(),
        Ok(None) => StatusMessage::info("No transactions found").into_response(),
        Err(error) => error.into_response(),
    }
}

fn list_transactions(state: &TransactionsState) -> Result<Option<TransactionList>, Error> {
    let ledger = lock_ledger(&state.ledger)?;

    if ledger.is_empty() {
        return Ok(None);
    }

    Ok(Some(TransactionList {
        status: Status::Success,
        transactions: ledger.list_all().into_iter().cloned().collect(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, response::IntoResponse};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::{Duration, macros::date};

    use crate::{
        ledger::Ledger,
        test_utils::{amount, assert_status_ok, response_json, test_now},
        transaction::{
            Transaction,
            transactions_endpoint::{TransactionsState, get_transactions_endpoint},
        },
    };

    fn state_with(ledger: Ledger) -> TransactionsState {
        TransactionsState {
            ledger: std::sync::Arc::new(std::sync::Mutex::new(ledger)),
        }
    }

    #[tokio::test]
    async fn empty_ledger_is_info() {
        let response = get_transactions_endpoint(State(state_with(Ledger::new())))
            .await
            .into_response();

        assert_status_ok(&response);
        assert_eq!(
            response_json(response).await,
            json!({"status": "info", "message": "No transactions found"})
        );
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let mut ledger = Ledger::new();
        ledger
            .add_income(
                Transaction::build("IBAN1", amount(dec!(100)), date!(2024 - 01 - 01)),
                test_now(),
            )
            .unwrap();
        ledger
            .add_income(
                Transaction::build("IBAN2", amount(dec!(5)), date!(2023 - 06 - 01)),
                test_now() + Duration::minutes(1),
            )
            .unwrap();

        let response = get_transactions_endpoint(State(state_with(ledger)))
            .await
            .into_response();

        assert_status_ok(&response);
        let body = response_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["transactions"][0]["tid"], "TXN1002");
        assert_eq!(body["transactions"][1]["tid"], "TXN1001");
    }
}
