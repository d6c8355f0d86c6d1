//! Defines the endpoints for recording income and expenses.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_ledger,
    currency::format_currency,
    extract::JsonBody,
    ledger::{Ledger, RecordedTransaction},
    response::Status,
    timezone::local_now,
    transaction::{TransactionId, TransactionKind, form::TransactionForm},
};

/// The state needed to record a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The ledger to record transactions in.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The response body for a recorded transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecorded {
    /// Always [Status::Success].
    pub status: Status,
    /// Details for the user.
    pub message: String,
    /// The ID of the new transaction.
    pub tid: TransactionId,
    /// The balance of the account after the transaction.
    pub new_balance: Decimal,
}

/// A route handler for recording income, responds with the new balance.
pub async fn add_income_endpoint(
    State(state): State<CreateTransactionState>,
    JsonBody(form): JsonBody<TransactionForm>,
) -> Response {
    match record_transaction(&state, form, TransactionKind::Income) {
        Ok(recorded) => Json(recorded).into_response(),
        Err(error) => {
            tracing::error!("could not add income: {error}");
            error.into_response()
        }
    }
}

/// A route handler for recording an expense, responds with the new balance.
///
/// Expenses that break a budget rule are not recorded and get a warning.
pub async fn add_expense_endpoint(
    State(state): State<CreateTransactionState>,
    JsonBody(form): JsonBody<TransactionForm>,
) -> Response {
    match record_transaction(&state, form, TransactionKind::Expense) {
        Ok(recorded) => Json(recorded).into_response(),
        Err(Error::BudgetWarning(warning)) => {
            tracing::warn!("expense blocked by budget rule: {warning}");
            Error::BudgetWarning(warning).into_response()
        }
        Err(error) => {
            tracing::error!("could not add expense: {error}");
            error.into_response()
        }
    }
}

fn record_transaction(
    state: &CreateTransactionState,
    form: TransactionForm,
    kind: TransactionKind,
) -> Result<TransactionRecorded, Error> {
    let builder = form.into_builder()?;
    let amount = builder.amount.value();
    let now = local_now(&state.local_timezone)?;

    let mut ledger = lock_ledger(&state.ledger)?;

    let RecordedTransaction { id, new_balance } = match kind {
        TransactionKind::Income => ledger.add_income(builder, now)?,
        TransactionKind::Expense => ledger.add_expense(builder, now)?,
    };

    let message = match kind {
        TransactionKind::Income => {
            format!("Income of {} added successfully", format_currency(amount))
        }
        TransactionKind::Expense => {
            format!("Expense of {} recorded successfully", format_currency(amount))
        }
    };

    Ok(TransactionRecorded {
        status: Status::Success,
        message,
        tid: id,
        new_balance,
    })
}
