//! Defines the endpoint for the totals over every transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};

use crate::{AppState, app_state::lock_ledger, ledger::Ledger};

/// The state needed to summarise the ledger.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The ledger to summarise.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for the total income, expenses and counts, broken down by category.
pub async fn get_summary_endpoint(State(state): State<SummaryState>) -> Response {
    match lock_ledger(&state.ledger) {
        Ok(ledger) => Json(ledger.summary()).into_response(),
        Err(error) => error.into_response(),
    }
}
