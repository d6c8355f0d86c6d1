//! Defines the endpoint for replacing the ledger with an uploaded export.
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
    ledger::{ImportReport, Ledger, Snapshot},
    response::Status,
};

/// The state needed to import transactions.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The ledger to replace.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The response body for a successful import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Always [Status::Success].
    pub status: Status,
    /// Details for the user.
    pub message: String,
    /// What was loaded.
    #[serde(flatten)]
    pub report: ImportReport,
}

/// A route handler that replaces every transaction with those in the request body.
///
/// The body has the same shape as the export, extra fields such as the
/// summary are ignored.
pub async fn import_endpoint(
    State(state): State<ImportState>,
    JsonBody(snapshot): JsonBody<Snapshot>,
) -> Response {
    match import(&state, snapshot) {
        Ok(response) => {
            tracing::info!(
                "imported {} transactions for {} accounts",
                response.report.total_transactions,
                response.report.accounts_count
            );
            Json(response).into_response()
        }
        Err(error) => {
            tracing::error!("could not import transactions: {error}");
            error.into_response()
        }
    }
}

fn import(state: &ImportState, snapshot: Snapshot) -> Result<ImportResponse, Error> {
    let report = lock_ledger(&state.ledger)?.import_all(snapshot)?;

    Ok(ImportResponse {
        status: Status::Success,
        message: "Data imported successfully".to_owned(),
        report,
    })
}
