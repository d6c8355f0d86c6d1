//! Defines the endpoint for downloading the whole ledger.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    app_state::lock_ledger,
    ledger::{Ledger, Snapshot, Summary},
    timezone::local_now,
};

/// The state needed to export the ledger.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The ledger to export.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Every transaction plus a summary, as downloaded from the export endpoint.
///
/// The document can be sent back to the import endpoint as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// The transactions grouped by account.
    #[serde(flatten)]
    pub snapshot: Snapshot,
    /// The totals at the time of the export.
    pub summary: Summary,
    /// When the export was made.
    #[serde(with = "time::serde::rfc3339")]
    pub export_timestamp: OffsetDateTime,
}

/// A route handler for downloading every transaction with a summary.
pub async fn export_endpoint(State(state): State<ExportState>) -> Response {
    match export(&state) {
        Ok(document) => Json(document).into_response(),
        Err(error) => {
            tracing::error!("could not export ledger: {error}");
            error.into_response()
        }
    }
}

fn export(state: &ExportState) -> Result<ExportDocument, Error> {
    let export_timestamp = local_now(&state.local_timezone)?;
    let ledger = lock_ledger(&state.ledger)?;

    Ok(ExportDocument {
        snapshot: ledger.export_all(),
        summary: ledger.summary(),
        export_timestamp,
    })
}
