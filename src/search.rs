//! Defines the endpoints for searching transactions by date, account and category.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    app_state::lock_ledger,
    ledger::Ledger,
    response::{Status, StatusMessage},
    transaction::{Transaction, parse_date},
};

/// The state needed to search transactions.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// The ledger to search.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for SearchState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The response body for a search with at least one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Always [Status::Success].
    pub status: Status,
    /// The matching transactions.
    pub results: Vec<Transaction>,
    /// The number of matching transactions.
    pub count: usize,
    /// The balance of the account, only included for account searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
}

impl SearchResults {
    fn new(results: Vec<Transaction>) -> Self {
        Self {
            status: Status::Success,
            count: results.len(),
            results,
            balance: None,
        }
    }
}

/// A route handler for finding the transactions dated `date` (`YYYY-MM-DD`).
///
/// A date that cannot be parsed matches no transactions.
pub async fn search_by_date_endpoint(
    State(state): State<SearchState>,
    Path(date): Path<String>,
) -> Response {
    let parsed_date = parse_date(&date)
        .inspect_err(|error| tracing::debug!("searching by unparsable date: {error}"))
        .ok();
    let result = lock_ledger(&state.ledger).map(|ledger| date_results(&ledger, parsed_date));

    respond(result, || format!("No transactions found for date: {date}"))
}

/// A route handler for finding the transactions and balance of an account.
pub async fn search_by_iban_endpoint(
    State(state): State<SearchState>,
    Path(iban): Path<String>,
) -> Response {
    let result = lock_ledger(&state.ledger).map(|ledger| account_results(&ledger, &iban));

    respond(result, || format!("No transactions found for IBAN: {iban}"))
}

/// A route handler for finding the transactions in a category, ignoring case.
pub async fn search_by_category_endpoint(
    State(state): State<SearchState>,
    Path(category): Path<String>,
) -> Response {
    let result = lock_ledger(&state.ledger).map(|ledger| category_results(&ledger, &category));

    respond(result, || {
        format!("No transactions found for category: {category}")
    })
}

fn date_results(ledger: &Ledger, date: Option<Date>) -> SearchResults {
    match date {
        Some(date) => SearchResults::new(ledger.search_by_date(date).into_iter().cloned().collect()),
        None => SearchResults::new(Vec::new()),
    }
}

fn account_results(ledger: &Ledger, iban: &str) -> SearchResults {
    match ledger.search_by_account(iban) {
        Some(found) => SearchResults {
            balance: Some(found.balance),
            ..SearchResults::new(found.transactions.to_vec())
        },
        None => SearchResults::new(Vec::new()),
    }
}

fn category_results(ledger: &Ledger, category: &str) -> SearchResults {
    SearchResults::new(
        ledger
            .search_by_category(category)
            .into_iter()
            .cloned()
            .collect(),
    )
}

fn respond(
    result: Result<SearchResults, Error>,
    empty_message: impl FnOnce() -> String,
) -> Response {
    match result {
        Ok(results) if results.count == 0 => StatusMessage::info(empty_message()).into_response(),
        Ok(results) => Json(results).into_response(),
        Err(error) => {
            tracing::error!("could not search transactions: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        endpoints::{self, format_endpoint},
        ledger::Ledger,
        response::StatusMessage,
        search::{
            SearchResults, search_by_category_endpoint, search_by_date_endpoint,
            search_by_iban_endpoint,
        },
        test_utils::{amount, test_now, test_state},
        transaction::Transaction,
    };

    fn test_server(ledger: Ledger) -> TestServer {
        let app = Router::new()
            .route(endpoints::SEARCH_BY_DATE, get(search_by_date_endpoint))
            .route(endpoints::SEARCH_BY_IBAN, get(search_by_iban_endpoint))
            .route(endpoints::SEARCH_BY_CATEGORY, get(search_by_category_endpoint))
            .with_state(test_state(ledger));

        TestServer::new(app).expect("Could not create test server.")
    }

    fn test_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_income(
                Transaction::build("IBAN1", amount(dec!(100)), date!(2024 - 01 - 01)),
                test_now(),
            )
            .unwrap();
        ledger
            .add_expense(
                Transaction::build("IBAN1", amount(dec!(30)), date!(2024 - 01 - 02))
                    .description("coffee")
                    .category("Food"),
                test_now(),
            )
            .unwrap();
        ledger
    }

    #[tokio::test]
    async fn iban_search_includes_balance() {
        let server = test_server(test_ledger());

        let response = server
            .get(&format_endpoint(endpoints::SEARCH_BY_IBAN, "IBAN1"))
            .await;

        response.assert_status_ok();
        let body = response.json::<SearchResults>();
        assert_eq!(body.count, 2);
        assert_eq!(body.results.len(), 2);
        assert_eq!(body.balance, Some(dec!(70)));
    }

    #[tokio::test]
    async fn unknown_iban_is_info() {
        let server = test_server(test_ledger());

        let response = server
            .get(&format_endpoint(endpoints::SEARCH_BY_IBAN, "IBAN2"))
            .await;

        response.assert_status_ok();
        response.assert_json(&StatusMessage::info("No transactions found for IBAN: IBAN2"));
    }

    #[tokio::test]
    async fn date_search_has_no_balance() {
        let server = test_server(test_ledger());

        let response = server
            .get(&format_endpoint(endpoints::SEARCH_BY_DATE, "2024-01-02"))
            .await;

        response.assert_status_ok();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["description"], "coffee");
        assert!(body.get("balance").is_none());
    }

    #[tokio::test]
    async fn date_search_with_no_matches_is_info() {
        let server = test_server(test_ledger());

        let response = server
            .get(&format_endpoint(endpoints::SEARCH_BY_DATE, "2024-02-01"))
            .await;

        response.assert_json(&StatusMessage::info(
            "No transactions found for date: 2024-02-01",
        ));
    }

    #[tokio::test]
    async fn unparsable_date_is_info() {
        let server = test_server(test_ledger());

        for date in ["2024-02-30", "2024-1-5", "yesterday"] {
            let response = server
                .get(&format_endpoint(endpoints::SEARCH_BY_DATE, date))
                .await;

            response.assert_status_ok();
            response.assert_json(&StatusMessage::info(format!(
                "No transactions found for date: {date}"
            )));
        }
    }

    #[tokio::test]
    async fn category_search_ignores_case() {
        let server = test_server(test_ledger());

        let response = server
            .get(&format_endpoint(endpoints::SEARCH_BY_CATEGORY, "salary"))
            .await;

        let body = response.json::<SearchResults>();
        assert_eq!(body.count, 1);
        assert_eq!(body.results[0].category, "Salary");
    }

    #[tokio::test]
    async fn unknown_category_is_info() {
        let server = test_server(test_ledger());

        let response = server
            .get(&format_endpoint(endpoints::SEARCH_BY_CATEGORY, "Rent"))
            .await;

        response.assert_json(&StatusMessage::info("No transactions found for category: Rent"));
    }
}
