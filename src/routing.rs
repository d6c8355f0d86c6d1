//! Application router configuration.

use std::path::Path;

use axum::{
    Router,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::{
    AppState, endpoints,
    export::export_endpoint,
    import::import_endpoint,
    logging::logging_middleware,
    response::StatusMessage,
    search::{search_by_category_endpoint, search_by_date_endpoint, search_by_iban_endpoint},
    summary::get_summary_endpoint,
    transaction::{
        add_expense_endpoint, add_income_endpoint, get_transactions_endpoint,
        remove_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// If `static_dir` is given, its `index.html` is served at the root and the
/// rest of its files under [endpoints::STATIC].
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route(endpoints::ADD_INCOME, post(add_income_endpoint))
        .route(endpoints::ADD_EXPENSE, post(add_expense_endpoint))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(
            endpoints::REMOVE_TRANSACTION,
            delete(remove_transaction_endpoint),
        )
        .route(endpoints::SEARCH_BY_DATE, get(search_by_date_endpoint))
        .route(endpoints::SEARCH_BY_IBAN, get(search_by_iban_endpoint))
        .route(
            endpoints::SEARCH_BY_CATEGORY,
            get(search_by_category_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(endpoints::EXPORT, get(export_endpoint))
        .route(endpoints::IMPORT, post(import_endpoint));

    let router = match static_dir {
        Some(static_dir) => router
            .route_service(endpoints::ROOT, ServeFile::new(static_dir.join("index.html")))
            .nest_service(endpoints::STATIC, ServeDir::new(static_dir)),
        None => router,
    };

    router
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_404_not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        StatusMessage::error(format!("No route for {}", uri.path())),
    )
        .into_response()
}
