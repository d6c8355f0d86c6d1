//! The API endpoints URIs.
//!
//! Endpoints that take a parameter, e.g., '/api/search/iban/{iban}', are
//! matched by the router with the parameter in braces.

/// The route for recording income.
pub const ADD_INCOME: &str = "/api/add_income";
/// The route for recording an expense.
pub const ADD_EXPENSE: &str = "/api/add_expense";
/// The route for listing every transaction.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for removing a transaction.
pub const REMOVE_TRANSACTION: &str = "/api/remove_transaction";
/// The route for finding transactions on a date.
pub const SEARCH_BY_DATE: &str = "/api/search/date/{date}";
/// The route for finding the transactions and balance of an account.
pub const SEARCH_BY_IBAN: &str = "/api/search/iban/{iban}";
/// The route for finding transactions in a category.
pub const SEARCH_BY_CATEGORY: &str = "/api/search/category/{category}";
/// The route for the totals over all transactions.
pub const SUMMARY: &str = "/api/summary";
/// The route for downloading every transaction.
pub const EXPORT: &str = "/api/export";
/// The route for replacing every transaction with an uploaded export.
pub const IMPORT: &str = "/api/import";
/// The route for the dashboard page.
pub const ROOT: &str = "/";
/// The route prefix for the dashboard's static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/search/iban/{iban}', '{iban}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter, and that `value` is already safe to use in a URI.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
