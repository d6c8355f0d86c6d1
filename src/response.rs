//! The JSON status messages returned by every endpoint.
//!
//! Each response body carries a `status` field. Warnings and informational
//! messages are not HTTP errors and are always sent with 200 OK.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The outcome of a request as reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The request was carried out.
    Success,
    /// The request was rejected.
    Error,
    /// The request was not carried out because it would break a budget rule.
    Warning,
    /// There was nothing to show, e.g. a search with no matches.
    Info,
}

/// A response body with only a status and a human readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// The outcome of the request.
    pub status: Status,
    /// Details for the user.
    pub message: String,
}

impl StatusMessage {
    /// Create a success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Status::Success, message)
    }

    /// Create an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Status::Error, message)
    }

    /// Create a warning message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Status::Warning, message)
    }

    /// Create an informational message.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Status::Info, message)
    }

    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for StatusMessage {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::json;

    use crate::test_utils::{assert_content_type, response_json};

    use super::StatusMessage;

    #[test]
    fn status_serializes_in_lowercase() {
        let value = serde_json::to_value(StatusMessage::info("No transactions found")).unwrap();

        assert_eq!(
            value,
            json!({"status": "info", "message": "No transactions found"})
        );
    }

    #[tokio::test]
    async fn warnings_are_sent_with_ok_status() {
        let response = StatusMessage::warning("careful").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "application/json");
        assert_eq!(
            response_json(response).await,
            json!({"status": "warning", "message": "careful"})
        );
    }
}
