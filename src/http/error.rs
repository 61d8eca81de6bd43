//! API error taxonomy and its JSON rendering.
//!
//! Every failure leaves the server as `{"error": {"message": "..."}}`.
//! Client-caused errors (400/404/409) carry a message meant for the caller.
//! Server errors (500) carry the underlying error text; in production the
//! redaction layer in `response.rs` swaps that for a generic message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// The addressed row does not exist.
    #[error("{resource} doesn't exist")]
    NotFound { resource: &'static str },

    /// The request conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    /// The body exceeded the configured size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// No route matches the request path.
    #[error("Route doesn't exist")]
    RouteNotFound,

    /// The path exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Storage layer failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else that should never reach the client verbatim.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn missing_field(field: &str) -> Self {
        ApiError::Validation(format!("Missing '{}' in request body", field))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Map a statement's affected-row count to a 404 when the row vanished
/// after it was loaded.
pub fn ensure_affected(rows: u64, resource: &'static str) -> Result<(), ApiError> {
    if rows == 0 {
        Err(ApiError::NotFound { resource })
    } else {
        Ok(())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(rejection.body_text()),
            _ => ApiError::Validation(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorMessage {
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::missing_field("name").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound { resource: "Note" }.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Conflict("busy".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::PayloadTooLarge("too big".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::missing_field("folder_id").to_string(),
            "Missing 'folder_id' in request body"
        );
        assert_eq!(
            ApiError::NotFound { resource: "Folder" }.to_string(),
            "Folder doesn't exist"
        );
    }

    #[tokio::test]
    async fn test_renders_error_body() {
        let response = ApiError::NotFound { resource: "Note" }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, ErrorBody::new("Note doesn't exist"));
    }

    #[test]
    fn test_ensure_affected() {
        assert!(ensure_affected(1, "Note").is_ok());

        let err = ensure_affected(0, "Folder").unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Folder doesn't exist");
    }

    #[tokio::test]
    async fn test_server_error_keeps_detail() {
        let response = ApiError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert!(body.error.message.starts_with("database error: "));
    }
}
