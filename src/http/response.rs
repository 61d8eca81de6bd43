//! Response post-processing.
//!
//! # Responsibilities
//! - Hide internal error detail from clients in production
//! - Turn handler panics into the standard 500 error body
//! - Give unmatched routes, wrong methods and timeouts the standard body
//!
//! # Design Decisions
//! - Handlers always render full detail; redaction is a layer that is only
//!   installed in production, so development keeps the real message
//! - Only 500 is redacted; 503 from `/health` carries no internals

use std::any::Any;

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::error::{ApiError, ErrorBody};

pub const GENERIC_SERVER_ERROR: &str = "server error";

/// Replace the body of any 500 response with the generic message.
pub async fn redact_server_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let (_, body) = Json(ErrorBody::new(GENERIC_SERVER_ERROR))
        .into_response()
        .into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Response::from_parts(parts, body)
}

/// Replace the bare 408 produced by `TimeoutLayer` with the standard body.
pub async fn render_timeout(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.into_response();
    }
    response
}

/// Router fallback for paths no route matches.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Fallback for a matched path without a handler for the method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// `CatchPanicLayer` handler.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    async fn message_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        body.error.message
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/boom",
                get(|| async { ApiError::Internal("disk on fire".into()) }),
            )
            .route(
                "/missing",
                get(|| async { ApiError::NotFound { resource: "Note" } }),
            )
            .layer(axum::middleware::from_fn(redact_server_errors))
    }

    #[tokio::test]
    async fn test_redacts_500() {
        let response = app()
            .oneshot(axum::http::Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message_of(response).await, GENERIC_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_leaves_client_errors_alone() {
        let response = app()
            .oneshot(axum::http::Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(message_of(response).await, "Note doesn't exist");
    }

    #[tokio::test]
    async fn test_timeout_gets_error_body() {
        let app = Router::new()
            .route("/slow", get(|| async { StatusCode::REQUEST_TIMEOUT }))
            .route("/fine", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(render_timeout));

        let response = app
            .clone()
            .oneshot(axum::http::Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(message_of(response).await, "Request timed out");

        let response = app
            .oneshot(axum::http::Request::builder().uri("/fine").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_panic_becomes_500() {
        let response = handle_panic(Box::new("kaboom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message_of(response).await, "handler panicked: kaboom");
    }
}
