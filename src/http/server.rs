//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the folder and note handlers
//! - Wire up middleware (request ID, tracing, timeout, limits, headers)
//! - Install production error redaction and panic recovery
//! - Serve until shutdown, then close the database pool

use std::time::Duration;

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::folders::{self, FolderService};
use crate::http::error::ErrorBody;
use crate::http::request::{request_span, UuidRequestId, X_REQUEST_ID};
use crate::http::response::{
    handle_panic, method_not_allowed, redact_server_errors, render_timeout, route_not_found,
};
use crate::lifecycle::shutdown::wait_for_shutdown;
use crate::notes::{self, NoteService};
use crate::observability::metrics;
use crate::store;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub folders: FolderService,
    pub notes: NoteService,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            folders: FolderService::new(pool.clone()),
            notes: NoteService::new(pool.clone()),
            pool,
        }
    }
}

/// HTTP server for the folders and notes API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    pool: SqlitePool,
}

impl HttpServer {
    /// Create a new HTTP server over an already opened pool.
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        let state = AppState::new(pool.clone());
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            pool,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(root))
            .route("/health", get(health))
            .merge(folders::routes::router())
            .merge(notes::routes::router())
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(route_not_found)
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(CatchPanicLayer::custom(handle_panic));

        if config.mode.is_production() {
            router = router.layer(middleware::from_fn(redact_server_errors));
        }

        if config.security.enable_headers {
            router = router
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ));
        }

        if config.security.cors_permissive {
            router = router.layer(CorsLayer::permissive());
        }

        router
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn(render_timeout))
            .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Run the server on `listener` until `shutdown` fires or the process
    /// is signalled, then close the pool.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = %self.config.mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        self.pool.close().await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving the app without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

async fn root() -> &'static str {
    "Hello, world!"
}

async fn health(State(state): State<AppState>) -> Response {
    match store::ping(&state.pool).await {
        Ok(()) => Json(json!({ "status": "ok" })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody::new("database unavailable")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, RunMode};
    use tower::ServiceExt;

    async fn server(mode: RunMode) -> HttpServer {
        let pool = store::connect(&DatabaseConfig::in_memory()).await.unwrap();
        let config = AppConfig {
            mode,
            ..AppConfig::default()
        };
        HttpServer::new(config, pool)
    }

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root() {
        let response = server(RunMode::Test).await.router().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "Hello, world!");
    }

    #[tokio::test]
    async fn test_health_and_headers() {
        let response = server(RunMode::Test)
            .await
            .router()
            .oneshot(get_request("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_health_reports_closed_pool() {
        let server = server(RunMode::Test).await;
        server.pool.close().await;

        let response = server.router().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(text(response).await.contains("database unavailable"));
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let request = axum::http::Request::builder()
            .uri("/")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let response = server(RunMode::Test).await.router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_with_error_body() {
        let response = server(RunMode::Test)
            .await
            .router()
            .oneshot(get_request("/nothing-here"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            text(response).await,
            r#"{"error":{"message":"Route doesn't exist"}}"#
        );
    }

    #[tokio::test]
    async fn test_wrong_method_is_405_with_error_body() {
        let request = axum::http::Request::builder()
            .method("PUT")
            .uri("/folders")
            .body(Body::empty())
            .unwrap();

        let response = server(RunMode::Test).await.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            text(response).await,
            r#"{"error":{"message":"Method not allowed"}}"#
        );
    }
}
