//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → folders::routes / notes::routes (handlers)
//!     → error.rs (ApiError → JSON error body)
//!     → response.rs (production redaction, panic recovery)
//!     → Send to client
//! ```

pub mod error;
pub mod extract;
pub mod request;
pub mod response;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use extract::JsonBody;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
