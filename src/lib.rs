//! Folders and notes REST API library.

pub mod client;
pub mod config;
pub mod folders;
pub mod http;
pub mod lifecycle;
pub mod notes;
pub mod observability;
pub mod sanitize;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
