//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (DATABASE_URL, RUN_MODE, ...)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → owned by HttpServer for the life of the process
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup and never mutated afterwards
//! - All fields have defaults to allow minimal (or absent) config files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, load_with_env, ConfigError};
pub use schema::AppConfig;
pub use schema::DatabaseConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RunMode;
pub use schema::SecurityConfig;
pub use schema::TimeoutConfig;
