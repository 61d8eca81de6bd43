//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Metrics exporter → Database pool → Listener → Serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl+C / SIGTERM / Shutdown::trigger → Stop accepting → Drain → Close pool
//! ```
//!
//! # Design Decisions
//! - Ordered startup: the listener binds last (traffic only when ready)
//! - Fail fast: any startup error is fatal

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, StartupError};
