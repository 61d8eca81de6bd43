//! Folders and notes REST API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, timeout, limits, headers)
//!                          │
//!                          ▼
//!                     folders::routes / notes::routes
//!                          │  load by id (404) → validate body (400)
//!                          ▼
//!                     FolderService / NoteService ───▶ sqlx pool ───▶ SQLite
//!                          │
//!                          ▼
//!     Client Response  sanitize (HTML escape title/name/content)
//!     ◀──────────────
//! ```

use std::path::PathBuf;

use clap::Parser;

use notes_api::lifecycle::{self, Shutdown};
use notes_api::observability::logging;

#[derive(Parser)]
#[command(name = "notes-api", version)]
#[command(about = "REST API for folders and notes", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "NOTES_API_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = notes_api::config::load(args.config.as_deref())?;
    logging::init_logging(&config.observability, config.mode)?;

    tracing::info!("notes-api v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    lifecycle::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
