//! Folder resource.
//!
//! # Data Flow
//! ```text
//! /folders, /folders/{id}
//!     → routes.rs (load by id, validate body, status codes, Location)
//!     → service.rs (one parameterized statement per operation)
//!     → model.rs (Folder row → sanitized FolderResponse)
//! ```
//!
//! # Design Decisions
//! - A folder still referenced by notes cannot be deleted (409)
//! - `name` is stored verbatim and escaped only on the way out

pub mod model;
pub mod routes;
pub mod service;

pub use model::{
    CreateFolderRequest, Folder, FolderChanges, FolderResponse, NewFolder, UpdateFolderRequest,
};
pub use service::FolderService;
