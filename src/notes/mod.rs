//! Note resource.
//!
//! Same shape as the folder resource with three writable fields
//! (`title`, `content`, `folder_id`) and a server-owned `modified`
//! timestamp that is refreshed on every create and update.

pub mod model;
pub mod routes;
pub mod service;

pub use model::{CreateNoteRequest, NewNote, Note, NoteChanges, NoteResponse, UpdateNoteRequest};
pub use service::NoteService;
