//! Note records and request/response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::http::error::ApiError;
use crate::sanitize::sanitize;

/// A row of the `notes` table, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub folder_id: i64,
    pub modified: DateTime<Utc>,
}

/// Client-facing note. `title` and `content` are HTML-escaped;
/// `folder_id` and `modified` pass through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub folder_id: i64,
    pub modified: DateTime<Utc>,
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: sanitize(&note.title).into_owned(),
            content: sanitize(&note.content).into_owned(),
            folder_id: note.folder_id,
            modified: note.modified,
        }
    }
}

/// `POST /notes` body. Any client-sent `modified` is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
}

/// A validated note ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub folder_id: i64,
}

impl CreateNoteRequest {
    /// Fails on the first missing field, in declaration order.
    pub fn validate(self) -> Result<NewNote, ApiError> {
        let title = self.title.ok_or_else(|| ApiError::missing_field("title"))?;
        let content = self
            .content
            .ok_or_else(|| ApiError::missing_field("content"))?;
        let folder_id = self
            .folder_id
            .ok_or_else(|| ApiError::missing_field("folder_id"))?;

        Ok(NewNote {
            title,
            content,
            folder_id,
        })
    }
}

/// `PATCH /notes/{id}` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
}

/// The supplied subset of note fields; `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
}

impl UpdateNoteRequest {
    pub fn validate(self) -> Result<NoteChanges, ApiError> {
        if self.title.is_none() && self.content.is_none() && self.folder_id.is_none() {
            return Err(ApiError::Validation(
                "Request body must contain either 'title', 'content', or 'folder_id'".to_string(),
            ));
        }

        Ok(NoteChanges {
            title: self.title,
            content: self.content,
            folder_id: self.folder_id,
        })
    }
}
