//! Folder records and request/response bodies.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::http::error::ApiError;
use crate::sanitize::sanitize;

/// A row of the `folders` table, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

/// Client-facing folder with `name` HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Folder> for FolderResponse {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: sanitize(&folder.name).into_owned(),
        }
    }
}

/// `POST /folders` body. `null` and an absent key both mean "not supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A validated folder ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFolder {
    pub name: String,
}

impl CreateFolderRequest {
    pub fn validate(self) -> Result<NewFolder, ApiError> {
        let name = self.name.ok_or_else(|| ApiError::missing_field("name"))?;
        Ok(NewFolder { name })
    }
}

/// `PATCH /folders/{id}` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The fields a folder update replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderChanges {
    pub name: String,
}

impl UpdateFolderRequest {
    pub fn validate(self) -> Result<FolderChanges, ApiError> {
        match self.name {
            Some(name) => Ok(FolderChanges { name }),
            None => Err(ApiError::Validation(
                "Request body must contain 'name'".to_string(),
            )),
        }
    }
}
