//! Typed async client for the folders and notes API.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::folders::{CreateFolderRequest, FolderResponse, UpdateFolderRequest};
use crate::http::error::ErrorBody;
use crate::notes::{CreateNoteRequest, NoteResponse, UpdateNoteRequest};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

/// A created resource together with its `Location` header.
#[derive(Debug, Clone)]
pub struct Created<T> {
    pub location: Option<String>,
    pub body: T,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_folders(&self) -> Result<Vec<FolderResponse>, ClientError> {
        self.get_json("/folders").await
    }

    pub async fn get_folder(&self, id: i64) -> Result<FolderResponse, ClientError> {
        self.get_json(&format!("/folders/{}", id)).await
    }

    pub async fn create_folder(
        &self,
        body: &CreateFolderRequest,
    ) -> Result<Created<FolderResponse>, ClientError> {
        self.post_json("/folders", body).await
    }

    pub async fn update_folder(
        &self,
        id: i64,
        body: &UpdateFolderRequest,
    ) -> Result<(), ClientError> {
        self.patch_json(&format!("/folders/{}", id), body).await
    }

    pub async fn delete_folder(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/folders/{}", id)).await
    }

    pub async fn list_notes(&self) -> Result<Vec<NoteResponse>, ClientError> {
        self.get_json("/notes").await
    }

    pub async fn get_note(&self, id: i64) -> Result<NoteResponse, ClientError> {
        self.get_json(&format!("/notes/{}", id)).await
    }

    pub async fn create_note(
        &self,
        body: &CreateNoteRequest,
    ) -> Result<Created<NoteResponse>, ClientError> {
        self.post_json("/notes", body).await
    }

    pub async fn update_note(&self, id: i64, body: &UpdateNoteRequest) -> Result<(), ClientError> {
        self.patch_json(&format!("/notes/{}", id), body).await
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/notes/{}", id)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.client.get(self.url(path)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<Created<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = check(self.client.post(self.url(path)).json(body).send().await?).await?;
        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Created {
            location,
            body: resp.json().await?,
        })
    }

    async fn patch_json<B>(&self, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        check(self.client.patch(self.url(path)).json(body).send().await?).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        check(self.client.delete(self.url(path)).send().await?).await?;
        Ok(())
    }
}

/// Turn non-success responses into [`ClientError::Api`], preferring the
/// message from the standard error body.
async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error.message,
        Err(_) => text,
    };
    Err(ClientError::Api { status, message })
}
