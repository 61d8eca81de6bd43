//! Note HTTP handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::http::error::{ensure_affected, ApiError};
use crate::http::extract::{parse_id, JsonBody};
use crate::http::server::AppState;
use crate::notes::model::{CreateNoteRequest, Note, NoteResponse, UpdateNoteRequest};
use crate::notes::service::NoteService;

const RESOURCE: &str = "Note";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).patch(update_note).delete(delete_note),
        )
}

async fn load_note(service: &NoteService, raw_id: &str) -> Result<Note, ApiError> {
    let not_found = || ApiError::NotFound { resource: RESOURCE };
    let id = parse_id(raw_id).ok_or_else(not_found)?;
    service.get(id).await?.ok_or_else(not_found)
}

async fn ensure_folder_exists(service: &NoteService, folder_id: i64) -> Result<(), ApiError> {
    if service.folder_exists(folder_id).await? {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Folder with id {} does not exist",
            folder_id
        )))
    }
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = state.notes.list().await?;
    Ok(Json(notes.iter().map(NoteResponse::from).collect()))
}

async fn get_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = load_note(&state.notes, &raw_id).await?;
    Ok(Json(NoteResponse::from(&note)))
}

async fn create_note(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_note = body.validate()?;
    ensure_folder_exists(&state.notes, new_note.folder_id).await?;

    let note = state.notes.insert(&new_note).await?;

    tracing::info!(note_id = note.id, folder_id = note.folder_id, "Note created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/notes/{}", note.id))],
        Json(NoteResponse::from(&note)),
    ))
}

async fn update_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<JsonBody<UpdateNoteRequest>, ApiError>,
) -> Result<StatusCode, ApiError> {
    let note = load_note(&state.notes, &raw_id).await?;
    let JsonBody(body) = body?;
    let changes = body.validate()?;
    if let Some(folder_id) = changes.folder_id {
        ensure_folder_exists(&state.notes, folder_id).await?;
    }

    let rows = state.notes.update(note.id, &changes).await?;
    ensure_affected(rows, RESOURCE)?;

    tracing::info!(note_id = note.id, "Note updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let note = load_note(&state.notes, &raw_id).await?;
    let rows = state.notes.delete(note.id).await?;
    ensure_affected(rows, RESOURCE)?;

    tracing::info!(note_id = note.id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}
