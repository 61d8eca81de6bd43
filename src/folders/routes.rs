//! Folder HTTP handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::folders::model::{CreateFolderRequest, Folder, FolderResponse, UpdateFolderRequest};
use crate::folders::service::FolderService;
use crate::http::error::{ensure_affected, ApiError};
use crate::http::extract::{parse_id, JsonBody};
use crate::http::server::AppState;

const RESOURCE: &str = "Folder";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/folders", get(list_folders).post(create_folder))
        .route(
            "/folders/{id}",
            get(get_folder).patch(update_folder).delete(delete_folder),
        )
}

/// Resolve the `{id}` segment to a stored folder or a 404.
async fn load_folder(service: &FolderService, raw_id: &str) -> Result<Folder, ApiError> {
    let not_found = || ApiError::NotFound { resource: RESOURCE };
    let id = parse_id(raw_id).ok_or_else(not_found)?;
    service.get(id).await?.ok_or_else(not_found)
}

async fn list_folders(State(state): State<AppState>) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let folders = state.folders.list().await?;
    Ok(Json(folders.iter().map(FolderResponse::from).collect()))
}

async fn get_folder(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folder = load_folder(&state.folders, &raw_id).await?;
    Ok(Json(FolderResponse::from(&folder)))
}

async fn create_folder(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateFolderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_folder = body.validate()?;
    let folder = state.folders.insert(&new_folder).await?;

    tracing::info!(folder_id = folder.id, "Folder created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/folders/{}", folder.id))],
        Json(FolderResponse::from(&folder)),
    ))
}

async fn update_folder(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<JsonBody<UpdateFolderRequest>, ApiError>,
) -> Result<StatusCode, ApiError> {
    // 404 takes precedence over a bad body
    let folder = load_folder(&state.folders, &raw_id).await?;
    let JsonBody(body) = body?;
    let changes = body.validate()?;

    let rows = state.folders.update(folder.id, &changes).await?;
    ensure_affected(rows, RESOURCE)?;

    tracing::info!(folder_id = folder.id, "Folder updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_folder(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let folder = load_folder(&state.folders, &raw_id).await?;

    let notes = state.folders.note_count(folder.id).await?;
    if notes > 0 {
        tracing::debug!(folder_id = folder.id, notes, "Refusing to delete non-empty folder");
        return Err(folder_not_empty());
    }

    let rows = state.folders.delete(folder.id).await.map_err(|e| match e {
        // a note was added between the count and the delete
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => folder_not_empty(),
        other => ApiError::from(other),
    })?;
    ensure_affected(rows, RESOURCE)?;

    tracing::info!(folder_id = folder.id, "Folder deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn folder_not_empty() -> ApiError {
    ApiError::Conflict("Folder still contains notes".to_string())
}
