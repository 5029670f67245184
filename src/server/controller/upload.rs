use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::ErrorDto,
        game::GameVersionDto,
        upload::{CompleteUploadDto, CreateUploadDto, UploadSessionDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::upload::{NewUpload, UploadService},
        state::AppState,
    },
};

/// Tag for grouping upload endpoints in OpenAPI documentation
pub static UPLOAD_TAG: &str = "upload";

fn upload_service(state: &AppState) -> UploadService<'_> {
    UploadService::new(&state.db, state.storage.as_ref())
}

/// Open a chunked upload for a new version of a game.
///
/// # Access Control
/// - Owning developer or `Admin`
///
/// # Arguments
/// - `payload` - Target game and version, file name, chunk count and total size
///
/// # Returns
/// - `201 Created` - Session in progress
/// - `400 Bad Request` - Invalid fields, or the version exists or is already uploading
/// - `403 Forbidden` - Caller does not manage the game
/// - `404 Not Found` - Game not found
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = UPLOAD_TAG,
    request_body = CreateUploadDto,
    responses(
        (status = 201, description = "Upload session opened", body = UploadSessionDto),
        (status = 400, description = "Invalid upload", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not manage this game", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUploadDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let session = upload_service(&state)
        .create(
            &current,
            NewUpload {
                game_id: payload.game_id,
                version: payload.version,
                file_name: payload.file_name,
                total_chunks: payload.total_chunks,
                total_size: payload.total_size,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

/// Send one chunk as the raw request body.
///
/// Re-sending an index replaces the earlier chunk.
#[utoipa::path(
    put,
    path = "/api/uploads/{id}/chunks/{index}",
    tag = UPLOAD_TAG,
    params(
        ("id" = String, Path, description = "Upload session ID"),
        ("index" = i32, Path, description = "Zero-based chunk index")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Chunk stored", body = UploadSessionDto),
        (status = 400, description = "Index out of range, empty chunk, or session finished", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Session belongs to another user", body = ErrorDto),
        (status = 404, description = "Upload not found", body = ErrorDto),
        (status = 413, description = "Chunk too large"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upload_chunk(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, index)): Path<(String, i32)>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let session = upload_service(&state)
        .upload_chunk(&current, &id, index, body)
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/uploads/{id}",
    tag = UPLOAD_TAG,
    params(("id" = String, Path, description = "Upload session ID")),
    responses(
        (status = 200, description = "Upload progress", body = UploadSessionDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Session belongs to another user", body = ErrorDto),
        (status = 404, description = "Upload not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let session = upload_service(&state).get(&current, &id).await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Assemble the chunks into a released version.
///
/// # Returns
/// - `201 Created` - The new version with its size and SHA-256
/// - `400 Bad Request` - Chunks missing or sizes do not add up
#[utoipa::path(
    post,
    path = "/api/uploads/{id}/complete",
    tag = UPLOAD_TAG,
    params(("id" = String, Path, description = "Upload session ID")),
    request_body = CompleteUploadDto,
    responses(
        (status = 201, description = "Version released", body = GameVersionDto),
        (status = 400, description = "Upload incomplete", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Session belongs to another user", body = ErrorDto),
        (status = 404, description = "Upload not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn complete_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<CompleteUploadDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let version = upload_service(&state)
        .complete(&current, &id, payload.changelog)
        .await?;

    Ok((StatusCode::CREATED, Json(version.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/uploads/{id}",
    tag = UPLOAD_TAG,
    params(("id" = String, Path, description = "Upload session ID")),
    responses(
        (status = 204, description = "Upload aborted"),
        (status = 400, description = "Upload already finished", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Session belongs to another user", body = ErrorDto),
        (status = 404, description = "Upload not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn abort_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    upload_service(&state).abort(&current, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
