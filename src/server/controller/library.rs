use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::ErrorDto,
        library::{LibraryEntryDto, PlayTimeDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::library::LibraryEntry,
        service::library::LibraryService, state::AppState,
    },
};

/// Tag for grouping library endpoints in OpenAPI documentation
pub static LIBRARY_TAG: &str = "library";

/// Games the caller owns, with the latest released version of each.
#[utoipa::path(
    get,
    path = "/api/library",
    tag = LIBRARY_TAG,
    responses(
        (status = 200, description = "Owned games", body = Vec<LibraryEntryDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_library(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let entries = LibraryService::new(&state.db).list(current.id()).await?;

    Ok((
        StatusCode::OK,
        Json(
            entries
                .into_iter()
                .map(LibraryEntry::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/library/{game_id}",
    tag = LIBRARY_TAG,
    params(("game_id" = i32, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Library entry", body = LibraryEntryDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Game not owned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_library_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(game_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let entry = LibraryService::new(&state.db)
        .get(current.id(), game_id)
        .await?;

    Ok((StatusCode::OK, Json(entry.into_dto())))
}

/// Report a finished play session.
///
/// # Arguments
/// - `payload` - Session length in seconds, 1 to 86400
///
/// # Returns
/// - `200 OK` - Entry with the new total
/// - `400 Bad Request` - Seconds out of range
/// - `404 Not Found` - Game not owned
#[utoipa::path(
    post,
    path = "/api/library/{game_id}/playtime",
    tag = LIBRARY_TAG,
    params(("game_id" = i32, Path, description = "Game ID")),
    request_body = PlayTimeDto,
    responses(
        (status = 200, description = "Play time recorded", body = LibraryEntryDto),
        (status = 400, description = "Seconds out of range", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Game not owned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn add_play_time(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(game_id): Path<i32>,
    Json(payload): Json<PlayTimeDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let entry = LibraryService::new(&state.db)
        .add_play_time(current.id(), game_id, payload.seconds)
        .await?;

    Ok((StatusCode::OK, Json(entry.into_dto())))
}
