use axum::{
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderMap, HeaderName, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use tokio_util::io::ReaderStream;
use validator::Validate;

use crate::{
    model::{
        api::{clamp_page, ErrorDto, PageDto},
        game::{CreateGameDto, GameDto, GameSearchParams, GameVersionDto, UpdateGameDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::game::{CreateGameParam, Game, GameSearchParam, GameVersion, UpdateGameParam},
        service::game::GameService,
        state::AppState,
    },
};

/// Tag for grouping game endpoints in OpenAPI documentation
pub static GAME_TAG: &str = "game";

/// Header carrying the lowercase hex SHA-256 of a downloaded binary.
pub const CONTENT_SHA256: HeaderName = HeaderName::from_static("x-content-sha256");

fn game_service(state: &AppState) -> GameService<'_> {
    GameService::new(&state.db, state.storage.as_ref())
}

/// Browse the published catalog.
///
/// # Access Control
/// - Public
///
/// # Arguments
/// - `params` - Page, page size, title search and genre filter
///
/// # Returns
/// - `200 OK` - Page of published games ordered by title
#[utoipa::path(
    get,
    path = "/api/games",
    tag = GAME_TAG,
    params(GameSearchParams),
    responses(
        (status = 200, description = "Page of published games", body = PageDto<GameDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<GameSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = clamp_page(params.page, params.entries);

    let games = game_service(&state)
        .search(GameSearchParam {
            search: params.search,
            genre: params.genre,
            page,
            per_page,
        })
        .await?;

    Ok((StatusCode::OK, Json(games.into_dto(Game::into_dto))))
}

/// Get one game.
///
/// Drafts are visible to their developer and admins only.
#[utoipa::path(
    get,
    path = "/api/games/{id}",
    tag = GAME_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    responses(
        (status = 200, description = "The game", body = GameDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state, &headers).optional().await?;

    let game = game_service(&state).get(id, viewer.as_ref()).await?;

    Ok((StatusCode::OK, Json(game.into_dto())))
}

/// Create a draft game owned by the caller.
///
/// # Access Control
/// - `Developer`
///
/// # Returns
/// - `201 Created` - The draft
/// - `400 Bad Request` - Invalid title, description or price
/// - `403 Forbidden` - Caller is not a developer
#[utoipa::path(
    post,
    path = "/api/games",
    tag = GAME_TAG,
    request_body = CreateGameDto,
    responses(
        (status = 201, description = "Draft created", body = GameDto),
        (status = 400, description = "Invalid game data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a developer", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateGameDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers)
        .require(&[Permission::Developer])
        .await?;
    payload.validate()?;

    let game = game_service(&state)
        .create(CreateGameParam {
            developer_id: current.id(),
            title: payload.title,
            short_description: payload.short_description,
            description: payload.description,
            genre: payload.genre,
            price_cents: payload.price_cents,
            release_date: payload.release_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(game.into_dto())))
}

/// Update a game.
///
/// # Access Control
/// - Owning developer or `Admin`
#[utoipa::path(
    put,
    path = "/api/games/{id}",
    tag = GAME_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    request_body = UpdateGameDto,
    responses(
        (status = 200, description = "Game updated", body = GameDto),
        (status = 400, description = "Invalid game data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not manage this game", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateGameDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let game = game_service(&state)
        .update(
            &current,
            id,
            UpdateGameParam {
                title: payload.title,
                short_description: payload.short_description,
                description: payload.description,
                genre: payload.genre,
                price_cents: payload.price_cents,
                release_date: payload.release_date,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(game.into_dto())))
}

/// Publish a game. Requires at least one uploaded version.
#[utoipa::path(
    post,
    path = "/api/games/{id}/publish",
    tag = GAME_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game published", body = GameDto),
        (status = 400, description = "Game has no versions", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not manage this game", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn publish_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let game = game_service(&state).set_published(&current, id, true).await?;

    Ok((StatusCode::OK, Json(game.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/games/{id}/unpublish",
    tag = GAME_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game unpublished", body = GameDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not manage this game", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn unpublish_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let game = game_service(&state).set_published(&current, id, false).await?;

    Ok((StatusCode::OK, Json(game.into_dto())))
}

/// Soft delete a game. Recorded in the audit log.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    tag = GAME_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    responses(
        (status = 204, description = "Game deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    game_service(&state).delete(current.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Upload cover art. Same image rules as avatars.
#[utoipa::path(
    put,
    path = "/api/games/{id}/cover",
    tag = GAME_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    request_body(content = Vec<u8>, content_type = "image/png"),
    responses(
        (status = 200, description = "Cover stored", body = GameDto),
        (status = 400, description = "Unsupported or oversized image", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not manage this game", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn set_cover(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    let game = game_service(&state)
        .set_cover(&current, id, content_type, body)
        .await?;

    Ok((StatusCode::OK, Json(game.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/games/{id}/versions",
    tag = GAME_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Released versions, newest first", body = Vec<GameVersionDto>),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_versions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state, &headers).optional().await?;

    let versions = game_service(&state).versions(id, viewer.as_ref()).await?;

    Ok((
        StatusCode::OK,
        Json(
            versions
                .into_iter()
                .map(GameVersion::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Highest released version of a game by version ordering.
#[utoipa::path(
    get,
    path = "/api/games/{id}/versions/latest",
    tag = GAME_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Latest version", body = GameVersionDto),
        (status = 404, description = "Game not found or without versions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn latest_version(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state, &headers).optional().await?;

    let version = game_service(&state)
        .latest_version(id, viewer.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(version.into_dto())))
}

/// Stream a version's binary.
///
/// # Access Control
/// - Owner of the game, its developer, or `Admin`
///
/// # Returns
/// - `200 OK` - Binary body with `Content-Length` and `X-Content-SHA256`
/// - `403 Forbidden` - Caller neither owns nor manages the game
/// - `404 Not Found` - Game, version or stored object missing
#[utoipa::path(
    get,
    path = "/api/games/{id}/versions/{version_id}/download",
    tag = GAME_TAG,
    params(
        ("id" = i32, Path, description = "Game ID"),
        ("version_id" = i32, Path, description = "Version ID")
    ),
    responses(
        (status = 200, description = "Binary content", content_type = "application/octet-stream"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the game", body = ErrorDto),
        (status = 404, description = "Version not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn download_version(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, version_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let (version, object) = game_service(&state)
        .download(&current, id, version_id)
        .await?;

    tracing::info!(
        "User {} downloading game {} version {}",
        current.id(),
        id,
        version.version
    );

    let response_headers = [
        (CONTENT_TYPE, "application/octet-stream".to_string()),
        (CONTENT_LENGTH, object.size.to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", version.file_name),
        ),
        (CONTENT_SHA256, version.file_hash),
    ];
    let body = Body::from_stream(ReaderStream::new(object.reader));

    Ok((StatusCode::OK, response_headers, body))
}
