use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{clamp_page, ErrorDto, PageDto},
        user::{PublicProfileDto, UpdateProfileDto, UserDto, UserSearchParams, UserSummaryDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::{UpdateProfileParam, User},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

fn user_service(state: &AppState) -> UserService<'_> {
    UserService::new(&state.db, state.storage.as_ref())
}

/// Get the caller's own account.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    Ok((StatusCode::OK, Json(current.user.into_dto())))
}

/// Update display name and bio of the caller.
///
/// # Access Control
/// - `Authenticated`
///
/// # Arguments
/// - `payload` - Fields to change; omitted fields stay as they are
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Field too long
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let user = user_service(&state)
        .update_profile(
            current.id(),
            UpdateProfileParam {
                display_name: payload.display_name,
                bio: payload.bio,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Upload an avatar image.
///
/// The raw request body is the image; `Content-Type` must be `image/png`,
/// `image/jpeg` or `image/webp`, at most 5 MiB.
#[utoipa::path(
    put,
    path = "/api/users/me/avatar",
    tag = USER_TAG,
    request_body(content = Vec<u8>, content_type = "image/png"),
    responses(
        (status = 200, description = "Avatar stored", body = UserDto),
        (status = 400, description = "Unsupported or oversized image", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn set_avatar(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    let user = user_service(&state)
        .set_avatar(current.id(), content_type, body)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Public profile of a user, with follower counts.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Public profile", body = PublicProfileDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let profile = user_service(&state).get_profile(id).await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// List users, optionally searching by username.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Page of users ordered by username
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - Caller is not an admin
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(UserSearchParams),
    responses(
        (status = 200, description = "Page of users", body = PageDto<UserDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<UserSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let (page, per_page) = clamp_page(params.page, params.entries);
    let users = user_service(&state)
        .list(params.search.as_deref(), page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto(User::into_dto))))
}

/// Soft delete a user. Recorded in the audit log.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `204 No Content` - User deleted
/// - `404 Not Found` - No such user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    user_service(&state).delete(current.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/follow",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User to follow")),
    responses(
        (status = 204, description = "Now following"),
        (status = 400, description = "Following yourself or already following", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn follow(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    user_service(&state).follow(current.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/follow",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User to unfollow")),
    responses(
        (status = 204, description = "No longer following"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Not following this user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn unfollow(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    user_service(&state).unfollow(current.id(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/followers",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Followers, newest first", body = Vec<UserSummaryDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn followers(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let users = user_service(&state).followers(id).await?;

    Ok((
        StatusCode::OK,
        Json(
            users
                .into_iter()
                .map(User::into_summary_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/following",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Followed users, newest first", body = Vec<UserSummaryDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn following(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let users = user_service(&state).following(id).await?;

    Ok((
        StatusCode::OK,
        Json(
            users
                .into_iter()
                .map(User::into_summary_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}
