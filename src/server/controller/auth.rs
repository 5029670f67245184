use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::ErrorDto,
        auth::{LoginDto, RefreshTokenDto, RegisterDto, TokenDto},
        user::UserDto,
    },
    server::{
        error::AppError, identity::RegistrationRequest, middleware::auth::AuthGuard,
        service::auth::AuthService, state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(&state.db, state.identity.as_ref(), state.email.as_ref())
}

/// Register a new account.
///
/// Creates the account in Keycloak, then the local user, then sends a welcome email.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `201 Created` - The new user
/// - `400 Bad Request` - Invalid payload or username already taken
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = auth_service(&state)
        .register(RegistrationRequest {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            display_name: payload.display_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Exchange username and password for tokens.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Tokens issued", body = TokenDto),
        (status = 400, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tokens = auth_service(&state)
        .login(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(tokens.into_dto())))
}

/// Exchange a refresh token for a new token set.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenDto),
        (status = 400, description = "Refresh token rejected", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tokens = auth_service(&state).refresh(&payload.refresh_token).await?;

    Ok((StatusCode::OK, Json(tokens.into_dto())))
}

/// Revoke a refresh token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    auth_service(&state).logout(&payload.refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the authenticated caller.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - The caller's user record
/// - `401 Unauthorized` - Missing or invalid bearer token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    Ok((StatusCode::OK, Json(current.user.into_dto())))
}
