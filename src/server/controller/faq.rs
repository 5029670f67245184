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
        faq::{CreateFaqDto, FaqDto, UpdateFaqDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::faq::{CreateFaqParam, Faq, UpdateFaqParam},
        service::faq::FaqService,
        state::AppState,
    },
};

/// Tag for grouping FAQ endpoints in OpenAPI documentation
pub static FAQ_TAG: &str = "faq";

/// All FAQ entries by sort order.
#[utoipa::path(
    get,
    path = "/api/faq",
    tag = FAQ_TAG,
    responses(
        (status = 200, description = "FAQ entries", body = Vec<FaqDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_faq(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let entries = FaqService::new(&state.db).list().await?;

    Ok((
        StatusCode::OK,
        Json(entries.into_iter().map(Faq::into_dto).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/faq/{id}",
    tag = FAQ_TAG,
    params(("id" = i32, Path, description = "FAQ entry ID")),
    responses(
        (status = 200, description = "FAQ entry", body = FaqDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let entry = FaqService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(entry.into_dto())))
}

/// Add an FAQ entry.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    post,
    path = "/api/faq",
    tag = FAQ_TAG,
    request_body = CreateFaqDto,
    responses(
        (status = 201, description = "Entry created", body = FaqDto),
        (status = 400, description = "Blank question or answer", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_faq(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateFaqDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let entry = FaqService::new(&state.db)
        .create(CreateFaqParam {
            question: payload.question,
            answer: payload.answer,
            sort_order: payload.sort_order,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/faq/{id}",
    tag = FAQ_TAG,
    params(("id" = i32, Path, description = "FAQ entry ID")),
    request_body = UpdateFaqDto,
    responses(
        (status = 200, description = "Entry updated", body = FaqDto),
        (status = 400, description = "Blank question or answer", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_faq(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFaqDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let entry = FaqService::new(&state.db)
        .update(
            id,
            UpdateFaqParam {
                question: payload.question,
                answer: payload.answer,
                sort_order: payload.sort_order,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(entry.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/faq/{id}",
    tag = FAQ_TAG,
    params(("id" = i32, Path, description = "FAQ entry ID")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_faq(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    FaqService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
