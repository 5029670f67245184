use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, PageDto, PaginationParams},
        news::{CreateNewsDto, NewsArticleDto, UpdateNewsDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::news::{CreateNewsParam, NewsArticle, UpdateNewsParam},
        service::news::NewsService,
        state::AppState,
    },
};

/// Tag for grouping news endpoints in OpenAPI documentation
pub static NEWS_TAG: &str = "news";

/// Published articles, most recently published first.
#[utoipa::path(
    get,
    path = "/api/news",
    tag = NEWS_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of articles", body = PageDto<NewsArticleDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = params.clamped();

    let articles = NewsService::new(&state.db)
        .list_published(page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(articles.into_dto(NewsArticle::into_dto))))
}

/// Get an article. Drafts are visible to admins only.
#[utoipa::path(
    get,
    path = "/api/news/{id}",
    tag = NEWS_TAG,
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "The article", body = NewsArticleDto),
        (status = 404, description = "Article not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).optional().await?;
    let include_drafts = current.is_some_and(|user| user.is_admin());

    let article = NewsService::new(&state.db).get(id, include_drafts).await?;

    Ok((StatusCode::OK, Json(article.into_dto())))
}

/// Write a draft article authored by the caller.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - Unpublished draft
/// - `400 Bad Request` - Blank title or content
#[utoipa::path(
    post,
    path = "/api/news",
    tag = NEWS_TAG,
    request_body = CreateNewsDto,
    responses(
        (status = 201, description = "Draft created", body = NewsArticleDto),
        (status = 400, description = "Invalid article", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateNewsDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let article = NewsService::new(&state.db)
        .create(CreateNewsParam {
            author_id: current.id(),
            title: payload.title,
            summary: payload.summary,
            content: payload.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(article.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/news/{id}",
    tag = NEWS_TAG,
    params(("id" = i32, Path, description = "Article ID")),
    request_body = UpdateNewsDto,
    responses(
        (status = 200, description = "Article updated", body = NewsArticleDto),
        (status = 400, description = "Invalid article", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "Article not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateNewsDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let article = NewsService::new(&state.db)
        .update(
            id,
            UpdateNewsParam {
                title: payload.title,
                summary: payload.summary,
                content: payload.content,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(article.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/news/{id}/publish",
    tag = NEWS_TAG,
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article published", body = NewsArticleDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "Article not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn publish_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let article = NewsService::new(&state.db).publish(id).await?;

    Ok((StatusCode::OK, Json(article.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/news/{id}",
    tag = NEWS_TAG,
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "Article not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    NewsService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
