use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, PaginationParams},
        review::{CreateReviewDto, GameReviewsDto, ReviewDto, UpdateReviewDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::review::{CreateReviewParam, Review, UpdateReviewParam},
        service::review::ReviewService,
        state::AppState,
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "review";

/// Reviews of a published game, newest first, with the average rating.
#[utoipa::path(
    get,
    path = "/api/games/{id}/reviews",
    tag = REVIEW_TAG,
    params(("id" = i32, Path, description = "Game ID"), PaginationParams),
    responses(
        (status = 200, description = "Page of reviews", body = GameReviewsDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = params.clamped();

    let (reviews, average_rating) = ReviewService::new(&state.db)
        .list(id, page, per_page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(GameReviewsDto {
            reviews: reviews.into_dto(Review::into_dto),
            average_rating,
        }),
    ))
}

/// Review an owned game.
///
/// # Access Control
/// - `Authenticated`, and the caller must own the game
///
/// # Returns
/// - `201 Created` - The review
/// - `400 Bad Request` - Invalid rating or content, or already reviewed
/// - `403 Forbidden` - Caller does not own the game
/// - `404 Not Found` - Game missing or unpublished
#[utoipa::path(
    post,
    path = "/api/games/{id}/reviews",
    tag = REVIEW_TAG,
    params(("id" = i32, Path, description = "Game ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 400, description = "Invalid review or duplicate", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Game not owned", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let review = ReviewService::new(&state.db)
        .create(CreateReviewParam {
            game_id: id,
            user_id: current.id(),
            rating: payload.rating,
            content: payload.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}

/// Edit your own review.
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    params(("id" = i32, Path, description = "Review ID")),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Review updated", body = ReviewDto),
        (status = 400, description = "Invalid review", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let review = ReviewService::new(&state.db)
        .update(
            &current,
            id,
            UpdateReviewParam {
                rating: payload.rating,
                content: payload.content,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(review.into_dto())))
}

/// Delete a review.
///
/// # Access Control
/// - Author, or `Moderate`
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the author or a moderator", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    ReviewService::new(&state.db).delete(&current, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
