use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        cart::{AddCartItemDto, CartDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::cart::CartService,
        state::AppState,
    },
};

/// Tag for grouping cart endpoints in OpenAPI documentation
pub static CART_TAG: &str = "cart";

/// The caller's cart. Created on first access.
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = CART_TAG,
    responses(
        (status = 200, description = "Cart contents", body = CartDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let cart = CartService::new(&state.db).get(current.id()).await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

/// Add a published game to the cart at its current price.
///
/// # Returns
/// - `200 OK` - Updated cart
/// - `400 Bad Request` - Already owned or already in the cart
/// - `404 Not Found` - Game missing or unpublished
#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = CART_TAG,
    request_body = AddCartItemDto,
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 400, description = "Game owned or already in cart", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AddCartItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let cart = CartService::new(&state.db)
        .add(current.id(), payload.game_id)
        .await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{game_id}",
    tag = CART_TAG,
    params(("game_id" = i32, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Game not in cart", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn remove_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(game_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let cart = CartService::new(&state.db)
        .remove(current.id(), game_id)
        .await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = CART_TAG,
    responses(
        (status = 204, description = "Cart emptied"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    CartService::new(&state.db).clear(current.id()).await?;

    Ok(StatusCode::NO_CONTENT)
}
