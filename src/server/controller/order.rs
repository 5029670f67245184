use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{clamp_page, ErrorDto, PageDto, PaginationParams},
        order::{OrderDto, OrderSearchParams},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::order::Order,
        service::order::OrderService,
        state::AppState,
    },
};

/// Tag for grouping order endpoints in OpenAPI documentation
pub static ORDER_TAG: &str = "order";

/// Check out the caller's cart.
///
/// Creates a pending order holding every cart item and empties the cart, in one
/// transaction.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `201 Created` - The pending order
/// - `400 Bad Request` - Cart empty or containing an owned game
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = ORDER_TAG,
    responses(
        (status = 201, description = "Order created", body = OrderDto),
        (status = 400, description = "Cart empty or containing owned games", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let order = OrderService::new(&state.db).checkout(current.id()).await?;

    Ok((StatusCode::CREATED, Json(order.into_dto())))
}

/// The caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = ORDER_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of orders", body = PageDto<OrderDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    let (page, per_page) = params.clamped();

    let orders = OrderService::new(&state.db)
        .list_own(current.id(), page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(orders.into_dto(Order::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "The order", body = OrderDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Order belongs to another user", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let order = OrderService::new(&state.db).get(&current, id).await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}

/// Cancel a pending order.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = OrderDto),
        (status = 400, description = "Order is not pending", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Order belongs to another user", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let order = OrderService::new(&state.db).cancel(&current, id).await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}

/// Every order in the store, optionally filtered by status.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = ORDER_TAG,
    params(OrderSearchParams),
    responses(
        (status = 200, description = "Page of orders", body = PageDto<OrderDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<OrderSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;
    let (page, per_page) = clamp_page(params.page, params.entries);

    let orders = OrderService::new(&state.db)
        .list_all(params.status, page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(orders.into_dto(Order::into_dto))))
}
