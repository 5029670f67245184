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
        payment::{ConfirmPaymentDto, CreatePaymentDto, FailPaymentDto, PaymentDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::payment::PaymentService,
        state::AppState,
    },
};

/// Tag for grouping payment endpoints in OpenAPI documentation
pub static PAYMENT_TAG: &str = "payment";

fn payment_service(state: &AppState) -> PaymentService<'_> {
    PaymentService::new(&state.db, state.email.as_ref())
}

/// Start paying one of the caller's pending orders.
///
/// A pending payment for the same order is returned instead of creating a second one.
///
/// # Access Control
/// - `Authenticated`, order owner only
///
/// # Arguments
/// - `payload` - Order id and the name of the provider the client pays through
///
/// # Returns
/// - `201 Created` - Pending payment for the order total
/// - `400 Bad Request` - Order is not pending
/// - `403 Forbidden` - Order belongs to another user
/// - `404 Not Found` - Order not found
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = PAYMENT_TAG,
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment started", body = PaymentDto),
        (status = 400, description = "Order is not pending", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Order belongs to another user", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let payment = payment_service(&state)
        .create(&current, payload.order_id, &payload.provider)
        .await?;

    Ok((StatusCode::CREATED, Json(payment.into_dto())))
}

/// Confirm a pending payment with the provider's transaction id.
///
/// Marks the order paid and adds its games to the buyer's library, then mails a
/// receipt.
#[utoipa::path(
    post,
    path = "/api/payments/{id}/confirm",
    tag = PAYMENT_TAG,
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = ConfirmPaymentDto,
    responses(
        (status = 200, description = "Payment completed", body = PaymentDto),
        (status = 400, description = "Payment is not pending", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Payment belongs to another user", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<ConfirmPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let payment = payment_service(&state)
        .confirm(&current, id, &payload.transaction_id)
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/payments/{id}/fail",
    tag = PAYMENT_TAG,
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = FailPaymentDto,
    responses(
        (status = 200, description = "Payment marked failed", body = PaymentDto),
        (status = 400, description = "Payment is not pending", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Payment belongs to another user", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn fail_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<FailPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let payment = payment_service(&state)
        .fail(&current, id, &payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

/// Refund a completed payment.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Refunded payment; the order's library entries are removed
/// - `400 Bad Request` - Payment is not completed
#[utoipa::path(
    post,
    path = "/api/payments/{id}/refund",
    tag = PAYMENT_TAG,
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment refunded", body = PaymentDto),
        (status = 400, description = "Payment is not completed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn refund_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let payment = payment_service(&state).refund(current.id(), id).await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = PAYMENT_TAG,
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "The payment", body = PaymentDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Payment belongs to another user", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let payment = payment_service(&state).get(&current, id).await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}
