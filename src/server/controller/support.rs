use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{clamp_page, ErrorDto, PageDto},
        support::{
            AssignTicketDto, CreateTicketDto, CreateTicketMessageDto, SupportTicketDetailDto,
            SupportTicketDto, TicketMessageDto, TicketSearchParams, UpdateTicketStatusDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::support::{CreateTicketParam, SupportTicket},
        service::support::SupportService,
        state::AppState,
    },
};

/// Tag for grouping support ticket endpoints in OpenAPI documentation
pub static SUPPORT_TAG: &str = "support";

fn support_service(state: &AppState) -> SupportService<'_> {
    SupportService::new(&state.db, state.email.as_ref())
}

/// Open a support ticket.
///
/// # Access Control
/// - `Authenticated`
///
/// # Arguments
/// - `payload` - Subject, description and an optional priority (default `medium`)
///
/// # Returns
/// - `201 Created` - The new ticket in status `open`
/// - `400 Bad Request` - Blank subject or description
#[utoipa::path(
    post,
    path = "/api/support-tickets",
    tag = SUPPORT_TAG,
    request_body = CreateTicketDto,
    responses(
        (status = 201, description = "Ticket opened", body = SupportTicketDto),
        (status = 400, description = "Invalid ticket", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateTicketDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let ticket = support_service(&state)
        .create(CreateTicketParam {
            user_id: current.id(),
            subject: payload.subject,
            description: payload.description,
            priority: payload.priority.unwrap_or_default(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ticket.into_dto())))
}

/// List tickets, newest activity first.
///
/// Support staff see every ticket; other users see their own.
#[utoipa::path(
    get,
    path = "/api/support-tickets",
    tag = SUPPORT_TAG,
    params(TicketSearchParams),
    responses(
        (status = 200, description = "Page of tickets", body = PageDto<SupportTicketDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TicketSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    let (page, per_page) = clamp_page(params.page, params.entries);

    let tickets = support_service(&state)
        .list(&current, params.status, page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(tickets.into_dto(SupportTicket::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/support-tickets/{id}",
    tag = SUPPORT_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket with its messages", body = SupportTicketDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Ticket belongs to another user", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    let detail = support_service(&state).get(&current, id).await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Reply on a ticket as its owner or as support staff.
#[utoipa::path(
    post,
    path = "/api/support-tickets/{id}/messages",
    tag = SUPPORT_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = CreateTicketMessageDto,
    responses(
        (status = 201, description = "Message added", body = TicketMessageDto),
        (status = 400, description = "Blank message or closed ticket", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Ticket belongs to another user", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn add_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<CreateTicketMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;
    payload.validate()?;

    let message = support_service(&state)
        .add_message(&current, id, payload.message)
        .await?;

    Ok((StatusCode::CREATED, Json(message.into_dto())))
}

/// Change a ticket's status. The owner is emailed about the change.
///
/// # Access Control
/// - `Support`
#[utoipa::path(
    put,
    path = "/api/support-tickets/{id}/status",
    tag = SUPPORT_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = UpdateTicketStatusDto,
    responses(
        (status = 200, description = "Status changed", body = SupportTicketDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not support staff", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTicketStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Support])
        .await?;

    let ticket = support_service(&state).set_status(id, payload.status).await?;

    Ok((StatusCode::OK, Json(ticket.into_dto())))
}

/// Assign a ticket to an agent.
///
/// # Access Control
/// - `Support`
///
/// # Returns
/// - `200 OK` - Assigned ticket; an `open` ticket moves to `in_progress`
/// - `404 Not Found` - Ticket or assignee not found
#[utoipa::path(
    put,
    path = "/api/support-tickets/{id}/assign",
    tag = SUPPORT_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = AssignTicketDto,
    responses(
        (status = 200, description = "Ticket assigned", body = SupportTicketDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not support staff", body = ErrorDto),
        (status = 404, description = "Ticket or assignee not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn assign_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<AssignTicketDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Support])
        .await?;

    let ticket = support_service(&state)
        .assign(id, payload.assignee_id)
        .await?;

    Ok((StatusCode::OK, Json(ticket.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/support-tickets/{id}",
    tag = SUPPORT_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Ticket belongs to another user", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).require(&[]).await?;

    support_service(&state).delete(&current, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
