use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        analytics::{
            AnalyticsEventDto, AnalyticsSessionDto, AnalyticsSummaryDto, EventSearchParams,
            StartSessionDto, TrackEventsDto, TrackedEventsDto,
        },
        api::{clamp_page, ErrorDto, PageDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::analytics::{AnalyticsEvent, EventSearchParam, TrackEventParam},
        service::analytics::AnalyticsService,
        state::AppState,
    },
};

/// Tag for grouping analytics endpoints in OpenAPI documentation
pub static ANALYTICS_TAG: &str = "analytics";

/// Start a client session.
///
/// Anonymous clients may start sessions; a bearer token attaches the session to the
/// caller.
#[utoipa::path(
    post,
    path = "/api/analytics/sessions",
    tag = ANALYTICS_TAG,
    request_body = StartSessionDto,
    responses(
        (status = 201, description = "Session started", body = AnalyticsSessionDto),
        (status = 400, description = "Blank platform", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn start_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<StartSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).optional().await?;
    payload.validate()?;

    let session = AnalyticsService::new(&state.db)
        .start_session(
            current.map(|user| user.id()),
            payload.platform,
            payload.app_version,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/analytics/sessions/{id}/end",
    tag = ANALYTICS_TAG,
    params(("id" = i32, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session ended", body = AnalyticsSessionDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let session = AnalyticsService::new(&state.db).end_session(id).await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Record a batch of 1 to 100 events.
///
/// # Returns
/// - `201 Created` - Number of stored events
/// - `400 Bad Request` - Empty or oversized batch, or a blank event type
/// - `404 Not Found` - An event references an unknown session
#[utoipa::path(
    post,
    path = "/api/analytics/events",
    tag = ANALYTICS_TAG,
    request_body = TrackEventsDto,
    responses(
        (status = 201, description = "Events stored", body = TrackedEventsDto),
        (status = 400, description = "Invalid batch", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn track_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<TrackEventsDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state, &headers).optional().await?;
    payload.validate()?;

    let events = payload
        .events
        .into_iter()
        .map(|event| TrackEventParam {
            session_id: event.session_id,
            user_id: None,
            event_type: event.event_type,
            payload: event.payload,
        })
        .collect();

    let count = AnalyticsService::new(&state.db)
        .track(current.map(|user| user.id()), events)
        .await?;

    Ok((StatusCode::CREATED, Json(TrackedEventsDto { count })))
}

/// Search recorded events, newest first.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/analytics/events",
    tag = ANALYTICS_TAG,
    params(EventSearchParams),
    responses(
        (status = 200, description = "Page of events", body = PageDto<AnalyticsEventDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn search_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<EventSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;
    let (page, per_page) = clamp_page(params.page, params.entries);

    let events = AnalyticsService::new(&state.db)
        .search_events(EventSearchParam {
            event_type: params.event_type,
            session_id: params.session_id,
            page,
            per_page,
        })
        .await?;

    Ok((StatusCode::OK, Json(events.into_dto(AnalyticsEvent::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Event counts and session totals", body = AnalyticsSummaryDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn summary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let summary = AnalyticsService::new(&state.db).summary().await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}
