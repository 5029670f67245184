use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{clamp_page, ErrorDto, PageDto},
        audit::{AuditLogDto, AuditLogSearchParams},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::audit::{AuditLog, AuditLogSearchParam},
        service::audit::AuditLogService,
        state::AppState,
    },
};

/// Tag for grouping audit log endpoints in OpenAPI documentation
pub static AUDIT_TAG: &str = "audit";

/// Search the audit trail, newest first.
///
/// # Access Control
/// - `Admin`
///
/// # Arguments
/// - `params` - Page, page size, and optional entity type and acting user filters
#[utoipa::path(
    get,
    path = "/api/audit-logs",
    tag = AUDIT_TAG,
    params(AuditLogSearchParams),
    responses(
        (status = 200, description = "Page of audit entries", body = PageDto<AuditLogDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AuditLogSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;
    let (page, per_page) = clamp_page(params.page, params.entries);

    let entries = AuditLogService::new(&state.db)
        .search(AuditLogSearchParam {
            entity_type: params.entity_type,
            user_id: params.user_id,
            page,
            per_page,
        })
        .await?;

    Ok((StatusCode::OK, Json(entries.into_dto(AuditLog::into_dto))))
}
