use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::health::HealthDto,
    server::{error::AppError, service::health::HealthService, state::AppState},
};

/// Tag for grouping health endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Report service health.
///
/// Pings the database. A failed ping reports `degraded`, still with status 200.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Health report", body = HealthDto)
    ),
)]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let health = HealthService::new(&state.db).check().await;

    Ok((
        StatusCode::OK,
        Json(HealthDto {
            status: health.status().to_string(),
            database: health.database,
        }),
    ))
}
