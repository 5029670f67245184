use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::upload::UploadService, storage::StorageService};

/// Starts the stale upload cleanup scheduler
///
/// Runs at the top of every hour and aborts `in_progress` upload sessions that have not
/// received a chunk within `ttl_hours`, deleting their stored chunks.
///
/// # Arguments
/// - `db`: Database connection
/// - `storage`: Object storage holding the upload chunks
/// - `ttl_hours`: Idle time after which a session is aborted
pub async fn start_scheduler(
    db: DatabaseConnection,
    storage: Arc<dyn StorageService>,
    ttl_hours: i64,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let storage = storage.clone();

        Box::pin(async move {
            if let Err(e) = cleanup_stale_uploads(&db, storage.as_ref(), ttl_hours).await {
                tracing::error!("Error cleaning up stale uploads: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Upload cleanup scheduler started");

    Ok(scheduler)
}

/// Aborts every stale upload session once.
pub async fn cleanup_stale_uploads(
    db: &DatabaseConnection,
    storage: &dyn StorageService,
    ttl_hours: i64,
) -> Result<usize, AppError> {
    let aborted = UploadService::new(db, storage)
        .cleanup_stale(ttl_hours)
        .await?;

    if aborted > 0 {
        tracing::info!("Aborted {} stale upload sessions", aborted);
    }

    Ok(aborted)
}
