//! Chunked upload of game binaries.
//!
//! A developer opens a session for a new version, sends the file as numbered chunks in
//! any order, then completes the session. Completion concatenates the chunks into the
//! final object, records its SHA-256 and size as a new game version and drops the
//! chunks. Sessions idle past the configured TTL are aborted by the scheduler.

use bytes::Bytes;
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::upload::UploadStatus,
    server::{
        data::{game::GameRepository, game_version::GameVersionRepository, upload::UploadRepository},
        error::{auth::AuthError, AppError},
        middleware::auth::CurrentUser,
        model::{
            game::{CreateGameVersionParam, GameVersion},
            upload::{chunk_key, CreateUploadParam, UploadSession},
        },
        service::game::ensure_can_manage,
        storage::{Bucket, ComposedObject, StorageService},
    },
};

/// Fields of a new upload session chosen by the client.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub game_id: i32,
    pub version: String,
    pub file_name: String,
    pub total_chunks: i32,
    pub total_size: i64,
}

pub struct UploadService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn StorageService,
}

impl<'a> UploadService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn StorageService) -> Self {
        Self { db, storage }
    }

    /// Opens an upload session for a version that does not exist yet.
    ///
    /// # Returns
    /// - `Ok(UploadSession)` - New `in_progress` session
    /// - `Err(AppError::NotFound)` - Game missing
    /// - `Err(AuthError::AccessDenied)` - Caller cannot manage the game
    /// - `Err(AppError::BadRequest)` - Version already released or already uploading
    pub async fn create(
        &self,
        current: &CurrentUser,
        upload: NewUpload,
    ) -> Result<UploadSession, AppError> {
        let game = GameRepository::new(self.db)
            .find_by_id(upload.game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;
        ensure_can_manage(current, &game)?;

        if GameVersionRepository::new(self.db)
            .exists(game.id, &upload.version)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "Version {} already exists",
                upload.version
            )));
        }

        let repo = UploadRepository::new(self.db);
        if repo.in_progress_exists(game.id, &upload.version).await? {
            return Err(AppError::BadRequest(format!(
                "Version {} is already being uploaded",
                upload.version
            )));
        }

        let session = repo
            .create(CreateUploadParam {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: current.id(),
                game_id: game.id,
                version: upload.version,
                file_name: upload.file_name,
                total_chunks: upload.total_chunks,
                total_size: upload.total_size,
            })
            .await?;

        tracing::info!(
            "Upload {} opened for game {} version {} ({} chunks)",
            session.id,
            session.game_id,
            session.version,
            session.total_chunks
        );

        Ok(session)
    }

    /// Stores one chunk. Re-sending an index replaces the earlier part.
    pub async fn upload_chunk(
        &self,
        current: &CurrentUser,
        id: &str,
        index: i32,
        data: Bytes,
    ) -> Result<UploadSession, AppError> {
        let session = self.find_own_in_progress(current, id).await?;

        if index < 0 || index >= session.total_chunks {
            return Err(AppError::BadRequest(format!(
                "Chunk index {} is out of range 0..{}",
                index, session.total_chunks
            )));
        }
        if data.is_empty() {
            return Err(AppError::BadRequest("Chunk is empty".to_string()));
        }

        let size = data.len() as i64;
        self.storage
            .put_object(Bucket::Uploads, &chunk_key(id, index), data)
            .await?;

        let repo = UploadRepository::new(self.db);
        repo.record_chunk(id, index, size).await?;

        repo.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upload not found".to_string()))
    }

    /// Progress of a session, visible to its owner or an admin.
    pub async fn get(&self, current: &CurrentUser, id: &str) -> Result<UploadSession, AppError> {
        let session = self.find(id).await?;

        if session.user_id != current.id() && !current.is_admin() {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("viewing upload {} of another user", id),
            )
            .into());
        }

        Ok(session)
    }

    /// Assembles the chunks into the released binary.
    ///
    /// # Returns
    /// - `Ok(GameVersion)` - Version record with the composed size and SHA-256
    /// - `Err(AppError::BadRequest)` - Chunks missing or sizes do not add up
    pub async fn complete(
        &self,
        current: &CurrentUser,
        id: &str,
        changelog: Option<String>,
    ) -> Result<GameVersion, AppError> {
        let session = self.find_own_in_progress(current, id).await?;
        let repo = UploadRepository::new(self.db);

        let chunks = repo.chunks(id).await?;
        if chunks.len() as i32 != session.total_chunks {
            return Err(AppError::BadRequest(format!(
                "Received {} of {} chunks",
                chunks.len(),
                session.total_chunks
            )));
        }

        let received: i64 = chunks.iter().map(|(_, size)| size).sum();
        if received != session.total_size {
            return Err(AppError::BadRequest(format!(
                "Received {} bytes, expected {}",
                received, session.total_size
            )));
        }

        let parts: Vec<String> = chunks
            .iter()
            .map(|(index, _)| chunk_key(id, *index))
            .collect();
        let file_key = session.file_key();

        let composed = self
            .storage
            .compose_object(Bucket::Games, &file_key, Bucket::Uploads, &parts)
            .await?;

        let version = match self
            .record_version(&session, changelog, file_key.clone(), composed)
            .await
        {
            Ok(version) => version,
            Err(err) => {
                if let Err(e) = self.storage.delete_object(Bucket::Games, &file_key).await {
                    tracing::warn!("Failed to remove composed binary {}: {}", file_key, e);
                }
                return Err(err);
            }
        };

        self.delete_parts(&parts).await;

        tracing::info!(
            "Upload {} completed as version {} of game {}",
            id,
            version.version,
            version.game_id
        );

        Ok(version)
    }

    /// Creates the version for a composed binary and closes the session in one transaction.
    async fn record_version(
        &self,
        session: &UploadSession,
        changelog: Option<String>,
        file_key: String,
        composed: ComposedObject,
    ) -> Result<GameVersion, AppError> {
        if composed.size as i64 != session.total_size {
            return Err(AppError::InternalError(format!(
                "Upload {} composed to {} bytes, expected {}",
                session.id, composed.size, session.total_size
            )));
        }

        let txn = self.db.begin().await?;

        let version = GameVersionRepository::new(&txn)
            .create(CreateGameVersionParam {
                game_id: session.game_id,
                version: session.version.clone(),
                changelog,
                file_name: session.file_name.clone(),
                file_key,
                file_size: composed.size as i64,
                file_hash: composed.sha256,
            })
            .await?;

        let uploads = UploadRepository::new(&txn);
        uploads.delete_chunks(&session.id).await?;
        if !uploads.finish(&session.id, UploadStatus::Completed).await? {
            return Err(AppError::BadRequest(
                "Upload is no longer in progress".to_string(),
            ));
        }

        txn.commit().await?;

        Ok(version)
    }

    /// Drops the stored chunks and marks the session aborted.
    pub async fn abort(&self, current: &CurrentUser, id: &str) -> Result<(), AppError> {
        let session = self.find(id).await?;

        if session.user_id != current.id() && !current.is_admin() {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("aborting upload {} of another user", id),
            )
            .into());
        }
        if session.status != UploadStatus::InProgress {
            return Err(AppError::BadRequest(
                "Upload is no longer in progress".to_string(),
            ));
        }

        self.discard(&session).await
    }

    /// Aborts `in_progress` sessions idle for longer than `ttl_hours`.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of sessions aborted
    pub async fn cleanup_stale(&self, ttl_hours: i64) -> Result<usize, AppError> {
        let cutoff = Utc::now() - Duration::hours(ttl_hours);
        let stale = UploadRepository::new(self.db).find_stale(cutoff).await?;

        let mut aborted = 0;
        for session in &stale {
            match self.discard(session).await {
                Ok(()) => aborted += 1,
                Err(err) => tracing::warn!("Failed to abort stale upload {}: {}", session.id, err),
            }
        }

        Ok(aborted)
    }

    async fn discard(&self, session: &UploadSession) -> Result<(), AppError> {
        let repo = UploadRepository::new(self.db);

        let parts: Vec<String> = repo
            .chunks(&session.id)
            .await?
            .iter()
            .map(|(index, _)| chunk_key(&session.id, *index))
            .collect();

        self.delete_parts(&parts).await;
        repo.delete_chunks(&session.id).await?;
        repo.finish(&session.id, UploadStatus::Aborted).await?;

        tracing::info!("Upload {} aborted", session.id);

        Ok(())
    }

    async fn delete_parts(&self, parts: &[String]) {
        for part in parts {
            if let Err(err) = self.storage.delete_object(Bucket::Uploads, part).await {
                tracing::warn!("Failed to delete upload part {}: {}", part, err);
            }
        }
    }

    async fn find(&self, id: &str) -> Result<UploadSession, AppError> {
        UploadRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upload not found".to_string()))
    }

    async fn find_own_in_progress(
        &self,
        current: &CurrentUser,
        id: &str,
    ) -> Result<UploadSession, AppError> {
        let session = self.find(id).await?;

        if session.user_id != current.id() {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("writing to upload {} of another user", id),
            )
            .into());
        }
        if session.status != UploadStatus::InProgress {
            return Err(AppError::BadRequest(
                "Upload is no longer in progress".to_string(),
            ));
        }

        Ok(session)
    }
}
