use bytes::Bytes;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{game::GameRepository, game_version::GameVersionRepository, library::LibraryRepository},
    error::{auth::AuthError, AppError},
    middleware::auth::CurrentUser,
    model::{
        audit::AuditEntry,
        game::{CreateGameParam, Game, GameSearchParam, GameVersion, UpdateGameParam},
        Paginated,
    },
    service::{audit::AuditLogService, image::image_extension},
    storage::{Bucket, StorageService, StoredObject},
};

/// Only the developer who owns a game, or an admin, may change it.
pub(crate) fn ensure_can_manage(current: &CurrentUser, game: &Game) -> Result<(), AppError> {
    if game.developer_id == current.id() || current.is_admin() {
        return Ok(());
    }

    Err(AuthError::AccessDenied(
        current.id(),
        format!("not the developer of game {}", game.id),
    )
    .into())
}

pub struct GameService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn StorageService,
}

impl<'a> GameService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn StorageService) -> Self {
        Self { db, storage }
    }

    pub async fn search(&self, param: GameSearchParam) -> Result<Paginated<Game>, AppError> {
        let (games, total) = GameRepository::new(self.db).search_published(&param).await?;

        Ok(Paginated::new(games, total, param.page, param.per_page))
    }

    /// Loads a game as seen by `viewer`.
    ///
    /// Drafts are only visible to their developer and admins; everyone else gets 404.
    pub async fn get(&self, id: i32, viewer: Option<&CurrentUser>) -> Result<Game, AppError> {
        let game = self.find(id).await?;

        if game.is_published {
            return Ok(game);
        }

        match viewer {
            Some(current) if game.developer_id == current.id() || current.is_admin() => Ok(game),
            _ => Err(AppError::NotFound("Game not found".to_string())),
        }
    }

    pub async fn create(&self, param: CreateGameParam) -> Result<Game, AppError> {
        let game = GameRepository::new(self.db).create(param).await?;

        tracing::info!("Developer {} created game {}", game.developer_id, game.id);

        Ok(game)
    }

    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        param: UpdateGameParam,
    ) -> Result<Game, AppError> {
        let game = self.find(id).await?;
        ensure_can_manage(current, &game)?;

        GameRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }

    /// Publishes or unpublishes a game. Publishing requires at least one version.
    pub async fn set_published(
        &self,
        current: &CurrentUser,
        id: i32,
        publish: bool,
    ) -> Result<Game, AppError> {
        let game = self.find(id).await?;
        ensure_can_manage(current, &game)?;

        if publish && GameVersionRepository::new(self.db).count_by_game(id).await? == 0 {
            return Err(AppError::BadRequest(
                "Upload at least one version before publishing".to_string(),
            ));
        }

        GameRepository::new(self.db).set_published(id, publish).await?;

        self.find(id).await
    }

    pub async fn delete(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        if !GameRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("Game not found".to_string()));
        }

        AuditLogService::new(self.db)
            .record_best_effort(AuditEntry::new(actor_id, "game.delete", "game", id))
            .await;

        Ok(())
    }

    /// Stores cover art as `covers/{game_id}.{ext}` in the images bucket.
    pub async fn set_cover(
        &self,
        current: &CurrentUser,
        id: i32,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<Game, AppError> {
        let game = self.find(id).await?;
        ensure_can_manage(current, &game)?;

        let ext = image_extension(content_type, data.len())?;
        let key = format!("covers/{}.{}", id, ext);

        self.storage.put_object(Bucket::Images, &key, data).await?;
        GameRepository::new(self.db).set_cover_key(id, &key).await?;

        self.find(id).await
    }

    pub async fn versions(
        &self,
        id: i32,
        viewer: Option<&CurrentUser>,
    ) -> Result<Vec<GameVersion>, AppError> {
        self.get(id, viewer).await?;

        Ok(GameVersionRepository::new(self.db).list_by_game(id).await?)
    }

    pub async fn latest_version(
        &self,
        id: i32,
        viewer: Option<&CurrentUser>,
    ) -> Result<GameVersion, AppError> {
        self.get(id, viewer).await?;

        GameVersionRepository::new(self.db)
            .latest(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game has no versions".to_string()))
    }

    /// Opens a version's binary for download.
    ///
    /// The caller must own the game or be allowed to manage it.
    pub async fn download(
        &self,
        current: &CurrentUser,
        game_id: i32,
        version_id: i32,
    ) -> Result<(GameVersion, StoredObject), AppError> {
        let game = self.find(game_id).await?;

        let owns = LibraryRepository::new(self.db)
            .owns(current.id(), game_id)
            .await?;
        if !owns {
            ensure_can_manage(current, &game)?;
        }

        let version = GameVersionRepository::new(self.db)
            .find_by_id(game_id, version_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Version not found".to_string()))?;

        let object = self
            .storage
            .open_object(Bucket::Games, &version.file_key)
            .await?;

        Ok((version, object))
    }

    async fn find(&self, id: i32) -> Result<Game, AppError> {
        GameRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }
}
