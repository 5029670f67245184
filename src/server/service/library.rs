use sea_orm::DatabaseConnection;

use crate::server::{
    data::library::LibraryRepository, error::AppError, model::library::LibraryEntry,
};

pub struct LibraryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LibraryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<LibraryEntry>, AppError> {
        Ok(LibraryRepository::new(self.db).list_by_user(user_id).await?)
    }

    pub async fn get(&self, user_id: i32, game_id: i32) -> Result<LibraryEntry, AppError> {
        LibraryRepository::new(self.db)
            .find(user_id, game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game is not in your library".to_string()))
    }

    /// Adds a finished play session to the counter of an owned game.
    pub async fn add_play_time(
        &self,
        user_id: i32,
        game_id: i32,
        seconds: i64,
    ) -> Result<LibraryEntry, AppError> {
        let repo = LibraryRepository::new(self.db);

        if !repo.add_play_time(user_id, game_id, seconds).await? {
            return Err(AppError::NotFound(
                "Game is not in your library".to_string(),
            ));
        }

        tracing::debug!(
            "User {} played game {} for {} seconds",
            user_id,
            game_id,
            seconds
        );

        self.get(user_id, game_id).await
    }
}
