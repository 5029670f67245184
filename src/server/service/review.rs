use sea_orm::DatabaseConnection;

use crate::server::{
    data::{game::GameRepository, library::LibraryRepository, review::ReviewRepository},
    error::{auth::AuthError, AppError},
    middleware::auth::{CurrentUser, Permission},
    model::{
        review::{CreateReviewParam, Review, UpdateReviewParam},
        Paginated,
    },
};

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reviews of a published game, newest first, with the average rating.
    pub async fn list(
        &self,
        game_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Paginated<Review>, Option<f64>), AppError> {
        self.find_published_game(game_id).await?;

        let repo = ReviewRepository::new(self.db);
        let (reviews, total) = repo.list_by_game(game_id, page, per_page).await?;
        let average = repo.average_rating(game_id).await?;

        Ok((Paginated::new(reviews, total, page, per_page), average))
    }

    /// # Returns
    /// - `Ok(Review)` - Created review
    /// - `Err(AppError::NotFound)` - Game missing or unpublished
    /// - `Err(AuthError::AccessDenied)` - Caller does not own the game
    /// - `Err(AppError::BadRequest)` - Caller already reviewed the game
    pub async fn create(&self, param: CreateReviewParam) -> Result<Review, AppError> {
        self.find_published_game(param.game_id).await?;

        if !LibraryRepository::new(self.db)
            .owns(param.user_id, param.game_id)
            .await?
        {
            return Err(AuthError::AccessDenied(
                param.user_id,
                format!("reviewing unowned game {}", param.game_id),
            )
            .into());
        }

        let repo = ReviewRepository::new(self.db);
        if repo.exists_for_user(param.game_id, param.user_id).await? {
            return Err(AppError::BadRequest(
                "You have already reviewed this game".to_string(),
            ));
        }

        Ok(repo.create(param).await?)
    }

    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        param: UpdateReviewParam,
    ) -> Result<Review, AppError> {
        let review = self.find(id).await?;

        if review.user_id != current.id() {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("editing review {} of another user", id),
            )
            .into());
        }

        ReviewRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    /// Authors delete their own reviews; moderators delete any.
    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        let review = self.find(id).await?;

        if review.user_id != current.id() && !current.satisfies(Permission::Moderate) {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("deleting review {} of another user", id),
            )
            .into());
        }

        ReviewRepository::new(self.db).soft_delete(id).await?;

        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Review, AppError> {
        ReviewRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    async fn find_published_game(&self, game_id: i32) -> Result<(), AppError> {
        match GameRepository::new(self.db).find_by_id(game_id).await? {
            Some(game) if game.is_published => Ok(()),
            _ => Err(AppError::NotFound("Game not found".to_string())),
        }
    }
}
