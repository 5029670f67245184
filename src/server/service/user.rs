use bytes::Bytes;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{user::UserRepository, user_follow::UserFollowRepository},
    error::AppError,
    model::{
        audit::AuditEntry,
        user::{PublicProfile, UpdateProfileParam, User},
        Paginated,
    },
    service::{audit::AuditLogService, image::image_extension},
    storage::{Bucket, StorageService},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn StorageService,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn StorageService) -> Self {
        Self { db, storage }
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .update_profile(user_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Stores a new avatar image as `avatars/{user_id}.{ext}` in the images bucket.
    pub async fn set_avatar(
        &self,
        user_id: i32,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<User, AppError> {
        let ext = image_extension(content_type, data.len())?;
        let key = format!("avatars/{}.{}", user_id, ext);

        self.storage.put_object(Bucket::Images, &key, data).await?;

        let repo = UserRepository::new(self.db);
        repo.set_avatar_key(user_id, &key).await?;

        repo.find_active_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Public profile with follow counts.
    pub async fn get_profile(&self, user_id: i32) -> Result<PublicProfile, AppError> {
        let user = self.find_active(user_id).await?;
        let follows = UserFollowRepository::new(self.db);

        Ok(PublicProfile {
            follower_count: follows.count_followers(user.id).await?,
            following_count: follows.count_following(user.id).await?,
            user,
        })
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<User>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .search_paginated(search, page, per_page)
            .await?;

        Ok(Paginated::new(users, total, page, per_page))
    }

    /// Soft deletes a user and records who did it.
    pub async fn delete(&self, actor_id: i32, user_id: i32) -> Result<(), AppError> {
        if !UserRepository::new(self.db).soft_delete(user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("User {} deleted by {}", user_id, actor_id);

        AuditLogService::new(self.db)
            .record_best_effort(AuditEntry::new(actor_id, "user.delete", "user", user_id))
            .await;

        Ok(())
    }

    /// # Returns
    /// - `Ok(())` - Now following
    /// - `Err(AppError::BadRequest)` - Following yourself or already following
    /// - `Err(AppError::NotFound)` - Target user missing or deleted
    pub async fn follow(&self, follower_id: i32, followed_id: i32) -> Result<(), AppError> {
        if follower_id == followed_id {
            return Err(AppError::BadRequest("You cannot follow yourself".to_string()));
        }

        self.find_active(followed_id).await?;

        let follows = UserFollowRepository::new(self.db);
        if follows.exists(follower_id, followed_id).await? {
            return Err(AppError::BadRequest(
                "You already follow this user".to_string(),
            ));
        }

        follows.create(follower_id, followed_id).await?;

        Ok(())
    }

    pub async fn unfollow(&self, follower_id: i32, followed_id: i32) -> Result<(), AppError> {
        if !UserFollowRepository::new(self.db)
            .delete(follower_id, followed_id)
            .await?
        {
            return Err(AppError::NotFound(
                "You do not follow this user".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn followers(&self, user_id: i32) -> Result<Vec<User>, AppError> {
        self.find_active(user_id).await?;
        Ok(UserFollowRepository::new(self.db).followers(user_id).await?)
    }

    pub async fn following(&self, user_id: i32) -> Result<Vec<User>, AppError> {
        self.find_active(user_id).await?;
        Ok(UserFollowRepository::new(self.db).following(user_id).await?)
    }

    async fn find_active(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_active_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
