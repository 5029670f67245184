use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{data::user::UserRepository, model::user::User};

pub struct UserFollowRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserFollowRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn exists(&self, follower_id: i32, followed_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::UserFollow::find()
            .filter(entity::user_follow::Column::FollowerId.eq(follower_id))
            .filter(entity::user_follow::Column::FollowedId.eq(followed_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn create(&self, follower_id: i32, followed_id: i32) -> Result<(), DbErr> {
        entity::user_follow::ActiveModel {
            follower_id: ActiveValue::Set(follower_id),
            followed_id: ActiveValue::Set(followed_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Removes a follow edge.
    ///
    /// # Returns
    /// - `Ok(true)` - The edge existed and was removed
    /// - `Ok(false)` - `follower_id` was not following `followed_id`
    pub async fn delete(&self, follower_id: i32, followed_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::UserFollow::delete_many()
            .filter(entity::user_follow::Column::FollowerId.eq(follower_id))
            .filter(entity::user_follow::Column::FollowedId.eq(followed_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_followers(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::UserFollow::find()
            .filter(entity::user_follow::Column::FollowedId.eq(user_id))
            .count(self.db)
            .await
    }

    pub async fn count_following(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::UserFollow::find()
            .filter(entity::user_follow::Column::FollowerId.eq(user_id))
            .count(self.db)
            .await
    }

    /// Active users following `user_id`, most recent follow first.
    pub async fn followers(&self, user_id: i32) -> Result<Vec<User>, DbErr> {
        let ids: Vec<i32> = entity::prelude::UserFollow::find()
            .select_only()
            .column(entity::user_follow::Column::FollowerId)
            .filter(entity::user_follow::Column::FollowedId.eq(user_id))
            .order_by_desc(entity::user_follow::Column::Id)
            .into_tuple()
            .all(self.db)
            .await?;

        self.load_active_in_order(&ids).await
    }

    /// Active users `user_id` follows, most recent follow first.
    pub async fn following(&self, user_id: i32) -> Result<Vec<User>, DbErr> {
        let ids: Vec<i32> = entity::prelude::UserFollow::find()
            .select_only()
            .column(entity::user_follow::Column::FollowedId)
            .filter(entity::user_follow::Column::FollowerId.eq(user_id))
            .order_by_desc(entity::user_follow::Column::Id)
            .into_tuple()
            .all(self.db)
            .await?;

        self.load_active_in_order(&ids).await
    }

    async fn load_active_in_order(&self, ids: &[i32]) -> Result<Vec<User>, DbErr> {
        let users = UserRepository::new(self.db).find_many(ids).await?;

        Ok(ids
            .iter()
            .filter_map(|id| users.iter().find(|u| u.id == *id && !u.is_deleted))
            .cloned()
            .collect())
    }
}
