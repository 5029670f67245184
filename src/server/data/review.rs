use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    data::user::UserRepository,
    model::review::{CreateReviewParam, Review, UpdateReviewParam},
};

pub struct ReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    async fn with_username(&self, entity: entity::review::Model) -> Result<Review, DbErr> {
        let username = UserRepository::new(self.db)
            .find_by_id(entity.user_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_default();

        Ok(Review::from_entity(entity, username))
    }

    pub async fn create(&self, param: CreateReviewParam) -> Result<Review, DbErr> {
        let now = Utc::now();

        let entity = entity::review::ActiveModel {
            game_id: ActiveValue::Set(param.game_id),
            user_id: ActiveValue::Set(param.user_id),
            rating: ActiveValue::Set(param.rating),
            content: ActiveValue::Set(param.content),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.with_username(entity).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Review>, DbErr> {
        let Some(entity) = entity::prelude::Review::find_by_id(id)
            .filter(entity::review::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.with_username(entity).await?))
    }

    /// Whether the user already has a live review for the game.
    pub async fn exists_for_user(&self, game_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Review::find()
            .filter(entity::review::Column::GameId.eq(game_id))
            .filter(entity::review::Column::UserId.eq(user_id))
            .filter(entity::review::Column::IsDeleted.eq(false))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn update(&self, id: i32, param: UpdateReviewParam) -> Result<Option<Review>, DbErr> {
        let Some(entity) = entity::prelude::Review::find_by_id(id)
            .filter(entity::review::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::review::ActiveModel = entity.into();
        if let Some(rating) = param.rating {
            active.rating = ActiveValue::Set(rating);
        }
        if let Some(content) = param.content {
            active.content = ActiveValue::Set(content);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(self.with_username(entity).await?))
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Review::update_many()
            .filter(entity::review::Column::Id.eq(id))
            .filter(entity::review::Column::IsDeleted.eq(false))
            .col_expr(entity::review::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::review::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Live reviews for a game, newest first.
    ///
    /// # Returns
    /// - `Ok((reviews, total))` - Reviews for the requested page with author usernames
    /// - `Err(DbErr)` - Database error
    pub async fn list_by_game(
        &self,
        game_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Review>, u64), DbErr> {
        let paginator = entity::prelude::Review::find()
            .filter(entity::review::Column::GameId.eq(game_id))
            .filter(entity::review::Column::IsDeleted.eq(false))
            .order_by_desc(entity::review::Column::CreatedAt)
            .order_by_desc(entity::review::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        let user_ids: Vec<i32> = entities.iter().map(|r| r.user_id).collect();
        let usernames: HashMap<i32, String> = UserRepository::new(self.db)
            .find_many(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let reviews = entities
            .into_iter()
            .map(|entity| {
                let username = usernames.get(&entity.user_id).cloned().unwrap_or_default();
                Review::from_entity(entity, username)
            })
            .collect();

        Ok((reviews, total))
    }

    /// Mean rating of live reviews, `None` when the game has none.
    pub async fn average_rating(&self, game_id: i32) -> Result<Option<f64>, DbErr> {
        let ratings: Vec<i16> = entity::prelude::Review::find()
            .select_only()
            .column(entity::review::Column::Rating)
            .filter(entity::review::Column::GameId.eq(game_id))
            .filter(entity::review::Column::IsDeleted.eq(false))
            .into_tuple()
            .all(self.db)
            .await?;

        if ratings.is_empty() {
            return Ok(None);
        }

        let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();

        Ok(Some(sum as f64 / ratings.len() as f64))
    }
}
