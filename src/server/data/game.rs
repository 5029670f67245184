//! Game data repository.
//!
//! Soft-deleted games are filtered out of every query here; callers never see them.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::game::{CreateGameParam, Game, GameSearchParam, UpdateGameParam};

pub struct GameRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an unpublished game.
    ///
    /// # Arguments
    /// - `param` - Owner and listing fields
    ///
    /// # Returns
    /// - `Ok(Game)` - The created draft
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateGameParam) -> Result<Game, DbErr> {
        let now = Utc::now();

        let entity = entity::game::ActiveModel {
            developer_id: ActiveValue::Set(param.developer_id),
            title: ActiveValue::Set(param.title),
            short_description: ActiveValue::Set(param.short_description),
            description: ActiveValue::Set(param.description),
            genre: ActiveValue::Set(param.genre),
            price_cents: ActiveValue::Set(param.price_cents),
            cover_image_key: ActiveValue::Set(None),
            is_published: ActiveValue::Set(false),
            release_date: ActiveValue::Set(param.release_date),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Game::from_entity(entity))
    }

    /// Finds a non-deleted game, published or not.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Game>, DbErr> {
        let entity = entity::prelude::Game::find_by_id(id)
            .filter(entity::game::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?;

        Ok(entity.map(Game::from_entity))
    }

    /// Loads several non-deleted games at once.
    pub async fn find_many(&self, ids: &[i32]) -> Result<Vec<Game>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Game::find()
            .filter(entity::game::Column::Id.is_in(ids.to_vec()))
            .filter(entity::game::Column::IsDeleted.eq(false))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Game::from_entity).collect())
    }

    /// Lists published games ordered by title.
    ///
    /// # Arguments
    /// - `param` - Optional title substring and genre filters plus pagination
    ///
    /// # Returns
    /// - `Ok((games, total))` - Games for the requested page and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn search_published(
        &self,
        param: &GameSearchParam,
    ) -> Result<(Vec<Game>, u64), DbErr> {
        let mut query = entity::prelude::Game::find()
            .filter(entity::game::Column::IsDeleted.eq(false))
            .filter(entity::game::Column::IsPublished.eq(true))
            .order_by_asc(entity::game::Column::Title)
            .order_by_asc(entity::game::Column::Id);

        if let Some(search) = param.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(entity::game::Column::Title.contains(search));
        }
        if let Some(genre) = param.genre.as_deref().filter(|g| !g.is_empty()) {
            query = query.filter(entity::game::Column::Genre.eq(genre));
        }

        let paginator = query.paginate(self.db, param.per_page);
        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(param.page).await?;

        Ok((entities.into_iter().map(Game::from_entity).collect(), total))
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Game))` - Updated game
    /// - `Ok(None)` - Game missing or deleted
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, id: i32, param: UpdateGameParam) -> Result<Option<Game>, DbErr> {
        let Some(entity) = entity::prelude::Game::find_by_id(id)
            .filter(entity::game::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::game::ActiveModel = entity.into();
        if let Some(title) = param.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(short_description) = param.short_description {
            active.short_description = ActiveValue::Set(short_description);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(genre) = param.genre {
            active.genre = ActiveValue::Set(Some(genre));
        }
        if let Some(price_cents) = param.price_cents {
            active.price_cents = ActiveValue::Set(price_cents);
        }
        if let Some(release_date) = param.release_date {
            active.release_date = ActiveValue::Set(Some(release_date));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Game::from_entity(entity)))
    }

    pub async fn set_published(&self, id: i32, is_published: bool) -> Result<(), DbErr> {
        entity::prelude::Game::update_many()
            .filter(entity::game::Column::Id.eq(id))
            .filter(entity::game::Column::IsDeleted.eq(false))
            .col_expr(entity::game::Column::IsPublished, Expr::value(is_published))
            .col_expr(entity::game::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn set_cover_key(&self, id: i32, cover_image_key: &str) -> Result<(), DbErr> {
        entity::prelude::Game::update_many()
            .filter(entity::game::Column::Id.eq(id))
            .col_expr(entity::game::Column::CoverImageKey, Expr::value(cover_image_key))
            .col_expr(entity::game::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a game as deleted and unpublishes it.
    ///
    /// # Returns
    /// - `Ok(true)` - Game existed and is now deleted
    /// - `Ok(false)` - Game missing or already deleted
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Game::update_many()
            .filter(entity::game::Column::Id.eq(id))
            .filter(entity::game::Column::IsDeleted.eq(false))
            .col_expr(entity::game::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::game::Column::IsPublished, Expr::value(false))
            .col_expr(entity::game::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
