use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::news::{CreateNewsParam, NewsArticle, UpdateNewsParam};

pub struct NewsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NewsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an unpublished draft.
    pub async fn create(&self, param: CreateNewsParam) -> Result<NewsArticle, DbErr> {
        let now = Utc::now();

        let entity = entity::news_article::ActiveModel {
            author_id: ActiveValue::Set(param.author_id),
            title: ActiveValue::Set(param.title),
            summary: ActiveValue::Set(param.summary),
            content: ActiveValue::Set(param.content),
            is_published: ActiveValue::Set(false),
            published_at: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(NewsArticle::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<NewsArticle>, DbErr> {
        let entity = entity::prelude::NewsArticle::find_by_id(id)
            .filter(entity::news_article::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?;

        Ok(entity.map(NewsArticle::from_entity))
    }

    /// Published articles, most recently published first.
    ///
    /// # Returns
    /// - `Ok((articles, total))` - Articles for the requested page and total published count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_published_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<NewsArticle>, u64), DbErr> {
        let paginator = entity::prelude::NewsArticle::find()
            .filter(entity::news_article::Column::IsDeleted.eq(false))
            .filter(entity::news_article::Column::IsPublished.eq(true))
            .order_by_desc(entity::news_article::Column::PublishedAt)
            .order_by_desc(entity::news_article::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(NewsArticle::from_entity).collect(), total))
    }

    pub async fn update(&self, id: i32, param: UpdateNewsParam) -> Result<Option<NewsArticle>, DbErr> {
        let Some(entity) = entity::prelude::NewsArticle::find_by_id(id)
            .filter(entity::news_article::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::news_article::ActiveModel = entity.into();
        if let Some(title) = param.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(summary) = param.summary {
            active.summary = ActiveValue::Set(Some(summary));
        }
        if let Some(content) = param.content {
            active.content = ActiveValue::Set(content);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(NewsArticle::from_entity(entity)))
    }

    /// Publishes an article. `published_at` keeps its first value on republish.
    pub async fn publish(&self, id: i32) -> Result<Option<NewsArticle>, DbErr> {
        let Some(entity) = entity::prelude::NewsArticle::find_by_id(id)
            .filter(entity::news_article::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let now = Utc::now();
        let published_at = entity.published_at.unwrap_or(now);

        let mut active: entity::news_article::ActiveModel = entity.into();
        active.is_published = ActiveValue::Set(true);
        active.published_at = ActiveValue::Set(Some(published_at));
        active.updated_at = ActiveValue::Set(now);

        let entity = active.update(self.db).await?;

        Ok(Some(NewsArticle::from_entity(entity)))
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::NewsArticle::update_many()
            .filter(entity::news_article::Column::Id.eq(id))
            .filter(entity::news_article::Column::IsDeleted.eq(false))
            .col_expr(entity::news_article::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::news_article::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
