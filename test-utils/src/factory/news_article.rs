//! News article factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct NewsArticleFactory<'a> {
    db: &'a DatabaseConnection,
    author_id: i32,
    title: String,
    published_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl<'a> NewsArticleFactory<'a> {
    /// Defaults to an unpublished draft.
    pub fn new(db: &'a DatabaseConnection, author_id: i32) -> Self {
        Self {
            db,
            author_id,
            title: format!("News {}", next_id()),
            published_at: None,
            is_deleted: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Publishes the article at the given instant.
    pub fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    pub async fn build(self) -> Result<entity::news_article::Model, DbErr> {
        let now = Utc::now();
        entity::news_article::ActiveModel {
            author_id: ActiveValue::Set(self.author_id),
            title: ActiveValue::Set(self.title),
            summary: ActiveValue::Set(None),
            content: ActiveValue::Set("Body".to_string()),
            is_published: ActiveValue::Set(self.published_at.is_some()),
            published_at: ActiveValue::Set(self.published_at),
            is_deleted: ActiveValue::Set(self.is_deleted),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_news_article(
    db: &DatabaseConnection,
    author_id: i32,
) -> Result<entity::news_article::Model, DbErr> {
    NewsArticleFactory::new(db, author_id).build().await
}
