use chrono::{DateTime, Utc};

use crate::model::news::NewsArticleDto;

#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticle {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub is_published: bool,
    /// Set the first time the article is published and never moved afterwards.
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsArticle {
    pub fn from_entity(entity: entity::news_article::Model) -> Self {
        Self {
            id: entity.id,
            author_id: entity.author_id,
            title: entity.title,
            summary: entity.summary,
            content: entity.content,
            is_published: entity.is_published,
            published_at: entity.published_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> NewsArticleDto {
        NewsArticleDto {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            summary: self.summary,
            content: self.content,
            is_published: self.is_published,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNewsParam {
    pub author_id: i32,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNewsParam {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
}
