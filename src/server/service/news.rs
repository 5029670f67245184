use sea_orm::DatabaseConnection;

use crate::server::{
    data::news::NewsRepository,
    error::AppError,
    model::{
        news::{CreateNewsParam, NewsArticle, UpdateNewsParam},
        Paginated,
    },
};

pub struct NewsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NewsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_published(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<NewsArticle>, AppError> {
        let (articles, total) = NewsRepository::new(self.db)
            .get_published_paginated(page, per_page)
            .await?;

        Ok(Paginated::new(articles, total, page, per_page))
    }

    /// An article by id. Drafts are only visible to admins.
    pub async fn get(&self, id: i32, include_drafts: bool) -> Result<NewsArticle, AppError> {
        NewsRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|article| article.is_published || include_drafts)
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
    }

    pub async fn create(&self, param: CreateNewsParam) -> Result<NewsArticle, AppError> {
        Ok(NewsRepository::new(self.db).create(param).await?)
    }

    pub async fn update(&self, id: i32, param: UpdateNewsParam) -> Result<NewsArticle, AppError> {
        NewsRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
    }

    /// Publishes a draft. Publishing again keeps the first `published_at`.
    pub async fn publish(&self, id: i32) -> Result<NewsArticle, AppError> {
        NewsRepository::new(self.db)
            .publish(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !NewsRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("Article not found".to_string()));
        }

        Ok(())
    }
}
