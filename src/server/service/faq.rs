use sea_orm::DatabaseConnection;

use crate::server::{
    data::faq::FaqRepository,
    error::AppError,
    model::faq::{CreateFaqParam, Faq, UpdateFaqParam},
};

pub struct FaqService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FaqService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Faq>, AppError> {
        Ok(FaqRepository::new(self.db).get_all().await?)
    }

    pub async fn get(&self, id: i32) -> Result<Faq, AppError> {
        FaqRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("FAQ entry not found".to_string()))
    }

    pub async fn create(&self, param: CreateFaqParam) -> Result<Faq, AppError> {
        Ok(FaqRepository::new(self.db).create(param).await?)
    }

    pub async fn update(&self, id: i32, param: UpdateFaqParam) -> Result<Faq, AppError> {
        FaqRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("FAQ entry not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !FaqRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("FAQ entry not found".to_string()));
        }

        Ok(())
    }
}
