//! FAQ factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct FaqFactory<'a> {
    db: &'a DatabaseConnection,
    question: String,
    answer: String,
    sort_order: i32,
    is_deleted: bool,
}

impl<'a> FaqFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            question: format!("Question {}?", id),
            answer: format!("Answer {}", id),
            sort_order: 0,
            is_deleted: false,
        }
    }

    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    pub async fn build(self) -> Result<entity::faq::Model, DbErr> {
        let now = Utc::now();
        entity::faq::ActiveModel {
            question: ActiveValue::Set(self.question),
            answer: ActiveValue::Set(self.answer),
            sort_order: ActiveValue::Set(self.sort_order),
            is_deleted: ActiveValue::Set(self.is_deleted),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_faq(db: &DatabaseConnection) -> Result<entity::faq::Model, DbErr> {
    FaqFactory::new(db).build().await
}
