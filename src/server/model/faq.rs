use chrono::{DateTime, Utc};

use crate::model::faq::FaqDto;

#[derive(Debug, Clone, PartialEq)]
pub struct Faq {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn from_entity(entity: entity::faq::Model) -> Self {
        Self {
            id: entity.id,
            question: entity.question,
            answer: entity.answer,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> FaqDto {
        FaqDto {
            id: self.id,
            question: self.question,
            answer: self.answer,
            sort_order: self.sort_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateFaqParam {
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFaqParam {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub sort_order: Option<i32>,
}
