use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::validation::validate_not_blank;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct NewsArticleDto {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateNewsDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 500))]
    pub summary: Option<String>,
    #[validate(length(min = 1, max = 50000), custom(function = "validate_not_blank"))]
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct UpdateNewsDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub summary: Option<String>,
    #[validate(length(min = 1, max = 50000), custom(function = "validate_not_blank"))]
    pub content: Option<String>,
}
