use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::validation::validate_not_blank;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FaqDto {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateFaqDto {
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    pub question: String,
    #[validate(length(min = 1, max = 10000), custom(function = "validate_not_blank"))]
    pub answer: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct UpdateFaqDto {
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    pub question: Option<String>,
    #[validate(length(min = 1, max = 10000), custom(function = "validate_not_blank"))]
    pub answer: Option<String>,
    pub sort_order: Option<i32>,
}
