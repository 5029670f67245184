use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::{api::PageDto, validation::validate_not_blank};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ReviewDto {
    pub id: i32,
    pub game_id: i32,
    pub user_id: i32,
    pub username: String,
    pub rating: i16,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GameReviewsDto {
    pub reviews: PageDto<ReviewDto>,
    /// Mean rating over every visible review, absent when there are none.
    pub average_rating: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateReviewDto {
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(min = 1, max = 5000), custom(function = "validate_not_blank"))]
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct UpdateReviewDto {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,
    #[validate(length(min = 1, max = 5000), custom(function = "validate_not_blank"))]
    pub content: Option<String>,
}
