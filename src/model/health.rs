use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct HealthDto {
    /// `ok` when every dependency answered, `degraded` otherwise.
    pub status: String,
    pub database: bool,
}
