use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Rating;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRatingRequest {
    pub user_id: String,
    pub product_id: Uuid,
    pub score: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRatingRequest {
    pub score: Option<i16>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RatingList {
    #[schema(value_type = Vec<Rating>)]
    pub items: Vec<Rating>,
}
