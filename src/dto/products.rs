use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{dto::tours::TourPayload, models::Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "149.90")]
    pub price: Decimal,
    pub country: String,
    #[serde(default)]
    pub address: String,
    pub max_people: i32,
    pub duration: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    pub banner: Option<String>,
    pub product_type_id: Uuid,
    pub product_service_id: Uuid,
    pub product_category_id: Uuid,
    pub target_product_audience_id: Uuid,
    pub user_id: String,
    /// Required when the product type is "Tour".
    pub tour: Option<TourPayload>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub max_people: Option<i32>,
    pub duration: Option<i32>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub files: Option<Vec<String>>,
    pub banner: Option<String>,
    pub product_category_id: Option<Uuid>,
    pub target_product_audience_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApprovalRequest {
    pub is_approved: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
