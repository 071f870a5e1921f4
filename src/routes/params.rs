use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Optional foreign-key filters for `GET /products`.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductQuery {
    pub user_id: Option<String>,
    pub product_category_id: Option<Uuid>,
    pub product_type_id: Option<Uuid>,
    pub is_approved: Option<bool>,
}
