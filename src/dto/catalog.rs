use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::CatalogItem;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CatalogItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CatalogList {
    #[schema(value_type = Vec<CatalogItem>)]
    pub items: Vec<CatalogItem>,
}
