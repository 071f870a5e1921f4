use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Discriminates the lookup tables that share the `catalog_items` table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    #[sea_orm(string_value = "service")]
    Service,
    #[sea_orm(string_value = "category")]
    Category,
    #[sea_orm(string_value = "audience")]
    Audience,
    #[sea_orm(string_value = "amenity")]
    Amenity,
    #[sea_orm(string_value = "product_type")]
    ProductType,
}

impl CatalogKind {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Service => "product service",
            CatalogKind::Category => "product category",
            CatalogKind::Audience => "target audience",
            CatalogKind::Amenity => "amenity",
            CatalogKind::ProductType => "product type",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "catalog_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: CatalogKind,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_amenities::Entity")]
    ProductAmenities,
}

impl Related<super::product_amenities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductAmenities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
