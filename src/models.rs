use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{bookings::BookingStatus, catalog_items::CatalogKind};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub id: Uuid,
    pub kind: CatalogKind,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "149.90")]
    pub price: Decimal,
    pub country: String,
    pub address: String,
    pub max_people: i32,
    pub duration: i32,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub files: Vec<String>,
    pub banner: Option<String>,
    pub is_approved: bool,
    pub product_type_id: Uuid,
    pub product_service_id: Uuid,
    pub product_category_id: Uuid,
    pub target_product_audience_id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Tour {
    pub id: Uuid,
    pub product_id: Uuid,
    pub departure_point: String,
    pub itinerary: Vec<String>,
    pub highlight: String,
    pub included: String,
    pub max_people: i32,
    pub duration: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TourDate {
    pub id: Uuid,
    pub tour_id: Uuid,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub product_id: Uuid,
    pub tour_date_id: Option<Uuid>,
    pub tickets: i32,
    #[schema(value_type = String, example = "299.80")]
    pub total: Decimal,
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
    #[serde(rename = "idTransaccion")]
    pub transaction_id: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking joined with its user, product and tour date, shaped for display.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub booking_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub product: Option<String>,
    pub tickets: i32,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub selected_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    pub id: Uuid,
    pub user_id: String,
    pub product_id: Uuid,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
