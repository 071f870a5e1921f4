use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{entity::bookings::BookingStatus, models::Booking};

/// Allow-listed booking fields. The four identifying fields are optional here
/// so that a missing one is reported by name rather than as a parse failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub user_id: Option<String>,
    /// Blank counts as missing; anything else must be a UUID.
    #[schema(value_type = Option<String>, format = Uuid)]
    pub product_id: Option<String>,
    #[serde(rename = "paymentMethod")]
    pub payment_method: Option<String>,
    #[serde(rename = "idTransaccion")]
    pub transaction_id: Option<String>,
    pub tour_date_id: Option<Uuid>,
    pub tickets: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub total: Option<Decimal>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    pub tickets: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub total: Option<Decimal>,
    pub status: Option<BookingStatus>,
    pub tour_date_id: Option<Uuid>,
    #[serde(rename = "paymentMethod")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct BookingList {
    #[schema(value_type = Vec<Booking>)]
    pub items: Vec<Booking>,
}
