use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Tour, TourDate};

/// Tour fields as submitted by the product form. Every field is optional so
/// that validation can report all missing ones at once.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct TourPayload {
    pub departure_point: Option<String>,
    pub available_dates: Option<Vec<String>>,
    pub max_people: Option<i32>,
    #[serde(default)]
    pub itinerary: Vec<String>,
    pub highlight: Option<String>,
    pub included: Option<String>,
    pub duration: Option<i32>,
    pub amenities: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TourDetails {
    pub tour: Tour,
    pub dates: Vec<TourDate>,
    pub amenities: Vec<Uuid>,
}
