use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::tours::{TourDetails, TourPayload},
    entity::{
        catalog_items::{CatalogKind, Column as CatalogCol, Entity as CatalogItems},
        product_amenities::{
            ActiveModel as ProductAmenityActive, Column as ProductAmenityCol,
            Entity as ProductAmenities,
        },
        products::Entity as Products,
        tour_dates::{
            ActiveModel as TourDateActive, Column as TourDateCol, Entity as TourDates,
            Model as TourDateModel,
        },
        tours::{
            ActiveModel as TourActive, Column as TourCol, Entity as Tours, Itinerary,
            Model as TourModel,
        },
    },
    error::{AppError, AppResult},
    models::{Tour, TourDate},
    response::ApiResponse,
    services::{non_blank, parse_id},
    state::AppState,
};

/// A tour payload that passed every check that does not need the database.
#[derive(Debug, Clone)]
pub struct ValidTour {
    pub departure_point: String,
    pub dates: Vec<DateTime<Utc>>,
    pub max_people: i32,
    pub itinerary: Vec<String>,
    pub highlight: String,
    pub included: String,
    pub duration: i32,
    pub amenities: Vec<Uuid>,
}

/// Checks presence, date syntax and amenity list shape, in that order.
pub fn validate_tour(payload: TourPayload) -> AppResult<ValidTour> {
    let departure_point = non_blank(payload.departure_point);
    let highlight = non_blank(payload.highlight);
    let included = non_blank(payload.included);
    let available_dates = payload.available_dates.filter(|dates| !dates.is_empty());
    let max_people = payload.max_people.filter(|n| *n > 0);
    let duration = payload.duration.filter(|n| *n > 0);

    let mut missing = Vec::new();
    if departure_point.is_none() {
        missing.push("departure_point");
    }
    if available_dates.is_none() {
        missing.push("available_dates");
    }
    if max_people.is_none() {
        missing.push("max_people");
    }
    if highlight.is_none() {
        missing.push("highlight");
    }
    if included.is_none() {
        missing.push("included");
    }
    if duration.is_none() {
        missing.push("duration");
    }

    let (
        Some(departure_point),
        Some(available_dates),
        Some(max_people),
        Some(highlight),
        Some(included),
        Some(duration),
    ) = (
        departure_point,
        available_dates,
        max_people,
        highlight,
        included,
        duration,
    )
    else {
        return Err(AppError::validation(format!(
            "missing required tour fields: {}",
            missing.join(", ")
        )));
    };

    let dates = available_dates
        .iter()
        .map(|raw| {
            parse_tour_date(raw)
                .ok_or_else(|| AppError::validation(format!("date '{raw}' is not valid")))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let amenities = match payload.amenities {
        Some(ids) if !ids.is_empty() => {
            let mut seen = HashSet::new();
            ids.into_iter().filter(|id| seen.insert(*id)).collect()
        }
        _ => {
            return Err(AppError::validation(
                "amenities must be a non-empty list",
            ));
        }
    };

    Ok(ValidTour {
        departure_point,
        dates,
        max_people,
        itinerary: payload.itinerary,
        highlight,
        included,
        duration,
        amenities,
    })
}

/// Accepts RFC 3339 timestamps, naive date-times and bare dates; naive values are UTC.
pub fn parse_tour_date(raw: &str) -> Option<DateTime<Utc>> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
}

/// Writes the tour, its dates and its amenity links on `conn`. Callers pass a
/// transaction so that a failure here leaves none of the rows behind.
pub async fn insert_tour<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    tour: ValidTour,
) -> AppResult<TourDetails> {
    let known: HashSet<Uuid> = CatalogItems::find()
        .filter(CatalogCol::Id.is_in(tour.amenities.clone()))
        .filter(CatalogCol::Kind.eq(CatalogKind::Amenity))
        .all(conn)
        .await?
        .into_iter()
        .map(|item| item.id)
        .collect();
    let unknown: Vec<String> = tour
        .amenities
        .iter()
        .filter(|id| !known.contains(id))
        .map(Uuid::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::validation(format!(
            "unknown amenities: {}",
            unknown.join(", ")
        )));
    }

    let created = TourActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        departure_point: Set(tour.departure_point),
        itinerary: Set(Itinerary(tour.itinerary)),
        highlight: Set(tour.highlight),
        included: Set(tour.included),
        max_people: Set(tour.max_people),
        duration: Set(tour.duration),
        created_at: NotSet,
    }
    .insert(conn)
    .await?;

    let dates: Vec<TourDateModel> = tour
        .dates
        .iter()
        .map(|date| TourDateModel {
            id: Uuid::new_v4(),
            tour_id: created.id,
            date: date.fixed_offset(),
        })
        .collect();
    TourDates::insert_many(dates.iter().cloned().map(|date| TourDateActive {
        id: Set(date.id),
        tour_id: Set(date.tour_id),
        date: Set(date.date),
    }))
    .exec_without_returning(conn)
    .await?;

    ProductAmenities::insert_many(tour.amenities.iter().map(|amenity_id| ProductAmenityActive {
        product_id: Set(product_id),
        amenity_id: Set(*amenity_id),
    }))
    .exec_without_returning(conn)
    .await?;

    tracing::info!(
        product_id = %product_id,
        tour_id = %created.id,
        dates = dates.len(),
        amenities = tour.amenities.len(),
        "tour created"
    );

    Ok(TourDetails {
        tour: tour_from_entity(created),
        dates: dates.into_iter().map(tour_date_from_entity).collect(),
        amenities: tour.amenities,
    })
}

/// Adds a tour to an existing product. Missing capacity and duration fall
/// back to the product's own values.
pub async fn create_tour(
    state: &AppState,
    raw_product_id: &str,
    mut payload: TourPayload,
) -> AppResult<ApiResponse<TourDetails>> {
    let product_id = parse_id(raw_product_id, "product id")?;

    let product = Products::find_by_id(product_id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    payload.max_people.get_or_insert(product.max_people);
    payload.duration.get_or_insert(product.duration);
    let tour = validate_tour(payload)?;

    let txn = state.db().begin().await?;

    let existing = Tours::find()
        .filter(TourCol::ProductId.eq(product_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::validation("product already has a tour"));
    }

    let details = insert_tour(&txn, product_id, tour).await?;
    txn.commit().await?;

    Ok(ApiResponse::success("Tour created", details))
}

pub async fn get_tour(
    state: &AppState,
    raw_product_id: &str,
) -> AppResult<ApiResponse<TourDetails>> {
    let product_id = parse_id(raw_product_id, "product id")?;

    let tour = Tours::find()
        .filter(TourCol::ProductId.eq(product_id))
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Tour not found"))?;

    let dates = TourDates::find()
        .filter(TourDateCol::TourId.eq(tour.id))
        .order_by_asc(TourDateCol::Date)
        .all(state.db())
        .await?
        .into_iter()
        .map(tour_date_from_entity)
        .collect();

    let amenities = ProductAmenities::find()
        .filter(ProductAmenityCol::ProductId.eq(product_id))
        .all(state.db())
        .await?
        .into_iter()
        .map(|link| link.amenity_id)
        .collect();

    Ok(ApiResponse::success(
        "Tour",
        TourDetails {
            tour: tour_from_entity(tour),
            dates,
            amenities,
        },
    ))
}

fn tour_from_entity(model: TourModel) -> Tour {
    Tour {
        id: model.id,
        product_id: model.product_id,
        departure_point: model.departure_point,
        itinerary: model.itinerary.0,
        highlight: model.highlight,
        included: model.included,
        max_people: model.max_people,
        duration: model.duration,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn tour_date_from_entity(model: TourDateModel) -> TourDate {
    TourDate {
        id: model.id,
        tour_id: model.tour_id,
        date: model.date.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    fn payload() -> TourPayload {
        TourPayload {
            departure_point: Some("Plaza Mayor".into()),
            available_dates: Some(vec!["2026-11-02T09:00:00Z".into()]),
            max_people: Some(12),
            itinerary: vec!["Old town".into(), "Harbour".into()],
            highlight: Some("Sunset over the bay".into()),
            included: Some("Guide, snacks".into()),
            duration: Some(3),
            amenities: Some(vec![Uuid::new_v4()]),
        }
    }

    #[test]
    fn valid_payload_passes() {
        let tour = validate_tour(payload()).unwrap();
        assert_eq!(tour.dates.len(), 1);
        assert_eq!(tour.itinerary.len(), 2);
        assert_eq!(tour.amenities.len(), 1);
    }

    #[test]
    fn missing_fields_are_listed() {
        let request = TourPayload {
            departure_point: None,
            available_dates: Some(vec![]),
            highlight: Some(" ".into()),
            ..payload()
        };
        let err = validate_tour(request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required tour fields: departure_point, available_dates, highlight"
        );
    }

    #[test]
    fn unparsable_date_is_named() {
        let request = TourPayload {
            available_dates: Some(vec!["2026-11-02".into(), "not-a-date".into()]),
            ..payload()
        };
        let err = validate_tour(request).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("'not-a-date'"));
    }

    #[test]
    fn empty_amenities_rejected() {
        for amenities in [None, Some(vec![])] {
            let request = TourPayload {
                amenities,
                ..payload()
            };
            let err = validate_tour(request).unwrap_err();
            assert_eq!(err.to_string(), "amenities must be a non-empty list");
        }
    }

    #[test]
    fn duplicate_amenities_collapse() {
        let id = Uuid::new_v4();
        let request = TourPayload {
            amenities: Some(vec![id, id]),
            ..payload()
        };
        assert_eq!(validate_tour(request).unwrap().amenities, vec![id]);
    }

    #[test]
    fn date_formats() {
        let offset = parse_tour_date("2026-11-02T09:00:00+02:00").unwrap();
        assert_eq!(offset.hour(), 7);

        let naive = parse_tour_date("2026-11-02 09:30").unwrap();
        assert_eq!((naive.day(), naive.hour(), naive.minute()), (2, 9, 30));

        let bare = parse_tour_date("2026-11-02").unwrap();
        assert_eq!(bare.hour(), 0);

        assert!(parse_tour_date("not-a-date").is_none());
        assert!(parse_tour_date("2026-13-40").is_none());
    }
}
