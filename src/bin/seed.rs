use anyhow::Context;
use rust_decimal::Decimal;
use tour_booking_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        catalog::CatalogItemRequest, products::CreateProductRequest, tours::TourPayload,
        users::CreateUserRequest,
    },
    entity::catalog_items::CatalogKind,
    routes::params::ProductQuery,
    services::{catalog_service, product_service, user_service},
    state::AppState,
};
use uuid::Uuid;

const DEMO_USER_ID: &str = "demo-guide";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(config.database, config.max_connections).await?;
    run_migrations(&orm).await?;
    let state = AppState::new(orm);

    let tour_type = ensure_item(&state, CatalogKind::ProductType, "Tour").await?;
    ensure_item(&state, CatalogKind::ProductType, "Experience").await?;
    let service = ensure_item(&state, CatalogKind::Service, "Guided visit").await?;
    let category = ensure_item(&state, CatalogKind::Category, "Nature").await?;
    let audience = ensure_item(&state, CatalogKind::Audience, "Families").await?;
    let mut amenities = Vec::new();
    for name in ["Transport", "Lunch", "Bilingual guide"] {
        amenities.push(ensure_item(&state, CatalogKind::Amenity, name).await?);
    }

    let user_id = ensure_user(&state).await?;

    let existing = product_service::list_products(
        &state,
        ProductQuery {
            user_id: Some(user_id.clone()),
            ..Default::default()
        },
    )
    .await?;
    if existing.data.is_some_and(|list| !list.items.is_empty()) {
        println!("Demo products already present for {user_id}");
        return Ok(());
    }

    let product = product_service::create_product(
        &state,
        CreateProductRequest {
            name: "Cloud forest day trip".to_string(),
            description: "Hike through the cloud forest with a local guide".to_string(),
            price: Decimal::new(8950, 2),
            country: "Costa Rica".to_string(),
            address: "Monteverde".to_string(),
            max_people: 12,
            duration: 8,
            images: Vec::new(),
            videos: Vec::new(),
            files: Vec::new(),
            banner: None,
            product_type_id: tour_type,
            product_service_id: service,
            product_category_id: category,
            target_product_audience_id: audience,
            user_id: user_id.clone(),
            tour: Some(TourPayload {
                departure_point: Some("Santa Elena central park".to_string()),
                available_dates: Some(vec![
                    "2026-11-07T08:00:00Z".to_string(),
                    "2026-11-14T08:00:00Z".to_string(),
                ]),
                max_people: Some(12),
                itinerary: vec![
                    "Pick-up at the park".to_string(),
                    "Hanging bridges".to_string(),
                    "Lunch at the reserve".to_string(),
                ],
                highlight: Some("Quetzal sightings".to_string()),
                included: Some("Transport, lunch and entrance fees".to_string()),
                duration: Some(8),
                amenities: Some(amenities),
            }),
        },
    )
    .await?;

    let product_id = product.data.map(|p| p.id).context("product not returned")?;
    println!("Seed completed. User ID: {user_id}, Product ID: {product_id}");
    Ok(())
}

async fn ensure_item(state: &AppState, kind: CatalogKind, name: &str) -> anyhow::Result<Uuid> {
    let existing = catalog_service::list_items(state, kind)
        .await?
        .data
        .into_iter()
        .flat_map(|list| list.items)
        .find(|item| item.name == name);
    if let Some(item) = existing {
        return Ok(item.id);
    }

    let created = catalog_service::create_item(
        state,
        kind,
        CatalogItemRequest {
            name: Some(name.to_string()),
            description: None,
        },
    )
    .await?;
    let id = created.data.map(|item| item.id).context("catalog item not returned")?;
    println!("Ensured {} {name}", kind.label());
    Ok(id)
}

async fn ensure_user(state: &AppState) -> anyhow::Result<String> {
    if user_service::get_user(state, DEMO_USER_ID).await.is_ok() {
        return Ok(DEMO_USER_ID.to_string());
    }
    user_service::create_user(
        state,
        CreateUserRequest {
            id: Some(DEMO_USER_ID.to_string()),
            email: Some("guide@example.com".to_string()),
            first_name: "Demo".to_string(),
            last_name: "Guide".to_string(),
        },
    )
    .await?;
    println!("Ensured user {DEMO_USER_ID}");
    Ok(DEMO_USER_ID.to_string())
}
