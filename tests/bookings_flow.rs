use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Statement};
use sqlx::postgres::PgConnectOptions;
use uuid::Uuid;

use tour_booking_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        bookings::CreateBookingRequest,
        catalog::CatalogItemRequest,
        products::CreateProductRequest,
        tours::TourPayload,
        users::CreateUserRequest,
    },
    entity::{Products, Tours, bookings::BookingStatus, catalog_items::CatalogKind},
    error::AppError,
    services::{booking_service, catalog_service, product_service, tour_service, user_service},
    state::AppState,
};

struct Catalog {
    tour_type: Uuid,
    service: Uuid,
    category: Uuid,
    audience: Uuid,
    amenity: Uuid,
}

// Integration flow: catalog + user -> tour product -> booking -> detail read,
// webhook status update and deletion.
#[tokio::test]
async fn tour_booking_flow() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let catalog = seed_catalog(&state).await?;
    let user_id = create_user(&state, "traveller-1", "ana@example.com", ("Ana", "Rojas")).await?;

    let product = product_service::create_product(&state, product_request(&catalog, &user_id, tour(&catalog)))
        .await?
        .data
        .unwrap();
    assert_eq!(product.price, Decimal::new(4500, 2));

    let tour = tour_service::get_tour(&state, &product.id.to_string())
        .await?
        .data
        .unwrap();
    assert_eq!(tour.dates.len(), 1);
    assert_eq!(tour.amenities, vec![catalog.amenity]);

    let booking = booking_service::create_booking(
        &state,
        CreateBookingRequest {
            user_id: Some(user_id.clone()),
            product_id: Some(product.id.to_string()),
            payment_method: Some("card".into()),
            transaction_id: Some("tx-001".into()),
            tour_date_id: Some(tour.dates[0].id),
            tickets: Some(2),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(booking.total, Decimal::new(9000, 2));
    assert_eq!(booking.status, BookingStatus::InProcess);

    let details = booking_service::get_booking(&state, &booking.id.to_string())
        .await?
        .data
        .unwrap();
    assert_eq!(details.booking_id, booking.id);
    assert_eq!(details.name, "Ana Rojas");
    assert_eq!(details.product.as_deref(), Some("Volcano hike"));
    assert_eq!(details.total, booking.total);
    assert_eq!(
        details.selected_date.as_deref(),
        Some("sábado, 7 de noviembre de 2026 05:00")
    );

    let updated = booking_service::update_status_by_transaction(&state, "tx-001", BookingStatus::Completed)
        .await?
        .data
        .unwrap();
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].status, BookingStatus::Completed);

    let replay = booking_service::update_status_by_transaction(&state, "tx-unknown", BookingStatus::Canceled)
        .await?
        .data
        .unwrap();
    assert!(replay.items.is_empty());

    let mine = booking_service::list_bookings_for_user(&state, &user_id).await?.data.unwrap();
    assert_eq!(mine.items.len(), 1);

    let other = create_user(&state, "traveller-2", "luis@example.com", ("Luis", "Mora")).await?;
    let none = booking_service::list_bookings_for_user(&state, &other).await?.data.unwrap();
    assert!(none.items.is_empty());

    let blocked = product_service::delete_product(&state, &product.id.to_string()).await;
    assert!(matches!(blocked, Err(AppError::Validation(_))));

    booking_service::delete_booking(&state, &booking.id.to_string()).await?;
    let gone = booking_service::get_booking(&state, &booking.id.to_string()).await?;
    assert!(gone.data.is_none());

    let again = booking_service::delete_booking(&state, &booking.id.to_string()).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn rejected_tour_leaves_no_rows() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let catalog = seed_catalog(&state).await?;
    let user_id = create_user(&state, "guide-1", "guide@example.com", ("Eva", "Paz")).await?;

    let mut bad_date = tour(&catalog);
    bad_date.available_dates = Some(vec!["2026-11-07T05:00:00Z".into(), "someday".into()]);
    let result = product_service::create_product(&state, product_request(&catalog, &user_id, bad_date)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let mut unknown_amenity = tour(&catalog);
    unknown_amenity.amenities = Some(vec![Uuid::new_v4()]);
    let result =
        product_service::create_product(&state, product_request(&catalog, &user_id, unknown_amenity)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    assert_eq!(Products::find().count(state.db()).await?, 0);
    assert_eq!(Tours::find().count(state.db()).await?, 0);

    Ok(())
}

async fn setup_state() -> anyhow::Result<Option<AppState>> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let orm = create_orm_conn(database_url.parse::<PgConnectOptions>()?, 2).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE ratings, bookings, product_amenities, tour_dates, tours, products, catalog_items, users CASCADE",
    ))
    .await?;

    Ok(Some(AppState::new(orm)))
}

async fn seed_catalog(state: &AppState) -> anyhow::Result<Catalog> {
    Ok(Catalog {
        tour_type: create_item(state, CatalogKind::ProductType, "Tour").await?,
        service: create_item(state, CatalogKind::Service, "Guided visit").await?,
        category: create_item(state, CatalogKind::Category, "Adventure").await?,
        audience: create_item(state, CatalogKind::Audience, "Adults").await?,
        amenity: create_item(state, CatalogKind::Amenity, "Transport").await?,
    })
}

async fn create_item(state: &AppState, kind: CatalogKind, name: &str) -> anyhow::Result<Uuid> {
    let item = catalog_service::create_item(
        state,
        kind,
        CatalogItemRequest {
            name: Some(name.into()),
            description: None,
        },
    )
    .await?;
    Ok(item.data.unwrap().id)
}

async fn create_user(state: &AppState, id: &str, email: &str, name: (&str, &str)) -> anyhow::Result<String> {
    let (first_name, last_name) = name;
    let user = user_service::create_user(
        state,
        CreateUserRequest {
            id: Some(id.into()),
            email: Some(email.into()),
            first_name: first_name.into(),
            last_name: last_name.into(),
        },
    )
    .await?;
    Ok(user.data.unwrap().id)
}

fn tour(catalog: &Catalog) -> TourPayload {
    TourPayload {
        departure_point: Some("Antigua".into()),
        available_dates: Some(vec!["2026-11-07T05:00:00Z".into()]),
        max_people: Some(10),
        itinerary: vec!["Pick-up".into(), "Summit".into()],
        highlight: Some("Lava views".into()),
        included: Some("Transport".into()),
        duration: Some(6),
        amenities: Some(vec![catalog.amenity]),
    }
}

fn product_request(catalog: &Catalog, user_id: &str, tour: TourPayload) -> CreateProductRequest {
    CreateProductRequest {
        name: "Volcano hike".into(),
        description: "Sunrise hike".into(),
        price: Decimal::new(4500, 2),
        country: "Guatemala".into(),
        address: String::new(),
        max_people: 10,
        duration: 6,
        images: Vec::new(),
        videos: Vec::new(),
        files: Vec::new(),
        banner: None,
        product_type_id: catalog.tour_type,
        product_service_id: catalog.service,
        product_category_id: catalog.category,
        target_product_audience_id: catalog.audience,
        user_id: user_id.into(),
        tour: Some(tour),
    }
}
