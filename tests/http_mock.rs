use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Transaction};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use tour_booking_api::{
    entity::{bookings, bookings::BookingStatus, catalog_items, products, tours},
    routes::create_app,
    state::AppState,
};

// ── Helpers ──

fn connect(db: MockDatabase) -> Arc<DatabaseConnection> {
    Arc::new(db.into_connection())
}

fn app(orm: &Arc<DatabaseConnection>) -> Router {
    create_app(AppState {
        orm: Arc::clone(orm),
    })
}

/// Statements seen by the mock; the router must already be dropped.
fn transaction_log(orm: Arc<DatabaseConnection>) -> Vec<Transaction> {
    match Arc::try_unwrap(orm) {
        Ok(conn) => conn.into_transaction_log(),
        Err(_) => panic!("connection still shared with a router"),
    }
}

fn assert_no_insert(orm: Arc<DatabaseConnection>) {
    let log = format!("{:?}", transaction_log(orm));
    assert!(!log.contains("INSERT"), "unexpected write: {log}");
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn product_row(id: Uuid) -> products::Model {
    let now = Utc::now().fixed_offset();
    products::Model {
        id,
        name: "Volcano hike".to_string(),
        description: "Sunrise hike".to_string(),
        price: Decimal::new(4500, 2),
        country: "Guatemala".to_string(),
        address: String::new(),
        max_people: 10,
        duration: 6,
        media: products::Media::default(),
        banner: None,
        is_approved: true,
        product_type_id: Uuid::new_v4(),
        product_service_id: Uuid::new_v4(),
        product_category_id: Uuid::new_v4(),
        target_product_audience_id: Uuid::new_v4(),
        user_id: "guide-1".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn booking_row(id: Uuid) -> bookings::Model {
    let now = Utc::now().fixed_offset();
    bookings::Model {
        id,
        user_id: "traveller-1".to_string(),
        product_id: Uuid::new_v4(),
        tour_date_id: None,
        tickets: 2,
        total: Decimal::new(9000, 2),
        payment_method: "card".to_string(),
        transaction_id: "tx-001".to_string(),
        status: BookingStatus::InProcess,
        created_at: now,
        updated_at: now,
    }
}

fn tour_body() -> Value {
    json!({
        "departure_point": "Antigua",
        "available_dates": ["2026-11-07T05:00:00Z"],
        "max_people": 10,
        "itinerary": ["Pick-up", "Summit"],
        "highlight": "Lava views",
        "included": "Transport",
        "duration": 6,
        "amenities": [Uuid::new_v4()]
    })
}

// ── Tests ──

#[tokio::test]
async fn unknown_booking_reads_as_null() {
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<bookings::Model>::new()]),
    );

    let uri = format!("/api/v1/bookings/{}", Uuid::new_v4());
    let (status, body) = send(app(&orm), "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn deleting_unknown_booking_is_not_found() {
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<bookings::Model>::new()]),
    );

    let uri = format!("/api/v1/bookings/{}", Uuid::new_v4());
    let (status, body) = send(app(&orm), "DELETE", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["error"], "not_found");
}

#[tokio::test]
async fn updating_unknown_booking_is_not_found() {
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<bookings::Model>::new()]),
    );

    let uri = format!("/api/v1/bookings/{}", Uuid::new_v4());
    let (status, body) = send(app(&orm), "PUT", &uri, Some(json!({ "tickets": 3 }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found");
}

#[tokio::test]
async fn booking_deleted_between_read_and_update_is_not_found() {
    let id = Uuid::new_v4();
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking_row(id)]])
            .append_query_results([Vec::<bookings::Model>::new()]),
    );

    let uri = format!("/api/v1/bookings/{id}");
    let (status, body) = send(app(&orm), "PUT", &uri, Some(json!({ "status": "completed" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found");
    assert_eq!(body["data"]["error"], "not_found");
}

#[tokio::test]
async fn booking_without_fields_lists_what_is_missing() {
    let orm = connect(MockDatabase::new(DatabaseBackend::Postgres));

    let (status, body) = send(app(&orm), "POST", "/api/v1/bookings", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "missing required fields: user_id, product_id, paymentMethod, idTransaccion"
    );
    assert!(transaction_log(orm).is_empty());
}

#[tokio::test]
async fn blank_product_id_is_reported_as_missing() {
    let orm = connect(MockDatabase::new(DatabaseBackend::Postgres));

    let body = json!({
        "user_id": "traveller-1",
        "product_id": "",
        "paymentMethod": "card",
        "idTransaccion": "tx-001"
    });
    let (status, response) = send(app(&orm), "POST", "/api/v1/bookings", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "missing required fields: product_id");
    assert_eq!(response["data"]["error"], "validation_error");
}

#[tokio::test]
async fn wrong_shape_body_is_a_validation_error() {
    let orm = connect(MockDatabase::new(DatabaseBackend::Postgres));

    let body = json!({ "user_id": "traveller-1", "tickets": "two" });
    let (status, response) = send(app(&orm), "POST", "/api/v1/bookings", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["data"]["error"], "validation_error");
    assert!(response["message"].as_str().unwrap().contains("tickets"));
}

#[tokio::test]
async fn non_json_body_is_a_validation_error() {
    let orm = connect(MockDatabase::new(DatabaseBackend::Postgres));

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/bookings")
        .body(Body::from("user_id=traveller-1"))
        .unwrap();
    let response = app(&orm).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_id_is_a_validation_error() {
    let orm = connect(MockDatabase::new(DatabaseBackend::Postgres));

    let (status, body) = send(app(&orm), "GET", "/api/v1/bookings/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["error"], "validation_error");
}

#[tokio::test]
async fn status_for_unknown_transaction_is_an_empty_list() {
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }]),
    );

    let (status, body) = send(
        app(&orm),
        "PATCH",
        "/api/v1/bookings/transaction/tx-unknown/status",
        Some(json!({ "status": "completed" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn user_without_bookings_gets_an_empty_list() {
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<bookings::Model>::new()]),
    );

    let (status, body) = send(app(&orm), "GET", "/api/v1/bookings/user/traveller-9", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn product_without_bookings_gets_an_empty_list() {
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<bookings::Model>::new()]),
    );

    let uri = format!("/api/v1/bookings/product/{}", Uuid::new_v4());
    let (status, body) = send(app(&orm), "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn invalid_tour_date_writes_nothing() {
    let product_id = Uuid::new_v4();
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product_row(product_id)]]),
    );

    let mut body = tour_body();
    body["available_dates"] = json!(["2026-11-07T05:00:00Z", "not-a-date"]);
    let uri = format!("/api/v1/products/{product_id}/tour");
    let (status, response) = send(app(&orm), "POST", &uri, Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["message"].as_str().unwrap().contains("not-a-date"));
    assert_no_insert(orm);
}

#[tokio::test]
async fn tour_dates_as_a_string_are_a_validation_error() {
    let orm = connect(MockDatabase::new(DatabaseBackend::Postgres));

    let mut body = tour_body();
    body["available_dates"] = json!("2026-11-07");
    let uri = format!("/api/v1/products/{}/tour", Uuid::new_v4());
    let (status, response) = send(app(&orm), "POST", &uri, Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["data"]["error"], "validation_error");
    assert!(transaction_log(orm).is_empty());
}

#[tokio::test]
async fn empty_amenities_write_nothing() {
    let product_id = Uuid::new_v4();
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product_row(product_id)]]),
    );

    let mut body = tour_body();
    body["amenities"] = json!([]);
    let uri = format!("/api/v1/products/{product_id}/tour");
    let (status, response) = send(app(&orm), "POST", &uri, Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "amenities must be a non-empty list");
    assert_no_insert(orm);
}

#[tokio::test]
async fn unknown_amenity_rolls_back_the_tour() {
    let product_id = Uuid::new_v4();
    let orm = connect(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product_row(product_id)]])
            .append_query_results([Vec::<tours::Model>::new()])
            .append_query_results([Vec::<catalog_items::Model>::new()]),
    );

    let uri = format!("/api/v1/products/{product_id}/tour");
    let (status, response) = send(app(&orm), "POST", &uri, Some(tour_body())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        response["message"]
            .as_str()
            .unwrap()
            .starts_with("unknown amenities: ")
    );
    assert_no_insert(orm);
}

#[tokio::test]
async fn bad_product_filter_is_a_validation_error() {
    let orm = connect(MockDatabase::new(DatabaseBackend::Postgres));

    let (status, body) = send(app(&orm), "GET", "/api/v1/products?is_approved=maybe", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["error"], "validation_error");
}

#[tokio::test]
async fn unknown_route_falls_back_to_json_404() {
    let orm = connect(MockDatabase::new(DatabaseBackend::Postgres));

    let (status, body) = send(app(&orm), "GET", "/api/v1/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/api/v1/nowhere");
}
