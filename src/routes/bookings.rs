use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::bookings::{BookingList, CreateBookingRequest, UpdateBookingRequest, UpdateBookingStatusRequest},
    error::AppResult,
    extract::AppJson,
    models::{Booking, BookingDetails},
    response::ApiResponse,
    services::booking_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/user/{user_id}", get(list_user_bookings))
        .route("/product/{product_id}", get(list_product_bookings))
        .route(
            "/transaction/{transaction_id}/status",
            patch(update_status_by_transaction),
        )
        .route(
            "/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<BookingList>),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp = booking_service::list_bookings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/user/{user_id}",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Bookings of a user, possibly empty", body = ApiResponse<BookingList>),
        (status = 400, description = "Missing user id"),
    ),
    tag = "Bookings"
)]
pub async fn list_user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp = booking_service::list_bookings_for_user(&state, &user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/product/{product_id}",
    params(("product_id" = uuid::Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Bookings of a product, possibly empty", body = ApiResponse<BookingList>),
        (status = 400, description = "Invalid product id"),
    ),
    tag = "Bookings"
)]
pub async fn list_product_bookings(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp = booking_service::list_bookings_for_product(&state, &product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    params(("id" = uuid::Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details, `data` is null when absent", body = ApiResponse<BookingDetails>),
        (status = 400, description = "Invalid booking id"),
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BookingDetails>>> {
    let resp = booking_service::get_booking(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<Booking>),
        (status = 400, description = "Missing or inconsistent fields"),
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let resp = booking_service::create_booking(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    params(("id" = uuid::Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<Booking>),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Booking not found"),
    ),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateBookingRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = booking_service::update_booking(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/v1/bookings/transaction/{transaction_id}/status",
    params(("transaction_id" = String, Path, description = "Payment transaction ID")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Updated bookings, empty when the transaction is unknown", body = ApiResponse<BookingList>),
        (status = 400, description = "Missing transaction id or invalid status"),
    ),
    tag = "Bookings"
)]
pub async fn update_status_by_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    AppJson(payload): AppJson<UpdateBookingStatusRequest>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp =
        booking_service::update_status_by_transaction(&state, &transaction_id, payload.status)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    params(("id" = uuid::Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Deleted booking", body = ApiResponse<Booking>),
        (status = 404, description = "Booking not found"),
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = booking_service::delete_booking(&state, &id).await?;
    Ok(Json(resp))
}
