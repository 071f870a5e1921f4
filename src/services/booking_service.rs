use chrono::{DateTime, FixedOffset, Locale, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::bookings::{BookingList, CreateBookingRequest, UpdateBookingRequest},
    entity::{
        bookings::{
            self, ActiveModel as BookingActive, BookingStatus, Column as BookingCol,
            Entity as Bookings, Model as BookingModel,
        },
        products::{Column as ProdCol, Entity as Products},
        tour_dates::{Column as TourDateCol, Entity as TourDates},
        tours::Entity as Tours,
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    models::{Booking, BookingDetails},
    response::ApiResponse,
    services::{non_blank, parse_id, require_text, updated_or},
    state::AppState,
};

const SELECTED_DATE_FORMAT: &str = "%A, %-d de %B de %Y %H:%M";

pub async fn list_bookings(state: &AppState) -> AppResult<ApiResponse<BookingList>> {
    let items = Bookings::find()
        .order_by_asc(BookingCol::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect();

    Ok(ApiResponse::success("Bookings", BookingList { items }))
}

#[derive(Debug, FromQueryResult)]
struct BookingDetailRow {
    booking_id: Uuid,
    product_id: Uuid,
    tickets: i32,
    total: Decimal,
    first_name: Option<String>,
    last_name: Option<String>,
    product_name: Option<String>,
    tour_date: Option<DateTime<FixedOffset>>,
}

/// Returns `data: null` rather than an error when the booking does not exist.
pub async fn get_booking(
    state: &AppState,
    raw_id: &str,
) -> AppResult<ApiResponse<BookingDetails>> {
    let id = parse_id(raw_id, "booking id")?;

    let row = Bookings::find()
        .select_only()
        .column_as(BookingCol::Id, "booking_id")
        .column(BookingCol::ProductId)
        .column(BookingCol::Tickets)
        .column(BookingCol::Total)
        .join(JoinType::LeftJoin, bookings::Relation::Users.def())
        .join(JoinType::LeftJoin, bookings::Relation::Products.def())
        .join(JoinType::LeftJoin, bookings::Relation::TourDates.def())
        .column_as(UserCol::FirstName, "first_name")
        .column_as(UserCol::LastName, "last_name")
        .column_as(ProdCol::Name, "product_name")
        .column_as(TourDateCol::Date, "tour_date")
        .filter(BookingCol::Id.eq(id))
        .into_model::<BookingDetailRow>()
        .one(state.db())
        .await?;

    if row.is_none() {
        tracing::debug!(booking_id = %id, "booking not found");
    }

    Ok(ApiResponse::optional("Booking", row.map(details_from_row)))
}

pub async fn list_bookings_for_user(
    state: &AppState,
    user_id: &str,
) -> AppResult<ApiResponse<BookingList>> {
    let user_id = require_text(user_id, "user id")?;

    let items: Vec<Booking> = Bookings::find()
        .filter(BookingCol::UserId.eq(user_id))
        .order_by_asc(BookingCol::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect();

    if items.is_empty() {
        tracing::info!(user_id = %user_id, "user has no bookings");
    }

    Ok(ApiResponse::success("Bookings", BookingList { items }))
}

pub async fn list_bookings_for_product(
    state: &AppState,
    raw_product_id: &str,
) -> AppResult<ApiResponse<BookingList>> {
    let product_id = parse_id(raw_product_id, "product id")?;

    let items: Vec<Booking> = Bookings::find()
        .filter(BookingCol::ProductId.eq(product_id))
        .order_by_asc(BookingCol::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect();

    if items.is_empty() {
        tracing::info!(product_id = %product_id, "product has no bookings");
    }

    Ok(ApiResponse::success("Bookings", BookingList { items }))
}

pub async fn create_booking(
    state: &AppState,
    payload: CreateBookingRequest,
) -> AppResult<ApiResponse<Booking>> {
    let input = validate_new_booking(payload)?;

    if Users::find_by_id(input.user_id.clone())
        .one(state.db())
        .await?
        .is_none()
    {
        return Err(AppError::validation(format!(
            "user '{}' does not exist",
            input.user_id
        )));
    }

    let product = Products::find_by_id(input.product_id)
        .one(state.db())
        .await?
        .ok_or_else(|| {
            AppError::validation(format!("product '{}' does not exist", input.product_id))
        })?;

    check_capacity(input.tickets, product.max_people)?;
    let total = reconcile_total(product.price, input.tickets, input.total)?;

    if let Some(tour_date_id) = input.tour_date_id {
        ensure_tour_date_of_product(state.db(), tour_date_id, product.id).await?;
    }

    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        product_id: Set(input.product_id),
        tour_date_id: Set(input.tour_date_id),
        tickets: Set(input.tickets),
        total: Set(total),
        payment_method: Set(input.payment_method),
        transaction_id: Set(input.transaction_id),
        status: Set(input.status),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(state.db())
    .await?;

    tracing::info!(
        booking_id = %booking.id,
        transaction_id = %booking.transaction_id,
        "booking created"
    );

    Ok(ApiResponse::success(
        "Booking created",
        booking_from_entity(booking),
    ))
}

pub async fn update_booking(
    state: &AppState,
    raw_id: &str,
    payload: UpdateBookingRequest,
) -> AppResult<ApiResponse<Booking>> {
    let id = parse_id(raw_id, "booking id")?;

    let existing = Bookings::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))?;

    let product_id = existing.product_id;
    let current_tickets = existing.tickets;
    let mut active: BookingActive = existing.into();

    if payload.tickets.is_some() || payload.total.is_some() {
        let tickets = payload.tickets.unwrap_or(current_tickets);
        let product = Products::find_by_id(product_id)
            .one(state.db())
            .await?
            .ok_or_else(|| AppError::not_found("Booked product not found"))?;
        check_capacity(tickets, product.max_people)?;
        active.tickets = Set(tickets);
        active.total = Set(reconcile_total(product.price, tickets, payload.total)?);
    }
    if let Some(tour_date_id) = payload.tour_date_id {
        ensure_tour_date_of_product(state.db(), tour_date_id, product_id).await?;
        active.tour_date_id = Set(Some(tour_date_id));
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(payment_method) = non_blank(payload.payment_method) {
        active.payment_method = Set(payment_method);
    }
    active.updated_at = Set(Utc::now().into());

    let booking = updated_or(active.update(state.db()).await, || {
        AppError::not_found("Booking not found")
    })?;

    Ok(ApiResponse::success(
        "Booking updated",
        booking_from_entity(booking),
    ))
}

/// Payment webhook entry point. A transaction without bookings is logged and
/// answered with an empty list so that provider retries stay harmless.
pub async fn update_status_by_transaction(
    state: &AppState,
    transaction_id: &str,
    status: BookingStatus,
) -> AppResult<ApiResponse<BookingList>> {
    let transaction_id = require_text(transaction_id, "transaction id")?;

    let txn = state.db().begin().await?;

    let result = Bookings::update_many()
        .col_expr(BookingCol::Status, Expr::value(status.to_value()))
        .col_expr(BookingCol::UpdatedAt, Expr::current_timestamp().into())
        .filter(BookingCol::TransactionId.eq(transaction_id))
        .exec(&txn)
        .await?;

    if result.rows_affected == 0 {
        txn.commit().await?;
        tracing::warn!(
            transaction_id = %transaction_id,
            "transaction received without an associated booking"
        );
        return Ok(ApiResponse::success(
            "No booking for transaction",
            BookingList { items: Vec::new() },
        ));
    }

    let items = Bookings::find()
        .filter(BookingCol::TransactionId.eq(transaction_id))
        .order_by_asc(BookingCol::CreatedAt)
        .all(&txn)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect();

    txn.commit().await?;

    tracing::info!(
        transaction_id = %transaction_id,
        status = %status.to_value(),
        updated = result.rows_affected,
        "booking status updated"
    );

    Ok(ApiResponse::success("Booking status updated", BookingList { items }))
}

pub async fn delete_booking(state: &AppState, raw_id: &str) -> AppResult<ApiResponse<Booking>> {
    let id = parse_id(raw_id, "booking id")?;

    let existing = Bookings::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))?;

    let result = Bookings::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Booking not found"));
    }

    Ok(ApiResponse::success(
        "Booking deleted",
        booking_from_entity(existing),
    ))
}

#[derive(Debug)]
struct NewBooking {
    user_id: String,
    product_id: Uuid,
    payment_method: String,
    transaction_id: String,
    tour_date_id: Option<Uuid>,
    tickets: i32,
    total: Option<Decimal>,
    status: BookingStatus,
}

fn validate_new_booking(payload: CreateBookingRequest) -> AppResult<NewBooking> {
    let user_id = non_blank(payload.user_id);
    let product_id = non_blank(payload.product_id);
    let payment_method = non_blank(payload.payment_method);
    let transaction_id = non_blank(payload.transaction_id);

    let mut missing = Vec::new();
    if user_id.is_none() {
        missing.push("user_id");
    }
    if product_id.is_none() {
        missing.push("product_id");
    }
    if payment_method.is_none() {
        missing.push("paymentMethod");
    }
    if transaction_id.is_none() {
        missing.push("idTransaccion");
    }

    let (Some(user_id), Some(product_id), Some(payment_method), Some(transaction_id)) =
        (user_id, product_id, payment_method, transaction_id)
    else {
        return Err(AppError::validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    };

    let product_id = parse_id(&product_id, "product_id")?;

    let tickets = payload.tickets.unwrap_or(1);
    if tickets < 1 {
        return Err(AppError::validation("tickets must be at least 1"));
    }

    Ok(NewBooking {
        user_id,
        product_id,
        payment_method,
        transaction_id,
        tour_date_id: payload.tour_date_id,
        tickets,
        total: payload.total,
        status: payload.status.unwrap_or(BookingStatus::InProcess),
    })
}

fn check_capacity(tickets: i32, max_people: i32) -> AppResult<()> {
    if tickets < 1 {
        return Err(AppError::validation("tickets must be at least 1"));
    }
    if tickets > max_people {
        return Err(AppError::validation(format!(
            "tickets ({tickets}) exceed the product capacity ({max_people})"
        )));
    }
    Ok(())
}

/// Computes `price * tickets`; a caller-supplied total must match it.
fn reconcile_total(price: Decimal, tickets: i32, supplied: Option<Decimal>) -> AppResult<Decimal> {
    let expected = price * Decimal::from(tickets);
    match supplied {
        Some(total) if total != expected => Err(AppError::validation(format!(
            "total {total} does not match price * tickets ({expected})"
        ))),
        _ => Ok(expected),
    }
}

async fn ensure_tour_date_of_product<C: ConnectionTrait>(
    conn: &C,
    tour_date_id: Uuid,
    product_id: Uuid,
) -> AppResult<()> {
    let date = TourDates::find_by_id(tour_date_id)
        .find_also_related(Tours)
        .one(conn)
        .await?;

    match date {
        Some((_, Some(tour))) if tour.product_id == product_id => Ok(()),
        Some(_) => Err(AppError::validation(format!(
            "tour date '{tour_date_id}' does not belong to product '{product_id}'"
        ))),
        None => Err(AppError::validation(format!(
            "tour date '{tour_date_id}' does not exist"
        ))),
    }
}

/// Long Spanish rendering of a tour date, e.g. `sábado, 17 de octubre de 2026 14:30`.
pub fn format_selected_date(date: DateTime<FixedOffset>) -> String {
    date.with_timezone(&Utc)
        .format_localized(SELECTED_DATE_FORMAT, Locale::es_ES)
        .to_string()
}

fn details_from_row(row: BookingDetailRow) -> BookingDetails {
    let name = [row.first_name, row.last_name]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    BookingDetails {
        booking_id: row.booking_id,
        product_id: row.product_id,
        name,
        product: row.product_name,
        tickets: row.tickets,
        total: row.total,
        selected_date: row.tour_date.map(format_selected_date),
    }
}

pub(crate) fn booking_from_entity(model: BookingModel) -> Booking {
    Booking {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        tour_date_id: model.tour_date_id,
        tickets: model.tickets,
        total: model.total,
        payment_method: model.payment_method,
        transaction_id: model.transaction_id,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
