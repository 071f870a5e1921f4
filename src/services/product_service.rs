use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::products::{ApprovalRequest, CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        bookings::{Column as BookingCol, Entity as Bookings},
        catalog_items::CatalogKind,
        products::{ActiveModel as ProductActive, Column, Entity as Products, Media, Model as ProductModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::Product,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::{
        catalog_service::require_item, non_blank, parse_id, require_text, tour_service, updated_or,
    },
    state::AppState,
};

const TOUR_TYPE_NAME: &str = "tour";

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let mut condition = Condition::all();

    if let Some(user_id) = query.user_id.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::UserId.eq(user_id.clone()));
    }
    if let Some(category_id) = query.product_category_id {
        condition = condition.add(Column::ProductCategoryId.eq(category_id));
    }
    if let Some(type_id) = query.product_type_id {
        condition = condition.add(Column::ProductTypeId.eq(type_id));
    }
    if let Some(is_approved) = query.is_approved {
        condition = condition.add(Column::IsApproved.eq(is_approved));
    }

    let items = Products::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(ApiResponse::success("Products", ProductList { items }))
}

pub async fn get_product(state: &AppState, raw_id: &str) -> AppResult<ApiResponse<Product>> {
    let id = parse_id(raw_id, "product id")?;
    let product = Products::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(ApiResponse::success("Product", product_from_entity(product)))
}

/// Inserts the product and, for Tour products, the tour rows in one transaction.
pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let name = non_blank(Some(payload.name)).ok_or_else(|| AppError::validation("name is required"))?;
    let description = non_blank(Some(payload.description))
        .ok_or_else(|| AppError::validation("description is required"))?;
    let country =
        non_blank(Some(payload.country)).ok_or_else(|| AppError::validation("country is required"))?;
    let user_id = require_text(&payload.user_id, "user_id")?.to_string();
    validate_numbers(Some(payload.price), Some(payload.max_people), Some(payload.duration))?;

    let tour = match payload.tour {
        Some(mut tour) => {
            tour.max_people.get_or_insert(payload.max_people);
            tour.duration.get_or_insert(payload.duration);
            Some(tour_service::validate_tour(tour)?)
        }
        None => None,
    };

    if Users::find_by_id(user_id.clone())
        .one(state.db())
        .await?
        .is_none()
    {
        return Err(AppError::validation(format!("user '{user_id}' does not exist")));
    }
    let product_type = require_item(state.db(), CatalogKind::ProductType, payload.product_type_id).await?;
    require_item(state.db(), CatalogKind::Service, payload.product_service_id).await?;
    require_item(state.db(), CatalogKind::Category, payload.product_category_id).await?;
    require_item(state.db(), CatalogKind::Audience, payload.target_product_audience_id).await?;

    let is_tour = product_type.name.trim().eq_ignore_ascii_case(TOUR_TYPE_NAME);
    if is_tour && tour.is_none() {
        return Err(AppError::validation("tour details are required for Tour products"));
    }
    if !is_tour && tour.is_some() {
        return Err(AppError::validation(format!(
            "tour details are not accepted for '{}' products",
            product_type.name
        )));
    }

    let txn = state.db().begin().await?;

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(description),
        price: Set(payload.price),
        country: Set(country),
        address: Set(payload.address.trim().to_string()),
        max_people: Set(payload.max_people),
        duration: Set(payload.duration),
        media: Set(Media {
            images: payload.images,
            videos: payload.videos,
            files: payload.files,
        }),
        banner: Set(non_blank(payload.banner)),
        is_approved: Set(false),
        product_type_id: Set(payload.product_type_id),
        product_service_id: Set(payload.product_service_id),
        product_category_id: Set(payload.product_category_id),
        target_product_audience_id: Set(payload.target_product_audience_id),
        user_id: Set(user_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    if let Some(tour) = tour {
        tour_service::insert_tour(&txn, product.id, tour).await?;
    }

    txn.commit().await?;

    tracing::info!(product_id = %product.id, is_tour, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
    ))
}

pub async fn update_product(
    state: &AppState,
    raw_id: &str,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let id = parse_id(raw_id, "product id")?;
    validate_numbers(payload.price, payload.max_people, payload.duration)?;

    let existing = Products::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    if let Some(category_id) = payload.product_category_id {
        require_item(state.db(), CatalogKind::Category, category_id).await?;
    }
    if let Some(audience_id) = payload.target_product_audience_id {
        require_item(state.db(), CatalogKind::Audience, audience_id).await?;
    }

    let mut media = existing.media.clone();
    let mut active: ProductActive = existing.into();
    if let Some(name) = non_blank(payload.name) {
        active.name = Set(name);
    }
    if let Some(description) = non_blank(payload.description) {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(country) = non_blank(payload.country) {
        active.country = Set(country);
    }
    if let Some(address) = payload.address {
        active.address = Set(address.trim().to_string());
    }
    if let Some(max_people) = payload.max_people {
        active.max_people = Set(max_people);
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(duration);
    }
    if payload.images.is_some() || payload.videos.is_some() || payload.files.is_some() {
        if let Some(images) = payload.images {
            media.images = images;
        }
        if let Some(videos) = payload.videos {
            media.videos = videos;
        }
        if let Some(files) = payload.files {
            media.files = files;
        }
        active.media = Set(media);
    }
    if payload.banner.is_some() {
        active.banner = Set(non_blank(payload.banner));
    }
    if let Some(category_id) = payload.product_category_id {
        active.product_category_id = Set(category_id);
    }
    if let Some(audience_id) = payload.target_product_audience_id {
        active.target_product_audience_id = Set(audience_id);
    }
    active.updated_at = Set(Utc::now().into());

    let product = updated_or(active.update(state.db()).await, || {
        AppError::not_found("Product not found")
    })?;
    Ok(ApiResponse::success("Updated", product_from_entity(product)))
}

pub async fn set_approval(
    state: &AppState,
    raw_id: &str,
    payload: ApprovalRequest,
) -> AppResult<ApiResponse<Product>> {
    let id = parse_id(raw_id, "product id")?;
    let existing = Products::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let mut active: ProductActive = existing.into();
    active.is_approved = Set(payload.is_approved);
    active.updated_at = Set(Utc::now().into());
    let product = updated_or(active.update(state.db()).await, || {
        AppError::not_found("Product not found")
    })?;

    tracing::info!(product_id = %product.id, is_approved = product.is_approved, "product approval changed");

    Ok(ApiResponse::success("Approval updated", product_from_entity(product)))
}

pub async fn delete_product(state: &AppState, raw_id: &str) -> AppResult<ApiResponse<Product>> {
    let id = parse_id(raw_id, "product id")?;
    let existing = Products::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let bookings = Bookings::find()
        .filter(BookingCol::ProductId.eq(id))
        .count(state.db())
        .await?;
    if bookings > 0 {
        return Err(AppError::validation(format!(
            "product has {bookings} booking(s) and cannot be deleted"
        )));
    }

    let result = Products::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(ApiResponse::success("Deleted", product_from_entity(existing)))
}

fn validate_numbers(
    price: Option<Decimal>,
    max_people: Option<i32>,
    duration: Option<i32>,
) -> AppResult<()> {
    if price.is_some_and(|p| p.is_sign_negative()) {
        return Err(AppError::validation("price must not be negative"));
    }
    if max_people.is_some_and(|n| n < 1) {
        return Err(AppError::validation("max_people must be at least 1"));
    }
    if duration.is_some_and(|n| n < 1) {
        return Err(AppError::validation("duration must be at least 1"));
    }
    Ok(())
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        country: model.country,
        address: model.address,
        max_people: model.max_people,
        duration: model.duration,
        images: model.media.images,
        videos: model.media.videos,
        files: model.media.files,
        banner: model.banner,
        is_approved: model.is_approved,
        product_type_id: model.product_type_id,
        product_service_id: model.product_service_id,
        product_category_id: model.product_category_id,
        target_product_audience_id: model.target_product_audience_id,
        user_id: model.user_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_bounded() {
        assert!(validate_numbers(Some(Decimal::ZERO), Some(1), Some(1)).is_ok());
        assert!(validate_numbers(None, None, None).is_ok());
        assert!(validate_numbers(Some(Decimal::from(-1)), None, None).is_err());
        assert!(validate_numbers(None, Some(0), None).is_err());
        assert!(validate_numbers(None, None, Some(0)).is_err());
    }
}
