use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        bookings::{BookingList, CreateBookingRequest, UpdateBookingRequest, UpdateBookingStatusRequest},
        catalog::{CatalogItemRequest, CatalogList},
        products::{ApprovalRequest, CreateProductRequest, ProductList, UpdateProductRequest},
        ratings::{CreateRatingRequest, RatingList, UpdateRatingRequest},
        tours::{TourDetails, TourPayload},
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    entity::{bookings::BookingStatus, catalog_items::CatalogKind},
    models::{Booking, BookingDetails, CatalogItem, Product, Rating, Tour, TourDate, User},
    response::ApiResponse,
    routes::{bookings, health, params, products, ratings, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::set_approval,
        products::delete_product,
        products::get_tour,
        products::create_tour,
        bookings::list_bookings,
        bookings::list_user_bookings,
        bookings::list_product_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking,
        bookings::update_status_by_transaction,
        bookings::delete_booking,
        ratings::list_ratings,
        ratings::list_product_ratings,
        ratings::get_rating,
        ratings::create_rating,
        ratings::update_rating,
        ratings::delete_rating
    ),
    components(
        schemas(
            User,
            CatalogItem,
            CatalogKind,
            Product,
            Tour,
            TourDate,
            Booking,
            BookingDetails,
            BookingStatus,
            Rating,
            CreateUserRequest,
            UpdateUserRequest,
            UserList,
            CatalogItemRequest,
            CatalogList,
            CreateProductRequest,
            UpdateProductRequest,
            ApprovalRequest,
            ProductList,
            TourPayload,
            TourDetails,
            CreateBookingRequest,
            UpdateBookingRequest,
            UpdateBookingStatusRequest,
            BookingList,
            CreateRatingRequest,
            UpdateRatingRequest,
            RatingList,
            params::ProductQuery,
            ApiResponse<Product>,
            ApiResponse<Booking>,
            ApiResponse<BookingDetails>,
            ApiResponse<BookingList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "User endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Tours", description = "Tour details of Tour products"),
        (name = "Bookings", description = "Booking endpoints"),
        (name = "Ratings", description = "Rating endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
