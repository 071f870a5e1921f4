pub mod bookings;
pub mod catalog_items;
pub mod product_amenities;
pub mod products;
pub mod ratings;
pub mod tour_dates;
pub mod tours;
pub mod users;

pub use bookings::Entity as Bookings;
pub use catalog_items::Entity as CatalogItems;
pub use product_amenities::Entity as ProductAmenities;
pub use products::Entity as Products;
pub use ratings::Entity as Ratings;
pub use tour_dates::Entity as TourDates;
pub use tours::Entity as Tours;
pub use users::Entity as Users;
