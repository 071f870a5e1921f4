pub mod bookings;
pub mod catalog;
pub mod products;
pub mod ratings;
pub mod tours;
pub mod users;
