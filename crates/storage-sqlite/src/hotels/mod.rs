//! SQLite storage implementation for hotels.

mod model;
mod repository;

pub use model::HotelDB;
pub use repository::HotelRepository;
