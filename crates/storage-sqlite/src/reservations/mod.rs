//! SQLite storage implementation for reservations.

mod model;
mod repository;

pub use model::ReservationDB;
pub use repository::ReservationRepository;
