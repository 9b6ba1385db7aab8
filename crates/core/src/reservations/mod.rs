//! Reservations module - domain models, services, and traits.

mod reservations_model;
mod reservations_service;
mod reservations_traits;


pub use reservations_model::{
    NewReservation, Reservation, ReservationDetails, ReservationInput, ReservationUpdate,
};
pub use reservations_service::ReservationService;
pub use reservations_traits::{ReservationRepositoryTrait, ReservationServiceTrait};
