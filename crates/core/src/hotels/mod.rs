//! Hotels module - domain models, services, and traits.

mod hotels_model;
mod hotels_service;
mod hotels_traits;

pub use hotels_model::{Hotel, HotelUpdate, NewHotel};
pub use hotels_service::HotelService;
pub use hotels_traits::{HotelRepositoryTrait, HotelServiceTrait};
