//! Payments module - domain models, services, and traits.

mod payments_model;
mod payments_service;
mod payments_traits;

pub use payments_model::{NewPayment, Payment, PaymentInput, PaymentMethod};
pub use payments_service::PaymentService;
pub use payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
