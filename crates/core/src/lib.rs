//! TripDesk Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules of the agency back office
//! (programs, hotels, reservations, payments, expenses and reporting).
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod balance;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod hotels;
pub mod payments;
pub mod programs;
pub mod reservations;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

#[cfg(test)]
mod testing;
