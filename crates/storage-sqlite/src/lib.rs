//! SQLite storage implementation for the TripDesk back office.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `tripdesk-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod expenses;
pub mod hotels;
pub mod payments;
pub mod programs;
pub mod reservations;

#[cfg(test)]
mod test_utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use expenses::ExpenseRepository;
pub use hotels::HotelRepository;
pub use payments::PaymentRepository;
pub use programs::ProgramRepository;
pub use reservations::ReservationRepository;

// Re-export from tripdesk-core for convenience
pub use tripdesk_core::errors::{DatabaseError, Error, Result};
