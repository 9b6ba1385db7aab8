//! SQLite storage implementation for expenses and the reporting queries.

mod model;
mod repository;

pub use model::ExpenseDB;
pub use repository::ExpenseRepository;
