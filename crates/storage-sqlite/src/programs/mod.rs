//! SQLite storage implementation for programs and their hotel links.

mod model;
mod repository;

pub use model::{ProgramDB, ProgramHotelDB};
pub use repository::ProgramRepository;
