//! Programs module - domain models, services, and traits.

mod programs_model;
mod programs_service;
mod programs_traits;


pub use programs_model::{NewProgram, Program, ProgramUpdate};
pub use programs_service::ProgramService;
pub use programs_traits::{ProgramRepositoryTrait, ProgramServiceTrait};
