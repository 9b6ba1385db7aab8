use crate::errors::Result;
use crate::programs::programs_model::{NewProgram, Program, ProgramUpdate};
use async_trait::async_trait;

/// Trait for program repository operations
#[async_trait]
pub trait ProgramRepositoryTrait: Send + Sync {
    fn get_programs(&self) -> Result<Vec<Program>>;
    fn get_program(&self, program_id: &str) -> Result<Program>;
    async fn create_program(&self, new_program: NewProgram) -> Result<Program>;
    async fn update_program(&self, program_update: ProgramUpdate) -> Result<Program>;
    async fn delete_program(&self, program_id: String) -> Result<usize>;
}

/// Trait for program service operations
#[async_trait]
pub trait ProgramServiceTrait: Send + Sync {
    fn get_programs(&self) -> Result<Vec<Program>>;
    fn get_program(&self, program_id: &str) -> Result<Program>;
    async fn create_program(&self, new_program: NewProgram) -> Result<Program>;
    async fn update_program(&self, program_update: ProgramUpdate) -> Result<Program>;
    async fn delete_program(&self, program_id: &str) -> Result<()>;
}
