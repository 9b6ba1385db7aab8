use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::programs_model::{NewProgram, Program, ProgramUpdate};
use super::programs_traits::{ProgramRepositoryTrait, ProgramServiceTrait};
use crate::errors::{Error, Result};
use crate::hotels::HotelRepositoryTrait;
use crate::reservations::ReservationRepositoryTrait;

pub struct ProgramService {
    repository: Arc<dyn ProgramRepositoryTrait>,
    hotel_repository: Arc<dyn HotelRepositoryTrait>,
    reservation_repository: Arc<dyn ReservationRepositoryTrait>,
}

impl ProgramService {
    pub fn new(
        repository: Arc<dyn ProgramRepositoryTrait>,
        hotel_repository: Arc<dyn HotelRepositoryTrait>,
        reservation_repository: Arc<dyn ReservationRepositoryTrait>,
    ) -> Self {
        ProgramService {
            repository,
            hotel_repository,
            reservation_repository,
        }
    }

    fn ensure_hotels_exist(&self, hotel_ids: &[String]) -> Result<()> {
        for hotel_id in hotel_ids {
            match self.hotel_repository.get_hotel(hotel_id) {
                Ok(_) => {}
                Err(e) if e.is_not_found() => {
                    return Err(Error::invalid(format!("Hotel {} does not exist", hotel_id)));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProgramServiceTrait for ProgramService {
    fn get_programs(&self) -> Result<Vec<Program>> {
        self.repository.get_programs()
    }

    fn get_program(&self, program_id: &str) -> Result<Program> {
        self.repository.get_program(program_id)
    }

    async fn create_program(&self, mut new_program: NewProgram) -> Result<Program> {
        new_program.validate()?;
        self.ensure_hotels_exist(&new_program.hotel_ids)?;
        debug!(
            "Creating program {} with {} hotel(s)",
            new_program.name,
            new_program.hotel_ids.len()
        );
        self.repository.create_program(new_program).await
    }

    async fn update_program(&self, mut program_update: ProgramUpdate) -> Result<Program> {
        program_update.validate()?;
        self.ensure_hotels_exist(&program_update.hotel_ids)?;
        self.repository.update_program(program_update).await
    }

    /// Deletes a program that has no reservations. Its expenses are detached.
    async fn delete_program(&self, program_id: &str) -> Result<()> {
        let reservations = self.reservation_repository.count_for_program(program_id)?;
        if reservations > 0 {
            return Err(Error::ConstraintViolation(format!(
                "Program has {} reservation(s) and cannot be deleted",
                reservations
            )));
        }
        let deleted = self.repository.delete_program(program_id.to_string()).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Program {}", program_id)));
        }
        info!("Deleted program {}", program_id);
        Ok(())
    }
}
