use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use super::reservations_model::{
    NewReservation, Reservation, ReservationDetails, ReservationInput, ReservationUpdate,
};
use super::reservations_traits::{ReservationRepositoryTrait, ReservationServiceTrait};
use crate::errors::{Error, Result};
use crate::payments::PaymentRepositoryTrait;
use crate::programs::ProgramRepositoryTrait;
use crate::utils::AmountInput;

pub struct ReservationService {
    repository: Arc<dyn ReservationRepositoryTrait>,
    program_repository: Arc<dyn ProgramRepositoryTrait>,
    payment_repository: Arc<dyn PaymentRepositoryTrait>,
}

impl ReservationService {
    pub fn new(
        repository: Arc<dyn ReservationRepositoryTrait>,
        program_repository: Arc<dyn ProgramRepositoryTrait>,
        payment_repository: Arc<dyn PaymentRepositoryTrait>,
    ) -> Self {
        ReservationService {
            repository,
            program_repository,
            payment_repository,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn build_input(
        &self,
        program_id: String,
        customer_name: String,
        phone: Option<String>,
        passport_number: Option<String>,
        room_type: Option<String>,
        price: &AmountInput,
        reservation_date: Option<chrono::NaiveDate>,
    ) -> Result<ReservationInput> {
        let customer_name = customer_name.trim().to_string();
        if customer_name.is_empty() {
            return Err(Error::missing("customerName"));
        }
        let program_id = program_id.trim().to_string();
        if program_id.is_empty() {
            return Err(Error::missing("programId"));
        }
        match self.program_repository.get_program(&program_id) {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                return Err(Error::invalid(format!("Program {} does not exist", program_id)));
            }
            Err(e) => return Err(e),
        }
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Ok(ReservationInput {
            program_id,
            customer_name,
            phone: clean(phone),
            passport_number: clean(passport_number),
            room_type: clean(room_type),
            price: price.to_positive_decimal("price")?,
            reservation_date: reservation_date.unwrap_or_else(|| Utc::now().date_naive()),
        })
    }
}

#[async_trait]
impl ReservationServiceTrait for ReservationService {
    fn get_reservations(&self, program_id: Option<&str>) -> Result<Vec<Reservation>> {
        self.repository
            .get_reservations(program_id.map(str::trim).filter(|p| !p.is_empty()))
    }

    fn get_reservation_details(&self, reservation_id: &str) -> Result<ReservationDetails> {
        let reservation = self.repository.get_reservation(reservation_id)?;
        let paid_total = self.payment_repository.get_paid_total(reservation_id)?;
        let remaining = reservation.price - paid_total;
        Ok(ReservationDetails {
            reservation,
            paid_total,
            remaining,
        })
    }

    async fn create_reservation(&self, new_reservation: NewReservation) -> Result<Reservation> {
        let input = self.build_input(
            new_reservation.program_id,
            new_reservation.customer_name,
            new_reservation.phone,
            new_reservation.passport_number,
            new_reservation.room_type,
            &new_reservation.price,
            new_reservation.reservation_date,
        )?;
        debug!(
            "Creating reservation for {} on program {}",
            input.customer_name, input.program_id
        );
        self.repository.create_reservation(input).await
    }

    async fn update_reservation(
        &self,
        reservation_update: ReservationUpdate,
    ) -> Result<Reservation> {
        let reservation_id = reservation_update
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::missing("id"))?;
        let input = self.build_input(
            reservation_update.program_id,
            reservation_update.customer_name,
            reservation_update.phone,
            reservation_update.passport_number,
            reservation_update.room_type,
            &reservation_update.price,
            reservation_update.reservation_date,
        )?;
        self.repository
            .update_reservation(reservation_id, input)
            .await
    }

    async fn delete_reservation(&self, reservation_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_reservation(reservation_id.to_string())
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Reservation {}", reservation_id)));
        }
        Ok(())
    }
}
