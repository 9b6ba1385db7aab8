use crate::errors::Result;
use crate::reservations::reservations_model::{
    NewReservation, Reservation, ReservationDetails, ReservationInput, ReservationUpdate,
};
use async_trait::async_trait;

/// Trait for reservation repository operations
#[async_trait]
pub trait ReservationRepositoryTrait: Send + Sync {
    fn get_reservations(&self, program_id: Option<&str>) -> Result<Vec<Reservation>>;
    fn get_reservation(&self, reservation_id: &str) -> Result<Reservation>;
    fn count_for_program(&self, program_id: &str) -> Result<i64>;
    async fn create_reservation(&self, input: ReservationInput) -> Result<Reservation>;
    async fn update_reservation(
        &self,
        reservation_id: String,
        input: ReservationInput,
    ) -> Result<Reservation>;
    /// Deletes the reservation together with its payments.
    async fn delete_reservation(&self, reservation_id: String) -> Result<usize>;
}

/// Trait for reservation service operations
#[async_trait]
pub trait ReservationServiceTrait: Send + Sync {
    fn get_reservations(&self, program_id: Option<&str>) -> Result<Vec<Reservation>>;
    fn get_reservation_details(&self, reservation_id: &str) -> Result<ReservationDetails>;
    async fn create_reservation(&self, new_reservation: NewReservation) -> Result<Reservation>;
    async fn update_reservation(
        &self,
        reservation_update: ReservationUpdate,
    ) -> Result<Reservation>;
    async fn delete_reservation(&self, reservation_id: &str) -> Result<()>;
}
