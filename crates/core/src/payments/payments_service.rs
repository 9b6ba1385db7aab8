use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};

use super::payments_model::{NewPayment, Payment, PaymentInput};
use super::payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
use crate::errors::{Error, Result};
use crate::reservations::ReservationRepositoryTrait;

pub struct PaymentService {
    repository: Arc<dyn PaymentRepositoryTrait>,
    reservation_repository: Arc<dyn ReservationRepositoryTrait>,
}

impl PaymentService {
    pub fn new(
        repository: Arc<dyn PaymentRepositoryTrait>,
        reservation_repository: Arc<dyn ReservationRepositoryTrait>,
    ) -> Self {
        PaymentService {
            repository,
            reservation_repository,
        }
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    fn get_payments_for_reservation(&self, reservation_id: &str) -> Result<Vec<Payment>> {
        // Surface a 404 for unknown reservations rather than an empty list.
        self.reservation_repository.get_reservation(reservation_id)?;
        self.repository.get_payments_for_reservation(reservation_id)
    }

    async fn create_payment(&self, new_payment: NewPayment) -> Result<Payment> {
        let reservation_id = new_payment.reservation_id.trim().to_string();
        if reservation_id.is_empty() {
            return Err(Error::missing("reservationId"));
        }
        let reservation = match self.reservation_repository.get_reservation(&reservation_id) {
            Ok(r) => r,
            Err(e) if e.is_not_found() => {
                return Err(Error::invalid(format!(
                    "Reservation {} does not exist",
                    reservation_id
                )));
            }
            Err(e) => return Err(e),
        };
        let amount = new_payment.amount.to_positive_decimal("amount")?;

        let paid = self.repository.get_paid_total(&reservation_id)?;
        if paid + amount > reservation.price {
            warn!(
                "Payment on reservation {} exceeds its price ({} + {} > {})",
                reservation_id, paid, amount, reservation.price
            );
        }

        let input = PaymentInput {
            reservation_id,
            amount,
            method: new_payment.method,
            paid_at: new_payment
                .paid_at
                .unwrap_or_else(|| Utc::now().date_naive()),
            file_path: new_payment.file_path.filter(|p| !p.trim().is_empty()),
            note: new_payment
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };
        debug!(
            "Recording {} payment of {} on reservation {}",
            input.method, input.amount, input.reservation_id
        );
        self.repository.create_payment(input).await
    }

    /// Deletes a payment and returns it so callers can clean up its attachment.
    async fn delete_payment(&self, payment_id: &str) -> Result<Payment> {
        let payment = self.repository.get_payment(payment_id)?;
        self.repository.delete_payment(payment_id.to_string()).await?;
        Ok(payment)
    }
}
