use crate::errors::Result;
use crate::payments::payments_model::{NewPayment, Payment, PaymentInput};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for payment repository operations
#[async_trait]
pub trait PaymentRepositoryTrait: Send + Sync {
    fn get_payment(&self, payment_id: &str) -> Result<Payment>;
    fn get_payments_for_reservation(&self, reservation_id: &str) -> Result<Vec<Payment>>;
    fn get_paid_total(&self, reservation_id: &str) -> Result<Decimal>;
    /// Sum of all payments, optionally restricted to one program's reservations.
    fn get_total_payments(&self, program_id: Option<&str>) -> Result<Decimal>;
    async fn create_payment(&self, input: PaymentInput) -> Result<Payment>;
    async fn delete_payment(&self, payment_id: String) -> Result<usize>;
}

/// Trait for payment service operations
#[async_trait]
pub trait PaymentServiceTrait: Send + Sync {
    fn get_payments_for_reservation(&self, reservation_id: &str) -> Result<Vec<Payment>>;
    async fn create_payment(&self, new_payment: NewPayment) -> Result<Payment>;
    async fn delete_payment(&self, payment_id: &str) -> Result<Payment>;
}
