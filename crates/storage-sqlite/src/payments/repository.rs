use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use tripdesk_core::errors::{Error, Result};
use tripdesk_core::payments::{Payment, PaymentInput, PaymentRepositoryTrait};
use tripdesk_core::utils::{decimal_from_db, decimal_to_db};

use super::model::PaymentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{payments, reservations};

pub struct PaymentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PaymentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PaymentRepository { pool, writer }
    }
}

#[async_trait]
impl PaymentRepositoryTrait for PaymentRepository {
    fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        let mut conn = get_connection(&self.pool)?;
        payments::table
            .find(payment_id)
            .select(PaymentDB::as_select())
            .first::<PaymentDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Payment::from)
            .ok_or_else(|| Error::NotFound(format!("Payment {}", payment_id)))
    }

    fn get_payments_for_reservation(&self, reservation_id: &str) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = payments::table
            .filter(payments::reservation_id.eq(reservation_id))
            .select(PaymentDB::as_select())
            .order((payments::paid_at.desc(), payments::created_at.desc()))
            .load::<PaymentDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    fn get_paid_total(&self, reservation_id: &str) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let total = payments::table
            .filter(payments::reservation_id.eq(reservation_id))
            .select(sum(payments::amount))
            .first::<Option<f64>>(&mut conn)
            .into_core()?;
        Ok(total.map(decimal_from_db).unwrap_or_default())
    }

    fn get_total_payments(&self, program_id: Option<&str>) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let total = match program_id {
            Some(program_id) => payments::table
                .inner_join(reservations::table)
                .filter(reservations::program_id.eq(program_id))
                .select(sum(payments::amount))
                .first::<Option<f64>>(&mut conn),
            None => payments::table
                .select(sum(payments::amount))
                .first::<Option<f64>>(&mut conn),
        }
        .into_core()?;
        Ok(total.map(decimal_from_db).unwrap_or_default())
    }

    async fn create_payment(&self, input: PaymentInput) -> Result<Payment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Payment> {
                let row = PaymentDB {
                    id: Uuid::new_v4().to_string(),
                    reservation_id: input.reservation_id,
                    amount: decimal_to_db(input.amount),
                    method: input.method.as_str().to_string(),
                    paid_at: input.paid_at,
                    file_path: input.file_path,
                    note: input.note,
                    created_at: Utc::now().naive_utc(),
                };
                diesel::insert_into(payments::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn delete_payment(&self, payment_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(payments::table.find(payment_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
