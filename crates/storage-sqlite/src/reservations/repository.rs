use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use tripdesk_core::errors::{Error, Result};
use tripdesk_core::reservations::{Reservation, ReservationInput, ReservationRepositoryTrait};
use tripdesk_core::utils::decimal_to_db;

use super::model::ReservationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::reservations;

pub struct ReservationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ReservationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ReservationRepository { pool, writer }
    }
}

fn load_reservation(conn: &mut SqliteConnection, reservation_id: &str) -> Result<Reservation> {
    reservations::table
        .find(reservation_id)
        .select(ReservationDB::as_select())
        .first::<ReservationDB>(conn)
        .optional()
        .into_core()?
        .map(Reservation::from)
        .ok_or_else(|| Error::NotFound(format!("Reservation {}", reservation_id)))
}

#[async_trait]
impl ReservationRepositoryTrait for ReservationRepository {
    fn get_reservations(&self, program_id: Option<&str>) -> Result<Vec<Reservation>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = reservations::table.into_boxed();
        if let Some(program_id) = program_id {
            query = query.filter(reservations::program_id.eq(program_id.to_string()));
        }
        let rows = query
            .select(ReservationDB::as_select())
            .order((
                reservations::reservation_date.desc(),
                reservations::created_at.desc(),
            ))
            .load::<ReservationDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    fn get_reservation(&self, reservation_id: &str) -> Result<Reservation> {
        let mut conn = get_connection(&self.pool)?;
        load_reservation(&mut conn, reservation_id)
    }

    fn count_for_program(&self, program_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        reservations::table
            .filter(reservations::program_id.eq(program_id))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    async fn create_reservation(&self, input: ReservationInput) -> Result<Reservation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reservation> {
                let now = Utc::now().naive_utc();
                let row = ReservationDB {
                    id: Uuid::new_v4().to_string(),
                    program_id: input.program_id,
                    customer_name: input.customer_name,
                    phone: input.phone,
                    passport_number: input.passport_number,
                    room_type: input.room_type,
                    price: decimal_to_db(input.price),
                    reservation_date: input.reservation_date,
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(reservations::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn update_reservation(
        &self,
        reservation_id: String,
        input: ReservationInput,
    ) -> Result<Reservation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reservation> {
                let updated = diesel::update(reservations::table.find(&reservation_id))
                    .set((
                        reservations::program_id.eq(input.program_id),
                        reservations::customer_name.eq(input.customer_name),
                        reservations::phone.eq(input.phone),
                        reservations::passport_number.eq(input.passport_number),
                        reservations::room_type.eq(input.room_type),
                        reservations::price.eq(decimal_to_db(input.price)),
                        reservations::reservation_date.eq(input.reservation_date),
                        reservations::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(Error::NotFound(format!("Reservation {}", reservation_id)));
                }
                load_reservation(conn, &reservation_id)
            })
            .await
    }

    /// Payments cascade and expenses are detached by the schema's foreign keys.
    async fn delete_reservation(&self, reservation_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(reservations::table.find(reservation_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
