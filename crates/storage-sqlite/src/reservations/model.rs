//! Database model for reservations.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use tripdesk_core::reservations::Reservation;
use tripdesk_core::utils::decimal_from_db;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reservations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReservationDB {
    pub id: String,
    pub program_id: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub passport_number: Option<String>,
    pub room_type: Option<String>,
    pub price: f64,
    pub reservation_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ReservationDB> for Reservation {
    fn from(db: ReservationDB) -> Self {
        Self {
            id: db.id,
            program_id: db.program_id,
            customer_name: db.customer_name,
            phone: db.phone,
            passport_number: db.passport_number,
            room_type: db.room_type,
            price: decimal_from_db(db.price),
            reservation_date: db.reservation_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
