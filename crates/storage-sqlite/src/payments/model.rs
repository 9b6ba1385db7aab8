//! Database model for payments.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use log::warn;

use tripdesk_core::payments::{Payment, PaymentMethod};
use tripdesk_core::utils::decimal_from_db;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentDB {
    pub id: String,
    pub reservation_id: String,
    pub amount: f64,
    pub method: String,
    pub paid_at: NaiveDate,
    pub file_path: Option<String>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<PaymentDB> for Payment {
    fn from(db: PaymentDB) -> Self {
        let method = db.method.parse::<PaymentMethod>().unwrap_or_else(|_| {
            warn!("Payment {} has unknown method '{}'", db.id, db.method);
            PaymentMethod::default()
        });
        Self {
            id: db.id,
            reservation_id: db.reservation_id,
            amount: decimal_from_db(db.amount),
            method,
            paid_at: db.paid_at,
            file_path: db.file_path,
            note: db.note,
            created_at: db.created_at,
        }
    }
}
