//! Database models for programs.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use tripdesk_core::programs::Program;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::programs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProgramDB {
    pub id: String,
    pub name: String,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub visa_deadline: Option<NaiveDate>,
    pub hotel_deadline: Option<NaiveDate>,
    pub flight_deadline: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row of the program/hotel association table.
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::program_hotels)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProgramHotelDB {
    pub program_id: String,
    pub hotel_id: String,
}

impl ProgramDB {
    pub fn into_domain(self, hotel_ids: Vec<String>) -> Program {
        Program {
            id: self.id,
            name: self.name,
            departure_date: self.departure_date,
            return_date: self.return_date,
            visa_deadline: self.visa_deadline,
            hotel_deadline: self.hotel_deadline,
            flight_deadline: self.flight_deadline,
            hotel_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
