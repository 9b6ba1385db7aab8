//! Database model for hotels.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use tripdesk_core::hotels::Hotel;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::hotels)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HotelDB {
    pub id: String,
    pub name: String,
    pub city: String,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<HotelDB> for Hotel {
    fn from(db: HotelDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            city: db.city,
            location: db.location,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
