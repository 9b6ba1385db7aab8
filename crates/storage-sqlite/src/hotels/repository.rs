use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use tripdesk_core::errors::{Error, Result};
use tripdesk_core::hotels::{Hotel, HotelRepositoryTrait, HotelUpdate, NewHotel};

use super::model::HotelDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{hotels, program_hotels};

pub struct HotelRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HotelRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        HotelRepository { pool, writer }
    }
}

#[async_trait]
impl HotelRepositoryTrait for HotelRepository {
    fn get_hotels(&self, city: Option<&str>) -> Result<Vec<Hotel>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = hotels::table.into_boxed();
        if let Some(city) = city {
            // LIKE without wildcards: case-insensitive equality for ASCII
            query = query.filter(hotels::city.like(city.to_string()));
        }
        let rows = query
            .select(HotelDB::as_select())
            .order((hotels::city.asc(), hotels::name.asc()))
            .load::<HotelDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    fn get_hotel(&self, hotel_id: &str) -> Result<Hotel> {
        let mut conn = get_connection(&self.pool)?;
        hotels::table
            .find(hotel_id)
            .select(HotelDB::as_select())
            .first::<HotelDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Hotel::from)
            .ok_or_else(|| Error::NotFound(format!("Hotel {}", hotel_id)))
    }

    fn count_program_references(&self, hotel_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        program_hotels::table
            .filter(program_hotels::hotel_id.eq(hotel_id))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    async fn create_hotel(&self, new_hotel: NewHotel) -> Result<Hotel> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Hotel> {
                let now = Utc::now().naive_utc();
                let row = HotelDB {
                    id: Uuid::new_v4().to_string(),
                    name: new_hotel.name,
                    city: new_hotel.city,
                    location: new_hotel.location,
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(hotels::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn update_hotel(&self, hotel_update: HotelUpdate) -> Result<Hotel> {
        let hotel_id = hotel_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Hotel> {
                let updated = diesel::update(hotels::table.find(&hotel_id))
                    .set((
                        hotels::name.eq(hotel_update.name),
                        hotels::city.eq(hotel_update.city),
                        hotels::location.eq(hotel_update.location),
                        hotels::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(Error::NotFound(format!("Hotel {}", hotel_id)));
                }
                let row = hotels::table
                    .find(&hotel_id)
                    .select(HotelDB::as_select())
                    .first::<HotelDB>(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn delete_hotel(&self, hotel_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(hotels::table.find(hotel_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup;
    use tripdesk_core::errors::DatabaseError;
    use tripdesk_core::programs::ProgramRepositoryTrait;

    #[tokio::test]
    async fn lists_hotels_filtered_by_city() {
        let db = setup();
        db.hotel("Swissotel", "Makkah").await;
        db.hotel("Pullman Zamzam", "Madina").await;
        db.hotel("Hilton Suites", "Makkah").await;

        let all = db.hotels.get_hotels(None).unwrap();
        assert_eq!(all.len(), 3);

        let makkah = db.hotels.get_hotels(Some("makkah")).unwrap();
        let names: Vec<_> = makkah.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Hilton Suites", "Swissotel"]);
    }

    #[tokio::test]
    async fn update_and_missing_hotel() {
        let db = setup();
        let id = db.hotel("Swissotel", "Makkah").await;

        let updated = db
            .hotels
            .update_hotel(HotelUpdate {
                id: Some(id.clone()),
                name: "Swissotel Al Maqam".to_string(),
                city: "Makkah".to_string(),
                location: Some("Abraj Al Bait".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Swissotel Al Maqam");
        assert_eq!(updated.location.as_deref(), Some("Abraj Al Bait"));

        let missing = db
            .hotels
            .update_hotel(HotelUpdate {
                id: Some("missing".to_string()),
                name: "x".to_string(),
                city: "y".to_string(),
                location: None,
            })
            .await
            .unwrap_err();
        assert!(missing.is_not_found());
        assert!(db.hotels.get_hotel("missing").unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn referenced_hotel_is_protected_by_foreign_key() {
        let db = setup();
        let used = db.hotel("Swissotel", "Makkah").await;
        let free = db.hotel("Pullman Zamzam", "Madina").await;
        db.program("Omra Ramadan", vec![used.clone()]).await;

        assert_eq!(db.hotels.count_program_references(&used).unwrap(), 1);
        assert_eq!(db.hotels.count_program_references(&free).unwrap(), 0);

        let err = db.hotels.delete_hotel(used.clone()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));

        assert_eq!(db.hotels.delete_hotel(free.clone()).await.unwrap(), 1);
        assert!(db.hotels.get_hotel(&free).unwrap_err().is_not_found());
        assert_eq!(db.programs.get_programs().unwrap()[0].hotel_ids, vec![used]);
    }
}
