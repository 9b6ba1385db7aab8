use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use tripdesk_core::errors::{Error, Result};
use tripdesk_core::programs::{NewProgram, Program, ProgramRepositoryTrait, ProgramUpdate};

use super::model::{ProgramDB, ProgramHotelDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{program_hotels, programs};

pub struct ProgramRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProgramRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProgramRepository { pool, writer }
    }
}

fn load_hotel_ids(
    conn: &mut SqliteConnection,
    program_ids: &[String],
) -> Result<HashMap<String, Vec<String>>> {
    let links = program_hotels::table
        .filter(program_hotels::program_id.eq_any(program_ids))
        .select(ProgramHotelDB::as_select())
        .order((program_hotels::program_id, program_hotels::hotel_id))
        .load::<ProgramHotelDB>(conn)
        .into_core()?;
    let mut by_program: HashMap<String, Vec<String>> = HashMap::new();
    for link in links {
        by_program.entry(link.program_id).or_default().push(link.hotel_id);
    }
    Ok(by_program)
}

fn load_program(conn: &mut SqliteConnection, program_id: &str) -> Result<Program> {
    let row = programs::table
        .find(program_id)
        .select(ProgramDB::as_select())
        .first::<ProgramDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::NotFound(format!("Program {}", program_id)))?;
    let mut hotel_ids = load_hotel_ids(conn, &[row.id.clone()])?;
    let ids = hotel_ids.remove(&row.id).unwrap_or_default();
    Ok(row.into_domain(ids))
}

fn replace_hotel_links(
    conn: &mut SqliteConnection,
    program_id: &str,
    hotel_ids: &[String],
) -> Result<()> {
    diesel::delete(program_hotels::table.filter(program_hotels::program_id.eq(program_id)))
        .execute(conn)
        .into_core()?;
    let links: Vec<ProgramHotelDB> = hotel_ids
        .iter()
        .map(|hotel_id| ProgramHotelDB {
            program_id: program_id.to_string(),
            hotel_id: hotel_id.clone(),
        })
        .collect();
    if !links.is_empty() {
        diesel::insert_into(program_hotels::table)
            .values(&links)
            .execute(conn)
            .into_core()?;
    }
    Ok(())
}

#[async_trait]
impl ProgramRepositoryTrait for ProgramRepository {
    fn get_programs(&self) -> Result<Vec<Program>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = programs::table
            .select(ProgramDB::as_select())
            .order((programs::departure_date.desc(), programs::name.asc()))
            .load::<ProgramDB>(&mut conn)
            .into_core()?;
        let ids: Vec<String> = rows.iter().map(|p| p.id.clone()).collect();
        let mut hotel_ids = load_hotel_ids(&mut conn, &ids)?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let ids = hotel_ids.remove(&row.id).unwrap_or_default();
                row.into_domain(ids)
            })
            .collect())
    }

    fn get_program(&self, program_id: &str) -> Result<Program> {
        let mut conn = get_connection(&self.pool)?;
        load_program(&mut conn, program_id)
    }

    async fn create_program(&self, new_program: NewProgram) -> Result<Program> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Program> {
                let now = Utc::now().naive_utc();
                let row = ProgramDB {
                    id: Uuid::new_v4().to_string(),
                    name: new_program.name,
                    departure_date: new_program.departure_date,
                    return_date: new_program.return_date,
                    visa_deadline: new_program.visa_deadline,
                    hotel_deadline: new_program.hotel_deadline,
                    flight_deadline: new_program.flight_deadline,
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(programs::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                replace_hotel_links(conn, &row.id, &new_program.hotel_ids)?;
                load_program(conn, &row.id)
            })
            .await
    }

    async fn update_program(&self, program_update: ProgramUpdate) -> Result<Program> {
        let program_id = program_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Program> {
                let updated = diesel::update(programs::table.find(&program_id))
                    .set((
                        programs::name.eq(program_update.name),
                        programs::departure_date.eq(program_update.departure_date),
                        programs::return_date.eq(program_update.return_date),
                        programs::visa_deadline.eq(program_update.visa_deadline),
                        programs::hotel_deadline.eq(program_update.hotel_deadline),
                        programs::flight_deadline.eq(program_update.flight_deadline),
                        programs::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(Error::NotFound(format!("Program {}", program_id)));
                }
                replace_hotel_links(conn, &program_id, &program_update.hotel_ids)?;
                load_program(conn, &program_id)
            })
            .await
    }

    /// Hotel links cascade and expenses are detached by the schema's foreign keys.
    async fn delete_program(&self, program_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(programs::table.find(program_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
