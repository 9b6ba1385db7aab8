//! Temporary database fixtures for repository tests.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::{tempdir, TempDir};
use tripdesk_core::expenses::{Expense, ExpenseInput, ExpenseRepositoryTrait};
use tripdesk_core::hotels::{HotelRepositoryTrait, NewHotel};
use tripdesk_core::programs::{NewProgram, ProgramRepositoryTrait};
use tripdesk_core::reservations::{ReservationInput, ReservationRepositoryTrait};

use crate::db::{create_pool, init, run_migrations, spawn_writer};
use crate::{
    ExpenseRepository, HotelRepository, PaymentRepository, ProgramRepository,
    ReservationRepository,
};

/// Every repository over one migrated database. Keep `_dir` alive for the test.
pub struct TestDb {
    pub programs: ProgramRepository,
    pub hotels: HotelRepository,
    pub reservations: ReservationRepository,
    pub payments: PaymentRepository,
    pub expenses: ExpenseRepository,
    _dir: TempDir,
}

pub fn setup() -> TestDb {
    let dir = tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    init(&db_path).expect("Failed to init database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    TestDb {
        programs: ProgramRepository::new(Arc::clone(&pool), writer.clone()),
        hotels: HotelRepository::new(Arc::clone(&pool), writer.clone()),
        reservations: ReservationRepository::new(Arc::clone(&pool), writer.clone()),
        payments: PaymentRepository::new(Arc::clone(&pool), writer.clone()),
        expenses: ExpenseRepository::new(pool, writer),
        _dir: dir,
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

impl TestDb {
    pub async fn hotel(&self, name: &str, city: &str) -> String {
        self.hotels
            .create_hotel(NewHotel {
                name: name.to_string(),
                city: city.to_string(),
                location: None,
            })
            .await
            .expect("hotel")
            .id
    }

    pub async fn program(&self, name: &str, hotel_ids: Vec<String>) -> String {
        self.programs
            .create_program(NewProgram {
                name: name.to_string(),
                hotel_ids,
                ..Default::default()
            })
            .await
            .expect("program")
            .id
    }

    pub async fn reservation(&self, program_id: &str, price: Decimal) -> String {
        self.reservations
            .create_reservation(ReservationInput {
                program_id: program_id.to_string(),
                customer_name: "Khadija Bennani".to_string(),
                phone: Some("0612345678".to_string()),
                passport_number: None,
                room_type: Some("double".to_string()),
                price,
                reservation_date: day(2025, 2, 1),
            })
            .await
            .expect("reservation")
            .id
    }

    pub async fn expense(
        &self,
        description: &str,
        expense_type: &str,
        amount: Decimal,
        program_id: Option<&str>,
        date: NaiveDate,
    ) -> Expense {
        self.expenses
            .create_expense(ExpenseInput {
                description: description.to_string(),
                amount,
                expense_type: expense_type.to_string(),
                program_id: program_id.map(str::to_string),
                reservation_id: None,
                date,
            })
            .await
            .expect("expense")
    }
}
