//! In-memory repositories shared by the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::expenses::{
    Expense, ExpenseFilter, ExpenseInput, ExpenseRepositoryTrait, ExpenseTotals, ExpenseTypeTotal,
};
use crate::hotels::{Hotel, HotelRepositoryTrait, HotelUpdate, NewHotel};
use crate::payments::{Payment, PaymentInput, PaymentMethod, PaymentRepositoryTrait};
use crate::programs::{NewProgram, Program, ProgramRepositoryTrait, ProgramUpdate};
use crate::reservations::{Reservation, ReservationInput, ReservationRepositoryTrait};
use crate::utils::PageRequest;

#[derive(Default)]
struct State {
    seq: i64,
    programs: Vec<Program>,
    hotels: Vec<Hotel>,
    reservations: Vec<Reservation>,
    payments: Vec<Payment>,
    expenses: Vec<Expense>,
}

impl State {
    fn next(&mut self, prefix: &str) -> (String, NaiveDateTime) {
        self.seq += 1;
        let base = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap_or_default();
        (format!("{}-{}", prefix, self.seq), base + Duration::seconds(self.seq))
    }

    fn program_name(&self, program_id: Option<&str>) -> Option<String> {
        let id = program_id?;
        self.programs
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
    }

    /// Search folds both sides with `to_lowercase` and matches a literal
    /// substring, the same rule the SQLite store applies through `fold_case`.
    fn matches(&self, expense: &Expense, filter: &ExpenseFilter) -> bool {
        let program_name = self.program_name(expense.program_id.as_deref());
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            let hit = expense.description.to_lowercase().contains(&needle)
                || expense.expense_type.to_lowercase().contains(&needle)
                || program_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(program) = &filter.program {
            if program_name.as_deref() != Some(program.as_str()) {
                return false;
            }
        }
        if let Some(program_id) = &filter.program_id {
            if expense.program_id.as_deref() != Some(program_id.as_str()) {
                return false;
            }
        }
        if let Some(expense_type) = &filter.expense_type {
            if &expense.expense_type != expense_type {
                return false;
            }
        }
        true
    }

    fn totals(&self, filter: &ExpenseFilter) -> ExpenseTotals {
        let rows = self.filtered(filter);
        ExpenseTotals {
            total_amount: rows.iter().map(|e| e.amount).sum(),
            count: rows.len() as i64,
        }
    }

    /// Exact-type groups in byte order, like `GROUP BY ... ORDER BY` in SQLite.
    fn totals_by_type(&self, filter: &ExpenseFilter) -> Vec<ExpenseTypeTotal> {
        let mut groups: Vec<ExpenseTypeTotal> = Vec::new();
        for expense in self.filtered(filter) {
            match groups.iter_mut().find(|g| g.expense_type == expense.expense_type) {
                Some(group) => {
                    group.total_amount += expense.amount;
                    group.count += 1;
                }
                None => groups.push(ExpenseTypeTotal {
                    expense_type: expense.expense_type.clone(),
                    total_amount: expense.amount,
                    count: 1,
                }),
            }
        }
        groups.sort_by(|a, b| a.expense_type.cmp(&b.expense_type));
        groups
    }

    fn filtered(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| self.matches(e, filter))
            .cloned()
            .map(|mut e| {
                e.program_name = self.program_name(e.program_id.as_deref());
                e
            })
            .collect()
    }
}

/// One store implementing every repository trait, mirroring the SQLite
/// referential rules (cascades and detaches).
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> Result<T> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| Error::Unexpected("store poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

fn not_found(what: &str, id: &str) -> Error {
    Error::NotFound(format!("{} {}", what, id))
}

#[async_trait]
impl ProgramRepositoryTrait for InMemoryStore {
    fn get_programs(&self) -> Result<Vec<Program>> {
        self.with(|s| s.programs.clone())
    }

    fn get_program(&self, program_id: &str) -> Result<Program> {
        self.with(|s| s.programs.iter().find(|p| p.id == program_id).cloned())?
            .ok_or_else(|| not_found("Program", program_id))
    }

    async fn create_program(&self, new_program: NewProgram) -> Result<Program> {
        self.with(|s| {
            let (id, now) = s.next("program");
            let program = Program {
                id,
                name: new_program.name,
                departure_date: new_program.departure_date,
                return_date: new_program.return_date,
                visa_deadline: new_program.visa_deadline,
                hotel_deadline: new_program.hotel_deadline,
                flight_deadline: new_program.flight_deadline,
                hotel_ids: new_program.hotel_ids,
                created_at: now,
                updated_at: now,
            };
            s.programs.push(program.clone());
            program
        })
    }

    async fn update_program(&self, program_update: ProgramUpdate) -> Result<Program> {
        let id = program_update.id.clone().unwrap_or_default();
        self.with(|s| {
            let (_, now) = s.next("program");
            let program = s.programs.iter_mut().find(|p| p.id == id)?;
            program.name = program_update.name;
            program.departure_date = program_update.departure_date;
            program.return_date = program_update.return_date;
            program.visa_deadline = program_update.visa_deadline;
            program.hotel_deadline = program_update.hotel_deadline;
            program.flight_deadline = program_update.flight_deadline;
            program.hotel_ids = program_update.hotel_ids;
            program.updated_at = now;
            Some(program.clone())
        })?
        .ok_or_else(|| not_found("Program", &id))
    }

    async fn delete_program(&self, program_id: String) -> Result<usize> {
        self.with(|s| {
            let before = s.programs.len();
            s.programs.retain(|p| p.id != program_id);
            for expense in s.expenses.iter_mut() {
                if expense.program_id.as_deref() == Some(program_id.as_str()) {
                    expense.program_id = None;
                }
            }
            before - s.programs.len()
        })
    }
}

#[async_trait]
impl HotelRepositoryTrait for InMemoryStore {
    fn get_hotels(&self, city: Option<&str>) -> Result<Vec<Hotel>> {
        self.with(|s| {
            s.hotels
                .iter()
                .filter(|h| city.map_or(true, |c| h.city.eq_ignore_ascii_case(c)))
                .cloned()
                .collect()
        })
    }

    fn get_hotel(&self, hotel_id: &str) -> Result<Hotel> {
        self.with(|s| s.hotels.iter().find(|h| h.id == hotel_id).cloned())?
            .ok_or_else(|| not_found("Hotel", hotel_id))
    }

    fn count_program_references(&self, hotel_id: &str) -> Result<i64> {
        self.with(|s| {
            s.programs
                .iter()
                .filter(|p| p.hotel_ids.iter().any(|h| h == hotel_id))
                .count() as i64
        })
    }

    async fn create_hotel(&self, new_hotel: NewHotel) -> Result<Hotel> {
        self.with(|s| {
            let (id, now) = s.next("hotel");
            let hotel = Hotel {
                id,
                name: new_hotel.name,
                city: new_hotel.city,
                location: new_hotel.location,
                created_at: now,
                updated_at: now,
            };
            s.hotels.push(hotel.clone());
            hotel
        })
    }

    async fn update_hotel(&self, hotel_update: HotelUpdate) -> Result<Hotel> {
        let id = hotel_update.id.clone().unwrap_or_default();
        self.with(|s| {
            let (_, now) = s.next("hotel");
            let hotel = s.hotels.iter_mut().find(|h| h.id == id)?;
            hotel.name = hotel_update.name;
            hotel.city = hotel_update.city;
            hotel.location = hotel_update.location;
            hotel.updated_at = now;
            Some(hotel.clone())
        })?
        .ok_or_else(|| not_found("Hotel", &id))
    }

    async fn delete_hotel(&self, hotel_id: String) -> Result<usize> {
        self.with(|s| {
            let before = s.hotels.len();
            s.hotels.retain(|h| h.id != hotel_id);
            before - s.hotels.len()
        })
    }
}

#[async_trait]
impl ReservationRepositoryTrait for InMemoryStore {
    fn get_reservations(&self, program_id: Option<&str>) -> Result<Vec<Reservation>> {
        self.with(|s| {
            s.reservations
                .iter()
                .filter(|r| program_id.map_or(true, |p| r.program_id == p))
                .cloned()
                .collect()
        })
    }

    fn get_reservation(&self, reservation_id: &str) -> Result<Reservation> {
        self.with(|s| s.reservations.iter().find(|r| r.id == reservation_id).cloned())?
            .ok_or_else(|| not_found("Reservation", reservation_id))
    }

    fn count_for_program(&self, program_id: &str) -> Result<i64> {
        self.with(|s| {
            s.reservations
                .iter()
                .filter(|r| r.program_id == program_id)
                .count() as i64
        })
    }

    async fn create_reservation(&self, input: ReservationInput) -> Result<Reservation> {
        self.with(|s| {
            let (id, now) = s.next("reservation");
            let reservation = Reservation {
                id,
                program_id: input.program_id,
                customer_name: input.customer_name,
                phone: input.phone,
                passport_number: input.passport_number,
                room_type: input.room_type,
                price: input.price,
                reservation_date: input.reservation_date,
                created_at: now,
                updated_at: now,
            };
            s.reservations.push(reservation.clone());
            reservation
        })
    }

    async fn update_reservation(
        &self,
        reservation_id: String,
        input: ReservationInput,
    ) -> Result<Reservation> {
        self.with(|s| {
            let (_, now) = s.next("reservation");
            let r = s.reservations.iter_mut().find(|r| r.id == reservation_id)?;
            r.program_id = input.program_id;
            r.customer_name = input.customer_name;
            r.phone = input.phone;
            r.passport_number = input.passport_number;
            r.room_type = input.room_type;
            r.price = input.price;
            r.reservation_date = input.reservation_date;
            r.updated_at = now;
            Some(r.clone())
        })?
        .ok_or_else(|| not_found("Reservation", &reservation_id))
    }

    async fn delete_reservation(&self, reservation_id: String) -> Result<usize> {
        self.with(|s| {
            let before = s.reservations.len();
            s.reservations.retain(|r| r.id != reservation_id);
            s.payments.retain(|p| p.reservation_id != reservation_id);
            for expense in s.expenses.iter_mut() {
                if expense.reservation_id.as_deref() == Some(reservation_id.as_str()) {
                    expense.reservation_id = None;
                }
            }
            before - s.reservations.len()
        })
    }
}

#[async_trait]
impl PaymentRepositoryTrait for InMemoryStore {
    fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        self.with(|s| s.payments.iter().find(|p| p.id == payment_id).cloned())?
            .ok_or_else(|| not_found("Payment", payment_id))
    }

    fn get_payments_for_reservation(&self, reservation_id: &str) -> Result<Vec<Payment>> {
        self.with(|s| {
            s.payments
                .iter()
                .filter(|p| p.reservation_id == reservation_id)
                .cloned()
                .collect()
        })
    }

    fn get_paid_total(&self, reservation_id: &str) -> Result<Decimal> {
        Ok(self
            .get_payments_for_reservation(reservation_id)?
            .iter()
            .map(|p| p.amount)
            .sum())
    }

    fn get_total_payments(&self, program_id: Option<&str>) -> Result<Decimal> {
        self.with(|s| {
            s.payments
                .iter()
                .filter(|p| {
                    program_id.map_or(true, |program| {
                        s.reservations
                            .iter()
                            .any(|r| r.id == p.reservation_id && r.program_id == program)
                    })
                })
                .map(|p| p.amount)
                .sum()
        })
    }

    async fn create_payment(&self, input: PaymentInput) -> Result<Payment> {
        self.with(|s| {
            let (id, now) = s.next("payment");
            let payment = Payment {
                id,
                reservation_id: input.reservation_id,
                amount: input.amount,
                method: input.method,
                paid_at: input.paid_at,
                file_path: input.file_path,
                note: input.note,
                created_at: now,
            };
            s.payments.push(payment.clone());
            payment
        })
    }

    async fn delete_payment(&self, payment_id: String) -> Result<usize> {
        self.with(|s| {
            let before = s.payments.len();
            s.payments.retain(|p| p.id != payment_id);
            before - s.payments.len()
        })
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for InMemoryStore {
    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.with(|s| {
            s.expenses.iter().find(|e| e.id == expense_id).cloned().map(|mut e| {
                e.program_name = s.program_name(e.program_id.as_deref());
                e
            })
        })?
        .ok_or_else(|| not_found("Expense", expense_id))
    }

    fn search_expenses(
        &self,
        filter: &ExpenseFilter,
        page: PageRequest,
    ) -> Result<(Vec<Expense>, i64)> {
        self.with(|s| {
            let mut rows = s.filtered(filter);
            rows.sort_by(|a, b| {
                b.date
                    .cmp(&a.date)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            });
            let total = rows.len() as i64;
            let rows = rows
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit as usize)
                .collect();
            (rows, total)
        })
    }

    fn get_expense_totals(&self, filter: &ExpenseFilter) -> Result<ExpenseTotals> {
        self.with(|s| s.totals(filter))
    }

    fn get_expense_stats(
        &self,
        filter: &ExpenseFilter,
    ) -> Result<(ExpenseTotals, Vec<ExpenseTypeTotal>)> {
        self.with(|s| (s.totals(filter), s.totals_by_type(filter)))
    }

    async fn create_expense(&self, input: ExpenseInput) -> Result<Expense> {
        let expense = self.with(|s| {
            let (id, now) = s.next("expense");
            let expense = Expense {
                id,
                description: input.description,
                amount: input.amount,
                expense_type: input.expense_type,
                program_id: input.program_id,
                program_name: None,
                reservation_id: input.reservation_id,
                date: input.date,
                created_at: now,
                updated_at: now,
            };
            s.expenses.push(expense.clone());
            expense
        })?;
        self.get_expense(&expense.id)
    }

    async fn update_expense(&self, expense_id: String, input: ExpenseInput) -> Result<Expense> {
        self.with(|s| {
            let (_, now) = s.next("expense");
            let e = s.expenses.iter_mut().find(|e| e.id == expense_id)?;
            e.description = input.description;
            e.amount = input.amount;
            e.expense_type = input.expense_type;
            e.program_id = input.program_id;
            e.reservation_id = input.reservation_id;
            e.date = input.date;
            e.updated_at = now;
            Some(())
        })?
        .ok_or_else(|| not_found("Expense", &expense_id))?;
        self.get_expense(&expense_id)
    }

    async fn delete_expense(&self, expense_id: String) -> Result<usize> {
        self.with(|s| {
            let before = s.expenses.len();
            s.expenses.retain(|e| e.id != expense_id);
            before - s.expenses.len()
        })
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn seed_program(store: &Arc<InMemoryStore>, name: &str) -> String {
    store
        .create_program(NewProgram {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("program")
        .id
}

pub async fn seed_reservation(store: &Arc<InMemoryStore>, program_id: &str, price: Decimal) -> String {
    store
        .create_reservation(ReservationInput {
            program_id: program_id.to_string(),
            customer_name: "Fatima Zahra".to_string(),
            phone: None,
            passport_number: None,
            room_type: None,
            price,
            reservation_date: day(2025, 2, 1),
        })
        .await
        .expect("reservation")
        .id
}

pub async fn seed_payment(store: &Arc<InMemoryStore>, reservation_id: &str, amount: Decimal) -> Payment {
    store
        .create_payment(PaymentInput {
            reservation_id: reservation_id.to_string(),
            amount,
            method: PaymentMethod::Cash,
            paid_at: day(2025, 2, 2),
            file_path: None,
            note: None,
        })
        .await
        .expect("payment")
}

pub async fn seed_expense(
    store: &Arc<InMemoryStore>,
    description: &str,
    expense_type: &str,
    amount: Decimal,
    program_id: Option<&str>,
    date: NaiveDate,
) -> Expense {
    store
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
