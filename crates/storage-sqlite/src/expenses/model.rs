//! Database model for expenses.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use tripdesk_core::expenses::Expense;
use tripdesk_core::utils::decimal_from_db;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseDB {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub expense_type: String,
    pub program_id: Option<String>,
    pub reservation_id: Option<String>,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ExpenseDB {
    pub fn into_domain(self, program_name: Option<String>) -> Expense {
        Expense {
            id: self.id,
            description: self.description,
            amount: decimal_from_db(self.amount),
            expense_type: self.expense_type,
            program_id: self.program_id,
            program_name,
            reservation_id: self.reservation_id,
            date: self.date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
