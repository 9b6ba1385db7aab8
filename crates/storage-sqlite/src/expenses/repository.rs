use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::{count, sum};
use diesel::expression::IntoSql;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use tripdesk_core::errors::{Error, Result};
use tripdesk_core::expenses::{
    Expense, ExpenseFilter, ExpenseInput, ExpenseRepositoryTrait, ExpenseTotals, ExpenseTypeTotal,
};
use tripdesk_core::utils::{decimal_from_db, decimal_to_db, PageRequest};

use super::model::ExpenseDB;
use crate::db::{fold_case, fold_text, get_connection, instr, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{expenses, programs};

type ExpensePredicate = Box<dyn BoxableExpression<expenses::table, Sqlite, SqlType = Bool>>;

/// WHERE clause shared by the listing, count and stats queries.
///
/// Search is a literal substring match on Unicode-folded text: `%` and `_`
/// in the input are plain characters. `status` has no column and is not
/// applied.
fn filter_predicate(filter: &ExpenseFilter) -> ExpensePredicate {
    let mut predicate: ExpensePredicate = Box::new(true.into_sql::<Bool>());

    if let Some(search) = &filter.search {
        let needle = fold_text(search);
        let program_matches = expenses::program_id.assume_not_null().eq_any(
            programs::table
                .filter(instr(fold_case(programs::name), needle.clone()).gt(0))
                .select(programs::id),
        );
        predicate = Box::new(
            predicate.and(
                instr(fold_case(expenses::description), needle.clone())
                    .gt(0)
                    .or(instr(fold_case(expenses::expense_type), needle).gt(0))
                    .or(program_matches),
            ),
        );
    }

    if let Some(program) = &filter.program {
        predicate = Box::new(
            predicate.and(
                expenses::program_id.assume_not_null().eq_any(
                    programs::table
                        .filter(programs::name.eq(program.clone()))
                        .select(programs::id),
                ),
            ),
        );
    }

    if let Some(program_id) = &filter.program_id {
        predicate = Box::new(predicate.and(expenses::program_id.assume_not_null().eq(program_id.clone())));
    }

    if let Some(expense_type) = &filter.expense_type {
        predicate = Box::new(predicate.and(expenses::expense_type.eq(expense_type.clone())));
    }

    predicate
}

fn program_names(
    conn: &mut SqliteConnection,
    rows: &[ExpenseDB],
) -> Result<HashMap<String, String>> {
    let ids: Vec<&String> = rows.iter().filter_map(|r| r.program_id.as_ref()).collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let names = programs::table
        .filter(programs::id.eq_any(ids))
        .select((programs::id, programs::name))
        .load::<(String, String)>(conn)
        .into_core()?;
    Ok(names.into_iter().collect())
}

fn with_program_names(conn: &mut SqliteConnection, rows: Vec<ExpenseDB>) -> Result<Vec<Expense>> {
    let names = program_names(conn, &rows)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let name = row.program_id.as_ref().and_then(|id| names.get(id).cloned());
            row.into_domain(name)
        })
        .collect())
}

fn load_expense(conn: &mut SqliteConnection, expense_id: &str) -> Result<Expense> {
    let row = expenses::table
        .find(expense_id)
        .select(ExpenseDB::as_select())
        .first::<ExpenseDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::NotFound(format!("Expense {}", expense_id)))?;
    with_program_names(conn, vec![row])?
        .pop()
        .ok_or_else(|| Error::NotFound(format!("Expense {}", expense_id)))
}

fn load_totals(conn: &mut SqliteConnection, filter: &ExpenseFilter) -> QueryResult<ExpenseTotals> {
    let (total, rows) = expenses::table
        .filter(filter_predicate(filter))
        .select((sum(expenses::amount), count(expenses::id)))
        .first::<(Option<f64>, i64)>(conn)?;
    Ok(ExpenseTotals {
        total_amount: total.map(decimal_from_db).unwrap_or_default(),
        count: rows,
    })
}

fn load_totals_by_type(
    conn: &mut SqliteConnection,
    filter: &ExpenseFilter,
) -> QueryResult<Vec<ExpenseTypeTotal>> {
    let groups = expenses::table
        .filter(filter_predicate(filter))
        .group_by(expenses::expense_type)
        .select((
            expenses::expense_type,
            sum(expenses::amount),
            count(expenses::id),
        ))
        .order(expenses::expense_type.asc())
        .load::<(String, Option<f64>, i64)>(conn)?;
    Ok(groups
        .into_iter()
        .map(|(expense_type, total, rows)| ExpenseTypeTotal {
            expense_type,
            total_amount: total.map(decimal_from_db).unwrap_or_default(),
            count: rows,
        })
        .collect())
}

pub struct ExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        let mut conn = get_connection(&self.pool)?;
        load_expense(&mut conn, expense_id)
    }

    fn search_expenses(
        &self,
        filter: &ExpenseFilter,
        page: PageRequest,
    ) -> Result<(Vec<Expense>, i64)> {
        let mut conn = get_connection(&self.pool)?;
        // Count and page come from the same read snapshot.
        conn.transaction::<_, StorageError, _>(|conn| {
            let total = expenses::table
                .filter(filter_predicate(filter))
                .count()
                .get_result::<i64>(conn)?;

            let rows = expenses::table
                .filter(filter_predicate(filter))
                .select(ExpenseDB::as_select())
                .order((expenses::date.desc(), expenses::created_at.desc()))
                .limit(page.limit)
                .offset(page.offset())
                .load::<ExpenseDB>(conn)?;

            Ok((with_program_names(conn, rows)?, total))
        })
        .map_err(Error::from)
    }

    fn get_expense_totals(&self, filter: &ExpenseFilter) -> Result<ExpenseTotals> {
        let mut conn = get_connection(&self.pool)?;
        load_totals(&mut conn, filter).into_core()
    }

    fn get_expense_stats(
        &self,
        filter: &ExpenseFilter,
    ) -> Result<(ExpenseTotals, Vec<ExpenseTypeTotal>)> {
        let mut conn = get_connection(&self.pool)?;
        conn.transaction::<_, StorageError, _>(|conn| {
            let totals = load_totals(conn, filter)?;
            let by_type = load_totals_by_type(conn, filter)?;
            Ok((totals, by_type))
        })
        .map_err(Error::from)
    }

    async fn create_expense(&self, input: ExpenseInput) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let now = Utc::now().naive_utc();
                let row = ExpenseDB {
                    id: Uuid::new_v4().to_string(),
                    description: input.description,
                    amount: decimal_to_db(input.amount),
                    expense_type: input.expense_type,
                    program_id: input.program_id,
                    reservation_id: input.reservation_id,
                    date: input.date,
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(expenses::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                load_expense(conn, &row.id)
            })
            .await
    }

    async fn update_expense(&self, expense_id: String, input: ExpenseInput) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let updated = diesel::update(expenses::table.find(&expense_id))
                    .set((
                        expenses::description.eq(input.description),
                        expenses::amount.eq(decimal_to_db(input.amount)),
                        expenses::expense_type.eq(input.expense_type),
                        expenses::program_id.eq(input.program_id),
                        expenses::reservation_id.eq(input.reservation_id),
                        expenses::date.eq(input.date),
                        expenses::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(Error::NotFound(format!("Expense {}", expense_id)));
                }
                load_expense(conn, &expense_id)
            })
            .await
    }

    async fn delete_expense(&self, expense_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(expenses::table.find(expense_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
