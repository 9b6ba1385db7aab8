use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use super::expenses_model::{
    Expense, ExpenseFilter, ExpenseInput, ExpenseListResponse, ExpenseStats, ExpenseUpdate,
    NewExpense,
};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::errors::{Error, Result};
use crate::programs::ProgramRepositoryTrait;
use crate::reservations::ReservationRepositoryTrait;
use crate::utils::{AmountInput, PageRequest};

/// Expense bookkeeping and the reporting queries built on top of it.
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    program_repository: Arc<dyn ProgramRepositoryTrait>,
    reservation_repository: Arc<dyn ReservationRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        program_repository: Arc<dyn ProgramRepositoryTrait>,
        reservation_repository: Arc<dyn ReservationRepositoryTrait>,
    ) -> Self {
        ExpenseService {
            repository,
            program_repository,
            reservation_repository,
        }
    }

    fn prepare_filter(filter: ExpenseFilter) -> ExpenseFilter {
        let filter = filter.normalized();
        if let Some(status) = &filter.status {
            debug!("Ignoring expense status filter '{}'", status);
        }
        filter
    }

    fn build_input(
        &self,
        description: String,
        amount: &AmountInput,
        expense_type: String,
        program_id: Option<String>,
        reservation_id: Option<String>,
        date: Option<chrono::NaiveDate>,
    ) -> Result<ExpenseInput> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(Error::missing("description"));
        }
        let expense_type = expense_type.trim().to_string();
        if expense_type.is_empty() {
            return Err(Error::missing("type"));
        }
        let amount = amount.to_positive_decimal("amount")?;

        let program_id = program_id
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        if let Some(program_id) = &program_id {
            match self.program_repository.get_program(program_id) {
                Ok(_) => {}
                Err(e) if e.is_not_found() => {
                    return Err(Error::invalid(format!("Program {} does not exist", program_id)));
                }
                Err(e) => return Err(e),
            }
        }

        let reservation_id = reservation_id
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if let Some(reservation_id) = &reservation_id {
            match self.reservation_repository.get_reservation(reservation_id) {
                Ok(_) => {}
                Err(e) if e.is_not_found() => {
                    return Err(Error::invalid(format!(
                        "Reservation {} does not exist",
                        reservation_id
                    )));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(ExpenseInput {
            description,
            amount,
            expense_type,
            program_id,
            reservation_id,
            date: date.unwrap_or_else(|| Utc::now().date_naive()),
        })
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.repository.get_expense(expense_id)
    }

    fn search_expenses(
        &self,
        filter: ExpenseFilter,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<ExpenseListResponse> {
        let page = PageRequest::new(page, limit)?;
        let filter = Self::prepare_filter(filter);
        let (expenses, total_count) = self.repository.search_expenses(&filter, page)?;
        Ok(ExpenseListResponse {
            expenses,
            pagination: page.meta(total_count),
        })
    }

    fn get_expense_stats(&self, filter: ExpenseFilter) -> Result<ExpenseStats> {
        let filter = Self::prepare_filter(filter);
        let (totals, by_type) = self.repository.get_expense_stats(&filter)?;
        Ok(ExpenseStats::fold(totals, &by_type))
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        let input = self.build_input(
            new_expense.description,
            &new_expense.amount,
            new_expense.expense_type,
            new_expense.program_id,
            new_expense.reservation_id,
            new_expense.date,
        )?;
        debug!("Creating {} expense of {}", input.expense_type, input.amount);
        self.repository.create_expense(input).await
    }

    async fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense> {
        let expense_id = expense_update
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::missing("id"))?;
        let input = self.build_input(
            expense_update.description,
            &expense_update.amount,
            expense_update.expense_type,
            expense_update.program_id,
            expense_update.reservation_id,
            expense_update.date,
        )?;
        self.repository.update_expense(expense_id, input).await
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_expense(expense_id.to_string())
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense {}", expense_id)));
        }
        Ok(())
    }
}
