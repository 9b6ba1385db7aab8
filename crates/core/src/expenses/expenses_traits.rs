use crate::errors::Result;
use crate::expenses::expenses_model::{
    Expense, ExpenseFilter, ExpenseInput, ExpenseListResponse, ExpenseStats, ExpenseTotals,
    ExpenseTypeTotal, ExpenseUpdate, NewExpense,
};
use crate::utils::PageRequest;
use async_trait::async_trait;

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn get_expense(&self, expense_id: &str) -> Result<Expense>;
    /// Returns the requested page (date descending) and the total row count.
    fn search_expenses(
        &self,
        filter: &ExpenseFilter,
        page: PageRequest,
    ) -> Result<(Vec<Expense>, i64)>;
    fn get_expense_totals(&self, filter: &ExpenseFilter) -> Result<ExpenseTotals>;
    /// Overall totals and per-type sums, read together so they always agree.
    fn get_expense_stats(
        &self,
        filter: &ExpenseFilter,
    ) -> Result<(ExpenseTotals, Vec<ExpenseTypeTotal>)>;
    async fn create_expense(&self, input: ExpenseInput) -> Result<Expense>;
    async fn update_expense(&self, expense_id: String, input: ExpenseInput) -> Result<Expense>;
    async fn delete_expense(&self, expense_id: String) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_expense(&self, expense_id: &str) -> Result<Expense>;
    fn search_expenses(
        &self,
        filter: ExpenseFilter,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<ExpenseListResponse>;
    fn get_expense_stats(&self, filter: ExpenseFilter) -> Result<ExpenseStats>;
    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense>;
    async fn delete_expense(&self, expense_id: &str) -> Result<()>;
}
