use std::sync::Arc;

use super::balance_model::CashBalance;
use crate::errors::Result;
use crate::expenses::{ExpenseFilter, ExpenseRepositoryTrait};
use crate::payments::PaymentRepositoryTrait;
use crate::programs::ProgramRepositoryTrait;

pub trait BalanceServiceTrait: Send + Sync {
    fn get_balance(&self, program_id: Option<&str>) -> Result<CashBalance>;
}

pub struct BalanceService {
    payment_repository: Arc<dyn PaymentRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    program_repository: Arc<dyn ProgramRepositoryTrait>,
}

impl BalanceService {
    pub fn new(
        payment_repository: Arc<dyn PaymentRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        program_repository: Arc<dyn ProgramRepositoryTrait>,
    ) -> Self {
        Self {
            payment_repository,
            expense_repository,
            program_repository,
        }
    }
}

impl BalanceServiceTrait for BalanceService {
    fn get_balance(&self, program_id: Option<&str>) -> Result<CashBalance> {
        let program_id = program_id.map(str::trim).filter(|p| !p.is_empty());
        if let Some(id) = program_id {
            // 404 for unknown programs instead of an all-zero balance
            self.program_repository.get_program(id)?;
        }
        let total_payments = self.payment_repository.get_total_payments(program_id)?;
        let filter = ExpenseFilter {
            program_id: program_id.map(str::to_string),
            ..Default::default()
        };
        let total_expenses = self.expense_repository.get_expense_totals(&filter)?.total_amount;
        Ok(CashBalance::new(
            program_id.map(str::to_string),
            total_payments,
            total_expenses,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{day, seed_expense, seed_payment, seed_program, seed_reservation, InMemoryStore};
    use rust_decimal_macros::dec;

    async fn seeded() -> (Arc<InMemoryStore>, String, String) {
        let store = Arc::new(InMemoryStore::default());
        let ramadan = seed_program(&store, "Omra Ramadan").await;
        let summer = seed_program(&store, "Omra Ete").await;

        let r1 = seed_reservation(&store, &ramadan, dec!(1000)).await;
        seed_payment(&store, &r1, dec!(600)).await;
        let r2 = seed_reservation(&store, &summer, dec!(800)).await;
        seed_payment(&store, &r2, dec!(300)).await;

        seed_expense(&store, "Billets", "Vol", dec!(250.50), Some(&ramadan), day(2025, 3, 1)).await;
        seed_expense(&store, "Fournitures", "Bureau", dec!(100), None, day(2025, 3, 2)).await;
        (store, ramadan, summer)
    }

    fn service(store: &Arc<InMemoryStore>) -> BalanceService {
        BalanceService::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn overall_balance_spans_every_program() {
        let (store, _, _) = seeded().await;
        let balance = service(&store).get_balance(None).unwrap();
        assert_eq!(balance.total_payments, dec!(900));
        assert_eq!(balance.total_expenses, dec!(350.50));
        assert_eq!(balance.balance, dec!(549.50));
        assert_eq!(balance.program_id, None);
    }

    #[tokio::test]
    async fn program_balance_only_counts_that_program() {
        let (store, ramadan, summer) = seeded().await;
        let svc = service(&store);

        let balance = svc.get_balance(Some(&ramadan)).unwrap();
        assert_eq!(balance.total_payments, dec!(600));
        assert_eq!(balance.total_expenses, dec!(250.50));
        assert_eq!(balance.balance, dec!(349.50));

        let balance = svc.get_balance(Some(&summer)).unwrap();
        assert_eq!(balance.total_expenses, dec!(0));
        assert_eq!(balance.balance, dec!(300));
    }

    #[tokio::test]
    async fn unknown_program_is_not_found() {
        let (store, _, _) = seeded().await;
        let err = service(&store).get_balance(Some("missing")).unwrap_err();
        assert!(err.is_not_found());
    }
}
