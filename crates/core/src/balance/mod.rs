//! Cash balance reporting: payments received minus expenses paid out.

mod balance_model;
mod balance_service;

pub use balance_model::CashBalance;
pub use balance_service::{BalanceService, BalanceServiceTrait};
