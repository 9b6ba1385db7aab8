use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashBalance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    pub total_payments: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

impl CashBalance {
    pub fn new(program_id: Option<String>, total_payments: Decimal, total_expenses: Decimal) -> Self {
        Self {
            program_id,
            total_payments,
            total_expenses,
            balance: total_payments - total_expenses,
        }
    }
}
