//! Expense domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{AmountInput, PageMeta};

/// Fixed reporting buckets for expense types.
///
/// Expense types are free text in storage; anything that does not match one of
/// the known labels (ignoring case and surrounding blanks) lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseCategory {
    Vol,
    HotelMakkah,
    HotelMadina,
    Visa,
    Transport,
    Other,
}

impl ExpenseCategory {
    /// Categories with a label of their own, in display order.
    pub const KNOWN: [ExpenseCategory; 5] = [
        ExpenseCategory::Vol,
        ExpenseCategory::HotelMakkah,
        ExpenseCategory::HotelMadina,
        ExpenseCategory::Visa,
        ExpenseCategory::Transport,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Vol => "Vol",
            ExpenseCategory::HotelMakkah => "Hotel Makkah",
            ExpenseCategory::HotelMadina => "Hotel Madina",
            ExpenseCategory::Visa => "Visa",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn classify(expense_type: &str) -> Self {
        let needle = expense_type.trim();
        Self::KNOWN
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .unwrap_or(ExpenseCategory::Other)
    }
}

/// Domain model representing an expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub program_id: Option<String>,
    pub program_name: Option<String>,
    pub reservation_id: Option<String>,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: AmountInput,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub program_id: Option<String>,
    pub reservation_id: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Input model for updating an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub id: Option<String>,
    pub description: String,
    pub amount: AmountInput,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub program_id: Option<String>,
    pub reservation_id: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Validated expense fields handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: Decimal,
    pub expense_type: String,
    pub program_id: Option<String>,
    pub reservation_id: Option<String>,
    pub date: NaiveDate,
}

/// Listing and stats filter.
///
/// `status` is accepted for compatibility with existing clients but is not
/// applied: expenses carry no status column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilter {
    pub search: Option<String>,
    pub program: Option<String>,
    pub program_id: Option<String>,
    #[serde(rename = "type")]
    pub expense_type: Option<String>,
    pub status: Option<String>,
}

impl ExpenseFilter {
    /// Trims every field and drops the blank ones.
    pub fn normalized(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            search: clean(self.search),
            program: clean(self.program),
            program_id: clean(self.program_id),
            expense_type: clean(self.expense_type),
            status: clean(self.status),
        }
    }
}

/// Overall aggregate for a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpenseTotals {
    pub total_amount: Decimal,
    pub count: i64,
}

/// One row of the group-by-type aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTypeTotal {
    #[serde(rename = "type")]
    pub expense_type: String,
    pub total_amount: Decimal,
    pub count: i64,
}

/// Summed amounts per reporting bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub vol: Decimal,
    pub hotel_makkah: Decimal,
    pub hotel_madina: Decimal,
    pub visa: Decimal,
    pub transport: Decimal,
    pub other: Decimal,
}

impl ExpenseBreakdown {
    pub fn add(&mut self, category: ExpenseCategory, amount: Decimal) {
        *self.bucket_mut(category) += amount;
    }

    pub fn get(&self, category: ExpenseCategory) -> Decimal {
        match category {
            ExpenseCategory::Vol => self.vol,
            ExpenseCategory::HotelMakkah => self.hotel_makkah,
            ExpenseCategory::HotelMadina => self.hotel_madina,
            ExpenseCategory::Visa => self.visa,
            ExpenseCategory::Transport => self.transport,
            ExpenseCategory::Other => self.other,
        }
    }

    pub fn sum(&self) -> Decimal {
        self.vol + self.hotel_makkah + self.hotel_madina + self.visa + self.transport + self.other
    }

    fn bucket_mut(&mut self, category: ExpenseCategory) -> &mut Decimal {
        match category {
            ExpenseCategory::Vol => &mut self.vol,
            ExpenseCategory::HotelMakkah => &mut self.hotel_makkah,
            ExpenseCategory::HotelMadina => &mut self.hotel_madina,
            ExpenseCategory::Visa => &mut self.visa,
            ExpenseCategory::Transport => &mut self.transport,
            ExpenseCategory::Other => &mut self.other,
        }
    }
}

/// Aggregate report for a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub total_amount: Decimal,
    pub total_count: i64,
    pub by_type: ExpenseBreakdown,
}

impl ExpenseStats {
    /// Folds group-by rows into the fixed buckets.
    pub fn fold(totals: ExpenseTotals, by_type: &[ExpenseTypeTotal]) -> Self {
        let mut breakdown = ExpenseBreakdown::default();
        for row in by_type {
            breakdown.add(ExpenseCategory::classify(&row.expense_type), row.total_amount);
        }
        Self {
            total_amount: totals.total_amount,
            total_count: totals.count,
            by_type: breakdown,
        }
    }
}

/// One page of expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    #[serde(flatten)]
    pub pagination: PageMeta,
}
