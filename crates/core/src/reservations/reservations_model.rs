//! Reservation domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::AmountInput;

/// Customer booking against a program.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub program_id: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub passport_number: Option<String>,
    pub room_type: Option<String>,
    pub price: Decimal,
    pub reservation_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Reservation with what has been paid against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub paid_total: Decimal,
    pub remaining: Decimal,
}

/// Input model for creating a new reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub program_id: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub passport_number: Option<String>,
    pub room_type: Option<String>,
    pub price: AmountInput,
    pub reservation_date: Option<NaiveDate>,
}

/// Input model for updating a reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    pub id: Option<String>,
    pub program_id: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub passport_number: Option<String>,
    pub room_type: Option<String>,
    pub price: AmountInput,
    pub reservation_date: Option<NaiveDate>,
}

/// Validated reservation fields handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationInput {
    pub program_id: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub passport_number: Option<String>,
    pub room_type: Option<String>,
    pub price: Decimal,
    pub reservation_date: NaiveDate,
}
