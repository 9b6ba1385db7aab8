use std::str::FromStr;

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};

/// Money amount as sent by a form: either a JSON number or a string such as `"150.50"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Parses the amount and rejects zero, negative, or over-precise values.
    pub fn to_positive_decimal(&self, field: &str) -> Result<Decimal> {
        let value = match self {
            AmountInput::Number(n) => Decimal::from_f64(*n)
                .ok_or_else(|| Error::invalid(format!("'{}' is not a valid amount", field)))?,
            AmountInput::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(Error::missing(field));
                }
                Decimal::from_str(&trimmed.replace(',', "."))
                    .map_err(|_| Error::invalid(format!("'{}' is not a valid amount", field)))?
            }
        };
        if value <= Decimal::ZERO {
            return Err(Error::invalid(format!("'{}' must be greater than zero", field)));
        }
        if value.round_dp(DISPLAY_DECIMAL_PRECISION) != value {
            return Err(Error::invalid(format!(
                "'{}' cannot have more than {} decimals",
                field, DISPLAY_DECIMAL_PRECISION
            )));
        }
        Ok(value.round_dp(DISPLAY_DECIMAL_PRECISION))
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::Text(value.to_string())
    }
}

/// Converts a stored (or SQL-summed) floating value back to a 2-decimal amount.
pub fn decimal_from_db(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(DISPLAY_DECIMAL_PRECISION)
}

/// Converts an amount to the column representation.
pub fn decimal_to_db(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_string_amounts() {
        let amount = AmountInput::Text("150.50".to_string());
        assert_eq!(amount.to_positive_decimal("amount").unwrap(), dec!(150.50));
    }

    #[test]
    fn accepts_comma_decimal_separator() {
        let amount = AmountInput::Text("99,90".to_string());
        assert_eq!(amount.to_positive_decimal("amount").unwrap(), dec!(99.90));
    }

    #[test]
    fn parses_number_amounts() {
        let amount: AmountInput = serde_json::from_str("1200.5").unwrap();
        assert_eq!(amount.to_positive_decimal("amount").unwrap(), dec!(1200.5));
    }

    #[test]
    fn rejects_non_positive_and_garbage() {
        for raw in ["0", "-3", "abc", "  "] {
            let amount = AmountInput::Text(raw.to_string());
            assert!(amount.to_positive_decimal("amount").is_err(), "{raw}");
        }
    }

    #[test]
    fn rejects_sub_cent_precision() {
        let amount = AmountInput::Text("10.005".to_string());
        assert!(amount.to_positive_decimal("amount").is_err());
    }

    #[test]
    fn db_round_trip_keeps_cents() {
        let stored = decimal_to_db(dec!(150.50));
        assert_eq!(decimal_from_db(stored), dec!(150.50));
        assert_eq!(decimal_from_db(0.1 + 0.2), dec!(0.30));
    }
}
