//! Program domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Travel package (Omra trip) with its deadlines and hotels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub name: String,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub visa_deadline: Option<NaiveDate>,
    pub hotel_deadline: Option<NaiveDate>,
    pub flight_deadline: Option<NaiveDate>,
    pub hotel_ids: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new program
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewProgram {
    pub name: String,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub visa_deadline: Option<NaiveDate>,
    pub hotel_deadline: Option<NaiveDate>,
    pub flight_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub hotel_ids: Vec<String>,
}

/// Input model for updating a program. Hotel links are replaced as a whole.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgramUpdate {
    pub id: Option<String>,
    pub name: String,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub visa_deadline: Option<NaiveDate>,
    pub hotel_deadline: Option<NaiveDate>,
    pub flight_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub hotel_ids: Vec<String>,
}

fn validate_program(
    name: &str,
    departure_date: Option<NaiveDate>,
    return_date: Option<NaiveDate>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::missing("name"));
    }
    if let (Some(departure), Some(ret)) = (departure_date, return_date) {
        if ret < departure {
            return Err(Error::invalid("Return date cannot be before departure date"));
        }
    }
    Ok(())
}

fn dedup_ids(ids: &mut Vec<String>) {
    ids.iter_mut().for_each(|id| *id = id.trim().to_string());
    ids.retain(|id| !id.is_empty());
    ids.sort();
    ids.dedup();
}

impl NewProgram {
    pub fn validate(&mut self) -> Result<()> {
        validate_program(&self.name, self.departure_date, self.return_date)?;
        self.name = self.name.trim().to_string();
        dedup_ids(&mut self.hotel_ids);
        Ok(())
    }
}

impl ProgramUpdate {
    pub fn validate(&mut self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(Error::missing("id"));
        }
        validate_program(&self.name, self.departure_date, self.return_date)?;
        self.name = self.name.trim().to_string();
        dedup_ids(&mut self.hotel_ids);
        Ok(())
    }
}
