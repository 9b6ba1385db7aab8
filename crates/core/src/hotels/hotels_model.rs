//! Hotel domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Domain model representing a hotel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new hotel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHotel {
    pub name: String,
    pub city: String,
    pub location: Option<String>,
}

/// Input model for updating a hotel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelUpdate {
    pub id: Option<String>,
    pub name: String,
    pub city: String,
    pub location: Option<String>,
}

fn clean_fields(name: &mut String, city: &mut String, location: &mut Option<String>) -> Result<()> {
    *name = name.trim().to_string();
    *city = city.trim().to_string();
    if name.is_empty() {
        return Err(Error::missing("name"));
    }
    if city.is_empty() {
        return Err(Error::missing("city"));
    }
    *location = location
        .take()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    Ok(())
}

impl NewHotel {
    pub fn validate(&mut self) -> Result<()> {
        clean_fields(&mut self.name, &mut self.city, &mut self.location)
    }
}

impl HotelUpdate {
    pub fn validate(&mut self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(Error::missing("id"));
        }
        clean_fields(&mut self.name, &mut self.city, &mut self.location)
    }
}
