use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::hotels_model::{Hotel, HotelUpdate, NewHotel};
use super::hotels_traits::{HotelRepositoryTrait, HotelServiceTrait};
use crate::errors::{Error, Result};

pub struct HotelService {
    repository: Arc<dyn HotelRepositoryTrait>,
}

impl HotelService {
    pub fn new(repository: Arc<dyn HotelRepositoryTrait>) -> Self {
        HotelService { repository }
    }
}

#[async_trait]
impl HotelServiceTrait for HotelService {
    fn get_hotels(&self, city: Option<&str>) -> Result<Vec<Hotel>> {
        let city = city.map(str::trim).filter(|c| !c.is_empty());
        self.repository.get_hotels(city)
    }

    fn get_hotel(&self, hotel_id: &str) -> Result<Hotel> {
        self.repository.get_hotel(hotel_id)
    }

    async fn create_hotel(&self, mut new_hotel: NewHotel) -> Result<Hotel> {
        new_hotel.validate()?;
        debug!("Creating hotel {} in {}", new_hotel.name, new_hotel.city);
        self.repository.create_hotel(new_hotel).await
    }

    async fn update_hotel(&self, mut hotel_update: HotelUpdate) -> Result<Hotel> {
        hotel_update.validate()?;
        self.repository.update_hotel(hotel_update).await
    }

    /// Deletes a hotel unless a program still points at it.
    async fn delete_hotel(&self, hotel_id: &str) -> Result<()> {
        let references = self.repository.count_program_references(hotel_id)?;
        if references > 0 {
            return Err(Error::ConstraintViolation(format!(
                "Hotel is used by {} program(s) and cannot be deleted",
                references
            )));
        }
        let deleted = self.repository.delete_hotel(hotel_id.to_string()).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Hotel {}", hotel_id)));
        }
        info!("Deleted hotel {}", hotel_id);
        Ok(())
    }
}
