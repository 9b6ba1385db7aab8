use crate::errors::Result;
use crate::hotels::hotels_model::{Hotel, HotelUpdate, NewHotel};
use async_trait::async_trait;

/// Trait for hotel repository operations
#[async_trait]
pub trait HotelRepositoryTrait: Send + Sync {
    fn get_hotels(&self, city: Option<&str>) -> Result<Vec<Hotel>>;
    fn get_hotel(&self, hotel_id: &str) -> Result<Hotel>;
    /// Number of programs linked to the hotel.
    fn count_program_references(&self, hotel_id: &str) -> Result<i64>;
    async fn create_hotel(&self, new_hotel: NewHotel) -> Result<Hotel>;
    async fn update_hotel(&self, hotel_update: HotelUpdate) -> Result<Hotel>;
    async fn delete_hotel(&self, hotel_id: String) -> Result<usize>;
}

/// Trait for hotel service operations
#[async_trait]
pub trait HotelServiceTrait: Send + Sync {
    fn get_hotels(&self, city: Option<&str>) -> Result<Vec<Hotel>>;
    fn get_hotel(&self, hotel_id: &str) -> Result<Hotel>;
    async fn create_hotel(&self, new_hotel: NewHotel) -> Result<Hotel>;
    async fn update_hotel(&self, hotel_update: HotelUpdate) -> Result<Hotel>;
    async fn delete_hotel(&self, hotel_id: &str) -> Result<()>;
}
