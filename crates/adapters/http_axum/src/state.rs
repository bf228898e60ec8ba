//! Shared application state for axum handlers.

use std::sync::Arc;

use carrental_app::ports::{CarRepository, RentalRepository};
use carrental_app::services::car_service::CarService;
use carrental_app::services::rental_service::RentalService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<CR, RR> {
    /// Car CRUD service.
    pub car_service: Arc<CarService<CR>>,
    /// Rental lifecycle service.
    pub rental_service: Arc<RentalService<RR, CR>>,
}

impl<CR, RR> Clone for AppState<CR, RR> {
    fn clone(&self) -> Self {
        Self {
            car_service: Arc::clone(&self.car_service),
            rental_service: Arc::clone(&self.rental_service),
        }
    }
}

impl<CR, RR> AppState<CR, RR>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(car_service: CarService<CR>, rental_service: RentalService<RR, CR>) -> Self {
        Self {
            car_service: Arc::new(car_service),
            rental_service: Arc::new(rental_service),
        }
    }
}
