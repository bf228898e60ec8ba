//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod cars;
#[allow(clippy::missing_errors_doc)]
pub mod rentals;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post};

use carrental_app::ports::{CarRepository, RentalRepository};
use carrental_domain::error::{CarRentalError, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<CR, RR>() -> Router<AppState<CR, RR>>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    Router::new()
        // Cars
        .route(
            "/cars",
            get(cars::list::<CR, RR>).post(cars::create::<CR, RR>),
        )
        .route("/cars/{id}", get(cars::get::<CR, RR>))
        .route(
            "/cars/{id}/rentals",
            get(rentals::list_for_car::<CR, RR>).post(rentals::create_for_car::<CR, RR>),
        )
        // Rentals
        .route("/rentals/{id}", get(rentals::get::<CR, RR>))
        .route(
            "/rentals/{id}/complete",
            post(rentals::complete::<CR, RR>),
        )
}

/// Parse a path segment into a typed id.
fn parse_id<T: FromStr>(entity: &'static str, raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(CarRentalError::Validation(ValidationError::InvalidId {
            entity,
            raw: raw.to_string(),
        }))
    })
}
