//! Rental service: opening and completing rentals.
//!
//! A car is rented exactly while it has an open rental. Both transitions go
//! through a single atomic [`RentalRepository`] call so that the rental row
//! and the car status never disagree.

use chrono::NaiveDate;

use carrental_domain::car::Car;
use carrental_domain::error::{CarRentalError, NotFoundError, RuleViolation};
use carrental_domain::id::{CarId, RentalId};
use carrental_domain::rental::{NewRental, Rental};

use crate::ports::{CarRepository, RentalRepository};

/// Application service for the rental lifecycle.
pub struct RentalService<RR, CR> {
    rentals: RR,
    cars: CR,
}

impl<RR, CR> RentalService<RR, CR>
where
    RR: RentalRepository,
    CR: CarRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(rentals: RR, cars: CR) -> Self {
        Self { rentals, cars }
    }

    /// Open a rental for `car` and mark the car rented.
    ///
    /// The date range is checked before availability, so a caller violating
    /// both always sees the date error.
    ///
    /// # Errors
    ///
    /// Returns [`CarRentalError::Validation`] if `customer_name` is out of
    /// shape, [`RuleViolation::EndBeforeStart`] if `end_date < start_date`,
    /// [`RuleViolation::CarNotAvailable`] if the car is already rented, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, car, customer_name), fields(car_id = %car.id))]
    pub async fn create_rental_for_car(
        &self,
        car: &Car,
        customer_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Rental, CarRentalError> {
        let rental = NewRental::new(car.id, customer_name, start_date, end_date)?;
        car.ensure_available()?;

        let rental = self.rentals.open(rental).await?;
        tracing::info!(rental_id = %rental.id, "rental opened, car rented");
        Ok(rental)
    }

    /// Complete a rental and make its car available again.
    ///
    /// Completing an already completed rental returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CarRentalError::NotFound`] when no rental with `id` exists,
    /// [`RuleViolation::CarMissingForRental`] when the referenced car is gone,
    /// or a storage error propagated from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn complete_rental(&self, id: RentalId) -> Result<Rental, CarRentalError> {
        let rental = self.get_rental(id).await?;
        if rental.completed {
            tracing::debug!("rental already completed");
            return Ok(rental);
        }

        let car = self
            .cars
            .get_by_id(rental.car_id)
            .await?
            .ok_or(RuleViolation::CarMissingForRental)?;

        let rental = self.rentals.complete(rental.id, car.id).await?;
        tracing::info!(car_id = %car.id, "rental completed, car available");
        Ok(rental)
    }

    /// Look up a rental by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CarRentalError::NotFound`] when no rental with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_rental(&self, id: RentalId) -> Result<Rental, CarRentalError> {
        self.rentals.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Rental",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List every rental of a car, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rentals_for_car(&self, car_id: CarId) -> Result<Vec<Rental>, CarRentalError> {
        self.rentals.find_by_car(car_id).await
    }
}
