//! Car service: use-cases for managing cars.

use carrental_domain::car::{Car, NewCar};
use carrental_domain::error::{CarRentalError, NotFoundError};
use carrental_domain::id::CarId;

use crate::ports::CarRepository;

/// Application service for creating and looking up cars.
pub struct CarService<R> {
    repo: R,
}

impl<R: CarRepository> CarService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Store a new, available car.
    ///
    /// # Errors
    ///
    /// Returns [`CarRentalError::Validation`] if `model` or `year` is out of
    /// shape, or a storage error propagated from the repository.
    #[tracing::instrument(skip(self, model), fields(model = tracing::field::Empty))]
    pub async fn create_car(
        &self,
        model: impl Into<String>,
        year: i32,
    ) -> Result<Car, CarRentalError> {
        let car = NewCar::new(model, year)?;
        tracing::Span::current().record("model", car.model());
        let car = self.repo.create(car).await?;
        tracing::info!(car_id = %car.id, "car created");
        Ok(car)
    }

    /// List all cars by ascending id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_cars(&self) -> Result<Vec<Car>, CarRentalError> {
        self.repo.get_all().await
    }

    /// Look up a car by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CarRentalError::NotFound`] when no car with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_car(&self, id: CarId) -> Result<Car, CarRentalError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Car",
                id: id.to_string(),
            }
            .into()
        })
    }
}
