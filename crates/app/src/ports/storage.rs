//! Storage port: repository traits for persistence.
//!
//! Implementations must make [`RentalRepository::open`] and
//! [`RentalRepository::complete`] atomic: the rental row and the car status
//! change commit together or not at all.

use std::future::Future;

use carrental_domain::car::{Car, NewCar};
use carrental_domain::error::CarRentalError;
use carrental_domain::id::{CarId, RentalId};
use carrental_domain::rental::{NewRental, Rental};

/// Repository for persisting and querying [`Car`]s.
pub trait CarRepository {
    /// Store a new car and return it with its assigned id.
    fn create(&self, car: NewCar) -> impl Future<Output = Result<Car, CarRentalError>> + Send;

    /// Get a car by its unique identifier.
    fn get_by_id(
        &self,
        id: CarId,
    ) -> impl Future<Output = Result<Option<Car>, CarRentalError>> + Send;

    /// Get all cars, ordered by ascending id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Car>, CarRentalError>> + Send;
}

/// Repository for persisting and querying [`Rental`]s.
pub trait RentalRepository {
    /// Get a rental by its unique identifier.
    fn get_by_id(
        &self,
        id: RentalId,
    ) -> impl Future<Output = Result<Option<Rental>, CarRentalError>> + Send;

    /// Get every rental of a car, ordered by ascending rental id.
    fn find_by_car(
        &self,
        car_id: CarId,
    ) -> impl Future<Output = Result<Vec<Rental>, CarRentalError>> + Send;

    /// Insert `rental` and move its car from available to rented, in one
    /// transaction.
    ///
    /// Fails with [`RuleViolation::CarNotAvailable`] when the car is not
    /// available at the time of the write.
    ///
    /// [`RuleViolation::CarNotAvailable`]: carrental_domain::error::RuleViolation::CarNotAvailable
    fn open(&self, rental: NewRental)
    -> impl Future<Output = Result<Rental, CarRentalError>> + Send;

    /// Mark the rental completed and make `car_id` available again, in one
    /// transaction, then return the stored rental.
    ///
    /// If the rental is already completed nothing is written. Fails with
    /// [`RuleViolation::CarMissingForRental`] when `car_id` does not exist.
    ///
    /// [`RuleViolation::CarMissingForRental`]: carrental_domain::error::RuleViolation::CarMissingForRental
    fn complete(
        &self,
        id: RentalId,
        car_id: CarId,
    ) -> impl Future<Output = Result<Rental, CarRentalError>> + Send;
}
