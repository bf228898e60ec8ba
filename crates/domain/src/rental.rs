//! Rental: a booking of one car by one customer over a date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CarRentalError, RuleViolation, ValidationError};
use crate::id::{CarId, RentalId};

/// Maximum length of [`Rental::customer_name`], in characters.
pub const CUSTOMER_NAME_MAX_LEN: usize = 120;

/// A stored rental.
///
/// `completed` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    #[serde(rename = "rental_id")]
    pub id: RentalId,
    pub car_id: CarId,
    pub customer_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub completed: bool,
}

/// A rental that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRental {
    car_id: CarId,
    customer_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl NewRental {
    /// Validate the input and build a new, open rental for `car_id`.
    ///
    /// The customer name is checked first, then the date range.
    ///
    /// # Errors
    ///
    /// Returns [`CarRentalError::Validation`] when `customer_name` is empty or
    /// longer than [`CUSTOMER_NAME_MAX_LEN`] characters, and
    /// [`RuleViolation::EndBeforeStart`] when `end_date < start_date`.
    pub fn new(
        car_id: CarId,
        customer_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, CarRentalError> {
        let customer_name = customer_name.into();
        let len = customer_name.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyCustomerName.into());
        }
        if len > CUSTOMER_NAME_MAX_LEN {
            return Err(ValidationError::CustomerNameTooLong {
                len,
                max: CUSTOMER_NAME_MAX_LEN,
            }
            .into());
        }
        if end_date < start_date {
            return Err(RuleViolation::EndBeforeStart.into());
        }
        Ok(Self {
            car_id,
            customer_name,
            start_date,
            end_date,
        })
    }

    #[must_use]
    pub fn car_id(&self) -> CarId {
        self.car_id
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Attach the id assigned by the store.
    #[must_use]
    pub fn into_rental(self, id: RentalId) -> Rental {
        Rental {
            id,
            car_id: self.car_id,
            customer_name: self.customer_name,
            start_date: self.start_date,
            end_date: self.end_date,
            completed: false,
        }
    }
}
