//! Car: a rentable vehicle with a binary availability status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CarRentalError, RuleViolation, ValidationError};
use crate::id::CarId;

/// Maximum length of [`Car::model`], in characters.
pub const MODEL_MAX_LEN: usize = 120;
/// Earliest accepted model year.
pub const MIN_YEAR: i32 = 1886;
/// Latest accepted model year.
pub const MAX_YEAR: i32 = 2100;

/// Whether a car can currently be rented.
///
/// A car is [`Rented`](Self::Rented) exactly while one of its rentals is
/// not completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CarStatus {
    #[default]
    Available,
    Rented,
}

impl CarStatus {
    /// Canonical upper-case name, as stored and serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Rented => "RENTED",
        }
    }

    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored status string is neither `AVAILABLE` nor `RENTED`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown car status {0:?}")]
pub struct UnknownCarStatus(pub String);

impl FromStr for CarStatus {
    type Err = UnknownCarStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "RENTED" => Ok(Self::Rented),
            other => Err(UnknownCarStatus(other.to_string())),
        }
    }
}

/// A stored car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub model: String,
    pub year: i32,
    pub status: CarStatus,
}

impl Car {
    /// Check that this car can take a new rental.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::CarNotAvailable`] when the car is rented.
    pub fn ensure_available(&self) -> Result<(), CarRentalError> {
        if self.status.is_available() {
            Ok(())
        } else {
            Err(RuleViolation::CarNotAvailable.into())
        }
    }
}

/// A car that has not been stored yet. The store assigns its id and it
/// always starts [`CarStatus::Available`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    model: String,
    year: i32,
}

impl NewCar {
    /// Validate the input shape and build a new car.
    ///
    /// # Errors
    ///
    /// Returns [`CarRentalError::Validation`] when `model` is empty or longer
    /// than [`MODEL_MAX_LEN`] characters, or when `year` falls outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(model: impl Into<String>, year: i32) -> Result<Self, CarRentalError> {
        let model = model.into();
        let len = model.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyModel.into());
        }
        if len > MODEL_MAX_LEN {
            return Err(ValidationError::ModelTooLong {
                len,
                max: MODEL_MAX_LEN,
            }
            .into());
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::YearOutOfRange {
                year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            }
            .into());
        }
        Ok(Self { model, year })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Attach the id assigned by the store.
    #[must_use]
    pub fn into_car(self, id: CarId) -> Car {
        Car {
            id,
            model: self.model,
            year: self.year,
            status: CarStatus::Available,
        }
    }
}
