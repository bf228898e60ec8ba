//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CarRentalError`] via `#[from]`. Callers map the variants to transport
//! responses; the display text of [`NotFoundError`] and [`RuleViolation`] is
//! meant to be passed through verbatim.

/// Top-level error returned by every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CarRentalError {
    /// Input does not have the expected shape (empty name, year out of range, …).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A rental rule was violated.
    #[error(transparent)]
    BadRequest(#[from] RuleViolation),

    /// The storage layer failed. Not classified further by the core.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input-shape violations, rejected before any rule is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("model must not be empty")]
    EmptyModel,

    #[error("model must be at most {max} characters, got {len}")]
    ModelTooLong { len: usize, max: usize },

    #[error("year must be between {min} and {max}, got {year}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("customer_name must not be empty")]
    EmptyCustomerName,

    #[error("customer_name must be at most {max} characters, got {len}")]
    CustomerNameTooLong { len: usize, max: usize },

    #[error("invalid {entity} id {raw:?}")]
    InvalidId { entity: &'static str, raw: String },
}

/// A record looked up by id does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    /// Kind of record, e.g. `"Car"`.
    pub entity: &'static str,
    pub id: String,
}

/// Domain rules the rental lifecycle enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("end_date must be >= start_date")]
    EndBeforeStart,

    #[error("car is not available")]
    CarNotAvailable,

    /// The car referenced by an open rental is gone.
    #[error("car not found for this rental")]
    CarMissingForRental,
}
