//! # carrental-domain
//!
//! Pure domain model for the carrental booking backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Cars** (rentable vehicles with an availability status)
//! - Define **Rentals** (a booking of one car by one customer over a date range)
//! - Contain all invariant enforcement: input shape, date ranges, availability
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod car;
pub mod rental;
