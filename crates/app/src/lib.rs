//! # carrental-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CarRepository`: create, get, list cars
//!   - `RentalRepository`: get and list rentals, atomically open and complete them
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CarService`: create, list, get
//!   - `RentalService`: open a rental for a car, complete it
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `carrental-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
