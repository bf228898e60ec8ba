//! # carrental-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `carrental-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle (open on startup, close on shutdown)
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Run every multi-row change in a single transaction
//!
//! ## Dependency rule
//! Depends on `carrental-app` (for port traits) and `carrental-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod car_repo;
mod error;
mod pool;
mod rental_repo;

pub use car_repo::SqliteCarRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use rental_repo::SqliteRentalRepository;
