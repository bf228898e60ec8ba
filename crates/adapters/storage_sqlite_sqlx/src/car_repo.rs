//! `SQLite` implementation of [`CarRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use carrental_app::ports::CarRepository;
use carrental_domain::car::{Car, CarStatus, NewCar};
use carrental_domain::error::CarRentalError;
use carrental_domain::id::CarId;

use crate::error::{StorageError, decode_error};

/// Wrapper for converting database rows into domain [`Car`].
struct Wrapper(Car);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Car> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let model: String = row.try_get("model")?;
        let year: i32 = row.try_get("year")?;
        let status: String = row.try_get("status")?;

        let status: CarStatus = status.parse().map_err(decode_error)?;

        Ok(Self(Car {
            id: CarId::new(id),
            model,
            year,
            status,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO cars (model, year, status) VALUES (?, ?, ?)
    RETURNING id, model, year, status
";
const SELECT_BY_ID: &str = "SELECT id, model, year, status FROM cars WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, model, year, status FROM cars ORDER BY id ASC";

/// `SQLite`-backed car repository.
#[derive(Clone)]
pub struct SqliteCarRepository {
    pool: SqlitePool,
}

impl SqliteCarRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CarRepository for SqliteCarRepository {
    fn create(&self, car: NewCar) -> impl Future<Output = Result<Car, CarRentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(car.model())
                .bind(car.year())
                .bind(CarStatus::Available.as_str())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get_by_id(
        &self,
        id: CarId,
    ) -> impl Future<Output = Result<Option<Car>, CarRentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Car>, CarRentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
