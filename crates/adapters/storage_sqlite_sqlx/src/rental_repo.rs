//! `SQLite` implementation of [`RentalRepository`].
//!
//! Opening and completing a rental each run in one transaction. The first
//! statement of each transaction is a write, so `SQLite` takes the writer lock
//! up front and concurrent callers queue behind it instead of racing on a
//! stale read. Rule violations roll back explicitly; any other early return
//! drops the transaction, which rolls it back.

use std::future::Future;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use carrental_app::ports::RentalRepository;
use carrental_domain::error::{CarRentalError, NotFoundError, RuleViolation};
use carrental_domain::id::{CarId, RentalId};
use carrental_domain::rental::{NewRental, Rental};

use crate::error::{StorageError, decode_error};

/// Wrapper for converting database rows into domain [`Rental`].
struct Wrapper(Rental);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Rental> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("rental_id")?;
        let car_id: i64 = row.try_get("car_id")?;
        let customer_name: String = row.try_get("customer_name")?;
        let start_date: String = row.try_get("start_date")?;
        let end_date: String = row.try_get("end_date")?;
        let completed: bool = row.try_get("completed")?;

        let start_date: NaiveDate = start_date.parse().map_err(decode_error)?;
        let end_date: NaiveDate = end_date.parse().map_err(decode_error)?;

        Ok(Self(Rental {
            id: RentalId::new(id),
            car_id: CarId::new(car_id),
            customer_name,
            start_date,
            end_date,
            completed,
        }))
    }
}

const SELECT_BY_ID: &str = "SELECT rental_id, car_id, customer_name, start_date, end_date, completed FROM rentals WHERE rental_id = ?";
const SELECT_BY_CAR: &str = "SELECT rental_id, car_id, customer_name, start_date, end_date, completed FROM rentals WHERE car_id = ? ORDER BY rental_id ASC";

const INSERT: &str = r"
    INSERT INTO rentals (car_id, customer_name, start_date, end_date, completed)
    VALUES (?, ?, ?, ?, 0)
    RETURNING rental_id, car_id, customer_name, start_date, end_date, completed
";

const MARK_CAR_RENTED: &str =
    "UPDATE cars SET status = 'RENTED' WHERE id = ? AND status = 'AVAILABLE'";
const MARK_CAR_AVAILABLE: &str = "UPDATE cars SET status = 'AVAILABLE' WHERE id = ?";
const MARK_COMPLETED: &str =
    "UPDATE rentals SET completed = 1 WHERE rental_id = ? AND completed = 0";

/// `SQLite`-backed rental repository.
#[derive(Clone)]
pub struct SqliteRentalRepository {
    pool: SqlitePool,
}

impl SqliteRentalRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RentalRepository for SqliteRentalRepository {
    fn get_by_id(
        &self,
        id: RentalId,
    ) -> impl Future<Output = Result<Option<Rental>, CarRentalError>> + Send {
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

    fn find_by_car(
        &self,
        car_id: CarId,
    ) -> impl Future<Output = Result<Vec<Rental>, CarRentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_CAR)
                .bind(car_id.get())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn open(
        &self,
        rental: NewRental,
    ) -> impl Future<Output = Result<Rental, CarRentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let claimed = sqlx::query(MARK_CAR_RENTED)
                .bind(rental.car_id().get())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            if claimed.rows_affected() == 0 {
                tx.rollback().await.map_err(StorageError::from)?;
                return Err(RuleViolation::CarNotAvailable.into());
            }

            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(rental.car_id().get())
                .bind(rental.customer_name())
                .bind(rental.start_date().to_string())
                .bind(rental.end_date().to_string())
                .fetch_one(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(row.0)
        }
    }

    fn complete(
        &self,
        id: RentalId,
        car_id: CarId,
    ) -> impl Future<Output = Result<Rental, CarRentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let marked = sqlx::query(MARK_COMPLETED)
                .bind(id.get())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            // Zero rows: unknown or already completed. Either way the car
            // belongs to whoever completed it first.
            if marked.rows_affected() > 0 {
                let released = sqlx::query(MARK_CAR_AVAILABLE)
                    .bind(car_id.get())
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
                if released.rows_affected() == 0 {
                    tx.rollback().await.map_err(StorageError::from)?;
                    return Err(RuleViolation::CarMissingForRental.into());
                }
            }

            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;

            Wrapper::maybe(row).ok_or_else(|| {
                NotFoundError {
                    entity: "Rental",
                    id: id.to_string(),
                }
                .into()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car_repo::SqliteCarRepository;
    use crate::pool::Config;
    use carrental_app::ports::CarRepository;
    use carrental_domain::car::{Car, CarStatus, NewCar};

    struct Fixture {
        cars: SqliteCarRepository,
        rentals: SqliteRentalRepository,
    }

    async fn setup_with(database_url: &str) -> Fixture {
        let db = Config {
            database_url: database_url.to_string(),
        }
        .build()
        .await
        .unwrap();
        Fixture {
            cars: SqliteCarRepository::new(db.pool().clone()),
            rentals: SqliteRentalRepository::new(db.pool().clone()),
        }
    }

    async fn setup() -> Fixture {
        setup_with("sqlite::memory:").await
    }

    impl Fixture {
        async fn car(&self) -> Car {
            self.cars
                .create(NewCar::new("Civic", 2020).unwrap())
                .await
                .unwrap()
        }

        async fn status(&self, id: CarId) -> CarStatus {
            self.cars.get_by_id(id).await.unwrap().unwrap().status
        }
    }

    /// On-disk database file, unique per test run and removed on drop.
    struct TempDbFile(std::path::PathBuf);

    impl TempDbFile {
        fn new(name: &str) -> Self {
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos();
            let path = std::env::temp_dir().join(format!(
                "carrental-{name}-{}-{nanos}.db",
                std::process::id()
            ));
            let file = Self(path);
            file.remove();
            file
        }

        fn url(&self) -> String {
            format!("sqlite:{}", self.0.display())
        }

        fn remove(&self) {
            for suffix in ["", "-wal", "-shm"] {
                let _ = std::fs::remove_file(format!("{}{suffix}", self.0.display()));
            }
        }
    }

    impl Drop for TempDbFile {
        fn drop(&mut self) {
            self.remove();
        }
    }

    fn new_rental(car_id: CarId, customer: &str) -> NewRental {
        NewRental::new(
            car_id,
            customer,
            "2024-01-01".parse().unwrap(),
            "2024-01-05".parse().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn should_insert_rental_and_rent_car_together() {
        let fx = setup().await;
        let car = fx.car().await;

        let rental = fx.rentals.open(new_rental(car.id, "Alice")).await.unwrap();

        assert_eq!(rental.car_id, car.id);
        assert_eq!(rental.customer_name, "Alice");
        assert_eq!(rental.start_date.to_string(), "2024-01-01");
        assert!(!rental.completed);
        assert_eq!(fx.status(car.id).await, CarStatus::Rented);

        let fetched = fx.rentals.get_by_id(rental.id).await.unwrap().unwrap();
        assert_eq!(fetched, rental);
    }

    #[tokio::test]
    async fn should_refuse_open_when_car_rented_and_leave_no_row() {
        let fx = setup().await;
        let car = fx.car().await;
        fx.rentals.open(new_rental(car.id, "Alice")).await.unwrap();

        let result = fx.rentals.open(new_rental(car.id, "Bob")).await;

        assert!(matches!(
            result,
            Err(CarRentalError::BadRequest(RuleViolation::CarNotAvailable))
        ));
        assert_eq!(fx.rentals.find_by_car(car.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_refuse_open_when_car_does_not_exist() {
        let fx = setup().await;

        let result = fx.rentals.open(new_rental(CarId::new(77), "Alice")).await;

        assert!(matches!(
            result,
            Err(CarRentalError::BadRequest(RuleViolation::CarNotAvailable))
        ));
    }

    #[tokio::test]
    async fn should_complete_rental_and_release_car_together() {
        let fx = setup().await;
        let car = fx.car().await;
        let rental = fx.rentals.open(new_rental(car.id, "Alice")).await.unwrap();

        let completed = fx.rentals.complete(rental.id, car.id).await.unwrap();

        assert!(completed.completed);
        assert_eq!(fx.status(car.id).await, CarStatus::Available);
    }

    #[tokio::test]
    async fn should_not_touch_car_when_rental_already_completed() {
        let fx = setup().await;
        let car = fx.car().await;
        let first = fx.rentals.open(new_rental(car.id, "Alice")).await.unwrap();
        fx.rentals.complete(first.id, car.id).await.unwrap();
        fx.rentals.open(new_rental(car.id, "Bob")).await.unwrap();

        let again = fx.rentals.complete(first.id, car.id).await.unwrap();

        assert!(again.completed);
        assert_eq!(fx.status(car.id).await, CarStatus::Rented);
    }

    #[tokio::test]
    async fn should_roll_back_completion_when_car_missing() {
        let fx = setup().await;
        let car = fx.car().await;
        let rental = fx.rentals.open(new_rental(car.id, "Alice")).await.unwrap();

        let result = fx.rentals.complete(rental.id, CarId::new(999)).await;

        assert!(matches!(
            result,
            Err(CarRentalError::BadRequest(RuleViolation::CarMissingForRental))
        ));
        let stored = fx.rentals.get_by_id(rental.id).await.unwrap().unwrap();
        assert!(!stored.completed);
    }

    #[tokio::test]
    async fn should_return_not_found_when_completing_unknown_rental() {
        let fx = setup().await;
        let car = fx.car().await;

        let result = fx.rentals.complete(RentalId::new(5), car.id).await;

        assert!(matches!(result, Err(CarRentalError::NotFound(_))));
        assert_eq!(fx.status(car.id).await, CarStatus::Available);
    }

    #[tokio::test]
    async fn should_list_rentals_for_car_by_ascending_id() {
        let fx = setup().await;
        let civic = fx.car().await;
        let golf = fx
            .cars
            .create(NewCar::new("Golf", 2019).unwrap())
            .await
            .unwrap();
        let first = fx.rentals.open(new_rental(civic.id, "Alice")).await.unwrap();
        fx.rentals.open(new_rental(golf.id, "Bob")).await.unwrap();
        fx.rentals.complete(first.id, civic.id).await.unwrap();
        let second = fx.rentals.open(new_rental(civic.id, "Carol")).await.unwrap();

        let rentals = fx.rentals.find_by_car(civic.id).await.unwrap();

        let ids: Vec<RentalId> = rentals.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert!(rentals[0].completed);
        assert!(!rentals[1].completed);
    }

    #[test]
    fn should_remove_database_file_when_temp_file_dropped() {
        let file = TempDbFile::new("cleanup");
        let path = file.0.clone();
        std::fs::write(&path, b"stale").unwrap();
        std::fs::write(format!("{}-wal", path.display()), b"stale").unwrap();

        drop(file);

        assert!(!path.exists());
        assert!(!std::path::Path::new(&format!("{}-wal", path.display())).exists());
    }

    #[tokio::test]
    async fn should_let_only_one_concurrent_open_win() {
        let db_file = TempDbFile::new("open-race");
        let url = db_file.url();
        let fx = setup_with(&url).await;
        let car = fx.car().await;

        let (a, b) = tokio::join!(
            fx.rentals.open(new_rental(car.id, "Alice")),
            fx.rentals.open(new_rental(car.id, "Bob")),
        );

        let outcomes = [a, b];
        let won = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(won, 1);
        assert!(outcomes.iter().any(|r| matches!(
            r,
            Err(CarRentalError::BadRequest(RuleViolation::CarNotAvailable))
        )));
        assert_eq!(fx.rentals.find_by_car(car.id).await.unwrap().len(), 1);
        assert_eq!(fx.status(car.id).await, CarStatus::Rented);
    }
}
