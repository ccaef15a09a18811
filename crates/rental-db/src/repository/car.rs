//! # Car Repository
//!
//! The catalog store: cars, their daily rate and availability.
//!
//! ## Status Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cars.status is written in exactly two places, both in booking.rs:     │
//! │                                                                         │
//! │    book()        available ──► booked      (same txn as INSERT booking) │
//! │    return_car()  booked    ──► available   (same txn as UPDATE booking) │
//! │                                                                         │
//! │  This repository only creates cars and reads them.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use rental_core::validation::validate_new_car;
use rental_core::{Car, CarStatus, NewCar};

/// Column list shared by every car SELECT.
pub(crate) const CAR_COLUMNS: &str = r#"
    id,
    brand,
    model_name,
    price_per_day_cents,
    status,
    created_at,
    updated_at,
    version
"#;

/// Repository for car database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CarRepository::new(pool);
///
/// let available = repo.list_available().await?;
/// let car = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    /// Creates a new CarRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CarRepository { pool }
    }

    /// Lists cars that can be booked right now, ordered by brand and model.
    pub async fn list_available(&self) -> DbResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE status = ?1 ORDER BY brand, model_name, id"
        ))
        .bind(CarStatus::Available)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = cars.len(), "Listed available cars");
        Ok(cars)
    }

    /// Gets a car by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Car))` - Car found
    /// * `Ok(None)` - Car not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    /// Adds a car to the catalog. New cars are always Available.
    ///
    /// ## Returns
    /// * `Ok(Car)` - Inserted car with generated id and timestamps
    /// * `Err(DbError::Invalid)` - Input failed validation
    pub async fn insert(&self, new_car: &NewCar) -> DbResult<Car> {
        validate_new_car(new_car)?;

        let now = Utc::now();
        let car = Car {
            id: generate_car_id(),
            brand: new_car.brand.trim().to_string(),
            model_name: new_car.model_name.trim().to_string(),
            price_per_day_cents: new_car.price_per_day.cents(),
            status: CarStatus::Available,
            created_at: now,
            updated_at: now,
            version: 0,
        };

        debug!(id = %car.id, brand = %car.brand, model = %car.model_name, "Inserting car");

        sqlx::query(
            r#"
            INSERT INTO cars (
                id, brand, model_name, price_per_day_cents,
                status, created_at, updated_at, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&car.id)
        .bind(&car.brand)
        .bind(&car.model_name)
        .bind(car.price_per_day_cents)
        .bind(car.status)
        .bind(car.created_at)
        .bind(car.updated_at)
        .bind(car.version)
        .execute(&self.pool)
        .await?;

        Ok(car)
    }

    /// Counts cars in a given status (for diagnostics and seeding).
    pub async fn count_by_status(&self, status: CarStatus) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars WHERE status = ?1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts all cars.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new car ID.
pub fn generate_car_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::test_support::{memory_db, new_car};
    use rental_core::Money;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = memory_db().await;
        let car = db.cars().insert(&new_car("Toyota", "Corolla", 4550)).await.unwrap();

        let fetched = db.cars().get_by_id(&car.id).await.unwrap().unwrap();
        assert_eq!(fetched.brand, "Toyota");
        assert_eq!(fetched.model_name, "Corolla");
        assert_eq!(fetched.price_per_day(), Money::from_cents(4550));
        assert_eq!(fetched.status, CarStatus::Available);
        assert!(fetched.is_available());
        assert_eq!(fetched.version, 0);
    }

    #[tokio::test]
    async fn test_get_missing_car() {
        let db = memory_db().await;
        assert!(db.cars().get_by_id("no-such-car").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_negative_price() {
        let db = memory_db().await;
        let err = db.cars().insert(&new_car("Ford", "Focus", -1)).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
        assert_eq!(db.cars().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_available_is_sorted_and_filtered() {
        let db = memory_db().await;
        db.cars().insert(&new_car("Toyota", "Yaris", 3000)).await.unwrap();
        db.cars().insert(&new_car("Honda", "Civic", 4000)).await.unwrap();
        let booked = db.cars().insert(&new_car("Audi", "A3", 9000)).await.unwrap();

        sqlx::query("UPDATE cars SET status = 'booked' WHERE id = ?1")
            .bind(&booked.id)
            .execute(db.pool())
            .await
            .unwrap();

        let available = db.cars().list_available().await.unwrap();
        let names: Vec<_> = available.iter().map(|c| c.brand.as_str()).collect();
        assert_eq!(names, ["Honda", "Toyota"]);

        assert_eq!(db.cars().count_by_status(CarStatus::Booked).await.unwrap(), 1);
        assert_eq!(db.cars().count_by_status(CarStatus::Available).await.unwrap(), 2);
    }
}
