//! # Booking Repository
//!
//! The booking engine, the return engine and the admin report.
//!
//! ## Booking Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  book(&BookingRequest)                                                  │
//! │                                                                         │
//! │  RentalPeriod::parse(start, end)   ← date errors, no store access       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────── SINGLE TRANSACTION ──────────────────────┐   │
//! │  │                                                                  │   │
//! │  │  1. UPDATE cars SET status = 'booked'                            │   │
//! │  │     WHERE id = ? AND status = 'available'                        │   │
//! │  │     RETURNING price_per_day_cents     ← takes the write lock     │   │
//! │  │        │                                                         │   │
//! │  │        ├── 0 rows ──► CarNotFound / CarUnavailable (rollback)    │   │
//! │  │        ▼                                                         │   │
//! │  │  2. total = days × price (checked)                               │   │
//! │  │        │                                                         │   │
//! │  │        ▼                                                         │   │
//! │  │  3. INSERT INTO bookings (... 'confirmed')                       │   │
//! │  │        │                                                         │   │
//! │  │        ├── FK user_id ──► UserNotFound (rollback)                │   │
//! │  │        ▼                                                         │   │
//! │  │  COMMIT                                                          │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Whole unit bounded by DbConfig::transaction_timeout.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrent Bookings
//! ```text
//! Request A                          Request B
//!    │ BEGIN                            │ BEGIN
//!    │ UPDATE cars ... 1 row            │ UPDATE cars ... (waits, busy_timeout)
//!    │ INSERT booking                   │
//!    │ COMMIT ─────────────────────────►│ UPDATE sees status='booked', 0 rows
//!    ▼                                  ▼
//!  Ok(Booking)                     Err(CarUnavailable)
//! ```
//!
//! The conditional UPDATE is the first statement so the write lock is taken
//! before anything is read. A partial unique index on
//! `bookings(car_id) WHERE status = 'confirmed'` backs this up in the schema.

use std::time::Duration;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rental_core::rental::RentalPeriod;
use rental_core::{
    Booking, BookingError, BookingRequest, BookingResult, BookingStatus, BookingSummary,
    CarStatus, Money, ReturnAck, ReturnRequest,
};

const BOOKING_COLUMNS: &str = r#"
    id,
    user_id,
    car_id,
    start_date,
    end_date,
    total_cents,
    status,
    created_at,
    completed_at
"#;

/// Repository for bookings.
///
/// ## Usage
/// ```rust,ignore
/// let bookings = db.bookings();
///
/// let booking = bookings.book(&request).await?;
/// let ack = bookings.return_car(&ReturnRequest {
///     booking_id: booking.id.clone(),
///     car_id: booking.car_id.clone(),
/// }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
    transaction_timeout: Duration,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool, transaction_timeout: Duration) -> Self {
        BookingRepository {
            pool,
            transaction_timeout,
        }
    }

    // =========================================================================
    // Booking Engine
    // =========================================================================

    /// Books a car for `[start_date, end_date)`.
    ///
    /// ## Returns
    /// * `Ok(Booking)` - Confirmed booking; the car is now Booked
    /// * `Err(InvalidDateFormat | InvalidDateRange)` - Nothing was read or written
    /// * `Err(CarNotFound | CarUnavailable | UserNotFound)` - Rolled back
    /// * `Err(TransactionTimeout)` - Could not finish in time; retryable
    pub async fn book(&self, request: &BookingRequest) -> BookingResult<Booking> {
        let period = RentalPeriod::parse(&request.start_date, &request.end_date)?;

        let outcome =
            tokio::time::timeout(self.transaction_timeout, self.book_in_txn(request, period)).await;

        match outcome {
            Ok(Ok(booking)) => {
                info!(
                    booking_id = %booking.id,
                    car_id = %booking.car_id,
                    user_id = %booking.user_id,
                    days = period.days(),
                    total = %booking.total(),
                    "Booking confirmed"
                );
                Ok(booking)
            }
            Ok(Err(err)) => {
                warn!(car_id = %request.car_id, user_id = %request.user_id, error = %err, "Booking rejected");
                Err(err)
            }
            Err(_) => {
                warn!(
                    car_id = %request.car_id,
                    timeout_ms = self.transaction_timeout.as_millis() as u64,
                    "Booking transaction timed out"
                );
                Err(DbError::TransactionTimeout(self.transaction_timeout).into())
            }
        }
    }

    async fn book_in_txn(
        &self,
        request: &BookingRequest,
        period: RentalPeriod,
    ) -> BookingResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let now = Utc::now();

        let price_cents: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE cars
            SET status = ?1, version = version + 1, updated_at = ?2
            WHERE id = ?3 AND status = ?4
            RETURNING price_per_day_cents
            "#,
        )
        .bind(CarStatus::Booked)
        .bind(now)
        .bind(&request.car_id)
        .bind(CarStatus::Available)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let Some(price_cents) = price_cents else {
            let status: Option<CarStatus> =
                sqlx::query_scalar("SELECT status FROM cars WHERE id = ?1")
                    .bind(&request.car_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(DbError::from)?;

            return Err(match status {
                None => BookingError::CarNotFound(request.car_id.clone()),
                Some(_) => BookingError::CarUnavailable(request.car_id.clone()),
            });
        };

        let quote = period.quote(Money::from_cents(price_cents))?;
        debug!(days = quote.days, total = %quote.total, "Quoted rental");

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            user_id: request.user_id.clone(),
            car_id: request.car_id.clone(),
            start_date: period.start(),
            end_date: period.end(),
            total_cents: quote.total.cents(),
            status: BookingStatus::Confirmed,
            created_at: now,
            completed_at: None,
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO bookings (
                id, user_id, car_id, start_date, end_date,
                total_cents, status, created_at, completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.user_id)
        .bind(&booking.car_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_cents)
        .bind(booking.status)
        .bind(booking.created_at)
        .bind(booking.completed_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            return Err(match DbError::from(e) {
                // car_id was just locked above, so the dangling key is the user
                DbError::ForeignKeyViolation { .. } => {
                    BookingError::UserNotFound(request.user_id.clone())
                }
                err if err.is_unique_violation_on("bookings.car_id") => {
                    BookingError::CarUnavailable(request.car_id.clone())
                }
                err => err.into(),
            });
        }

        tx.commit().await.map_err(DbError::from)?;
        Ok(booking)
    }

    // =========================================================================
    // Return Engine
    // =========================================================================

    /// Completes a Confirmed booking and makes its car Available again.
    ///
    /// ## Returns
    /// * `Ok(ReturnAck)` - Both rows updated together
    /// * `Err(BookingNotFound | CarNotFound)` - Dangling reference
    /// * `Err(BookingCarMismatch)` - The booking is for another car
    /// * `Err(InvalidStateTransition)` - Booking already Completed
    /// * `Err(TransactionTimeout)` - Could not finish in time; retryable
    pub async fn return_car(&self, request: &ReturnRequest) -> BookingResult<ReturnAck> {
        let outcome =
            tokio::time::timeout(self.transaction_timeout, self.return_in_txn(request)).await;

        match outcome {
            Ok(Ok(ack)) => {
                info!(booking_id = %ack.booking_id, car_id = %ack.car_id, "Car returned");
                Ok(ack)
            }
            Ok(Err(err)) => {
                warn!(booking_id = %request.booking_id, car_id = %request.car_id, error = %err, "Return rejected");
                Err(err)
            }
            Err(_) => {
                warn!(
                    booking_id = %request.booking_id,
                    timeout_ms = self.transaction_timeout.as_millis() as u64,
                    "Return transaction timed out"
                );
                Err(DbError::TransactionTimeout(self.transaction_timeout).into())
            }
        }
    }

    async fn return_in_txn(&self, request: &ReturnRequest) -> BookingResult<ReturnAck> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let now = Utc::now();

        let completed = sqlx::query(
            r#"
            UPDATE bookings
            SET status = ?1, completed_at = ?2
            WHERE id = ?3 AND car_id = ?4 AND status = ?5
            "#,
        )
        .bind(BookingStatus::Completed)
        .bind(now)
        .bind(&request.booking_id)
        .bind(&request.car_id)
        .bind(BookingStatus::Confirmed)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?
        .rows_affected();

        if completed == 0 {
            return Err(explain_rejected_return(&mut *tx, request).await?);
        }

        let freed = sqlx::query(
            r#"
            UPDATE cars
            SET status = ?1, version = version + 1, updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(CarStatus::Available)
        .bind(now)
        .bind(&request.car_id)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?
        .rows_affected();

        if freed == 0 {
            return Err(BookingError::CarNotFound(request.car_id.clone()));
        }

        tx.commit().await.map_err(DbError::from)?;

        Ok(ReturnAck {
            booking_id: request.booking_id.clone(),
            car_id: request.car_id.clone(),
            completed_at: now,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lists every Confirmed booking with its renter and car, by start date.
    pub async fn admin_report(&self) -> DbResult<Vec<BookingSummary>> {
        let rows = sqlx::query_as::<_, BookingSummary>(
            r#"
            SELECT
                b.id AS booking_id,
                b.car_id,
                b.start_date,
                b.end_date,
                b.total_cents,
                u.full_name,
                c.brand,
                c.model_name
            FROM bookings b
            JOIN users u ON u.id = b.user_id
            JOIN cars c ON c.id = b.car_id
            WHERE b.status = ?1
            ORDER BY b.start_date, b.created_at, b.id
            "#,
        )
        .bind(BookingStatus::Confirmed)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Built admin report");
        Ok(rows)
    }

    /// Gets a booking by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }
}

/// Works out why the completing UPDATE matched nothing.
///
/// Checked in order: booking exists, car exists, booking is for that car,
/// booking can still move to Completed.
async fn explain_rejected_return(
    conn: &mut SqliteConnection,
    request: &ReturnRequest,
) -> DbResult<BookingError> {
    let booking: Option<(String, BookingStatus)> =
        sqlx::query_as("SELECT car_id, status FROM bookings WHERE id = ?1")
            .bind(&request.booking_id)
            .fetch_optional(&mut *conn)
            .await?;

    let Some((booked_car_id, status)) = booking else {
        return Ok(BookingError::BookingNotFound(request.booking_id.clone()));
    };

    let car_exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM cars WHERE id = ?1")
        .bind(&request.car_id)
        .fetch_optional(&mut *conn)
        .await?;

    if car_exists.is_none() {
        return Ok(BookingError::CarNotFound(request.car_id.clone()));
    }

    if booked_car_id != request.car_id {
        return Ok(BookingError::BookingCarMismatch {
            booking_id: request.booking_id.clone(),
            car_id: request.car_id.clone(),
        });
    }

    if !status.can_transition_to(BookingStatus::Completed) {
        return Ok(BookingError::InvalidStateTransition {
            booking_id: request.booking_id.clone(),
            current_status: status.to_string(),
        });
    }

    // Confirmed and for this car, yet the UPDATE matched nothing
    Err(DbError::Internal(format!(
        "return of booking {} matched no row",
        request.booking_id
    )))
}

// =============================================================================
// Unit Tests
// =============================================================================
