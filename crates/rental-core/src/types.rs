//! # Domain Types
//!
//! Core domain types used throughout the rental system.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Car        │   │     Booking     │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  brand, model   │   │  user_id (FK)   │   │  full_name      │       │
//! │  │  price/day      │   │  car_id (FK)    │   │  email (unique) │       │
//! │  │  status         │   │  start..end     │   │  password_hash  │       │
//! │  └─────────────────┘   │  total_cents    │   │  license_no     │       │
//! │                        │  status         │   └─────────────────┘       │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────┐       │
//! │  │   CarStatus     │                         │ BookingStatus   │       │
//! │  │  Available      │◄── book / return ──────►│  Confirmed      │       │
//! │  │  Booked         │                         │  Completed      │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Request types (`BookingRequest`, `ReturnRequest`, `NewUser`, ...) are the
//! only way data enters the core. None of them carries a price or a status:
//! both are always derived from the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Car Status
// =============================================================================

/// Availability of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CarStatus {
    /// Can be booked.
    Available,
    /// Held by exactly one Confirmed booking.
    Booked,
}

impl Default for CarStatus {
    fn default() -> Self {
        CarStatus::Available
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CarStatus::Available => "available",
            CarStatus::Booked => "booked",
        })
    }
}

// =============================================================================
// Booking Status
// =============================================================================

/// Lifecycle of a booking. Only `Confirmed → Completed` is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Active rental; the car is Booked.
    Confirmed,
    /// Car has been returned.
    Completed,
}

impl BookingStatus {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Confirmed, BookingStatus::Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
        })
    }
}

// =============================================================================
// Car
// =============================================================================

/// A rentable vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Car {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub brand: String,

    pub model_name: String,

    /// Daily rate in cents.
    pub price_per_day_cents: i64,

    pub status: CarStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    /// Bumped on every status flip.
    pub version: i64,
}

impl Car {
    /// Returns the daily rate as Money.
    #[inline]
    pub fn price_per_day(&self) -> Money {
        Money::from_cents(self.price_per_day_cents)
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == CarStatus::Available
    }
}

/// Catalog input for a new car.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCar {
    pub brand: String,
    pub model_name: String,
    pub price_per_day: Money,
}

// =============================================================================
// User
// =============================================================================

/// A registered customer.
///
/// `password_hash` is an Argon2 PHC string and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: String,
    pub full_name: String,
    /// Lower-cased, unique.
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub license_no: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Registration form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub license_no: String,
}

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Booking
// =============================================================================

/// A reservation of one car by one user for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub car_id: String,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    /// Strictly after `start_date`.
    #[ts(as = "String")]
    pub end_date: NaiveDate,
    /// Daily rate at booking time × days, in cents.
    pub total_cents: i64,
    pub status: BookingStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Booking {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Rental length in whole days.
    #[inline]
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Booking form as submitted by an authenticated user.
///
/// Dates stay as strings here; parsing them is part of the booking contract
/// and reported as `InvalidDateFormat`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingRequest {
    pub car_id: String,
    /// From the authenticated session, never from the form.
    pub user_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// Admin "car returned" action.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReturnRequest {
    pub booking_id: String,
    pub car_id: String,
}

/// Acknowledgement of a completed return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReturnAck {
    pub booking_id: String,
    pub car_id: String,
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Admin Report
// =============================================================================

/// One row of the admin report: a Confirmed booking joined with its user and car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BookingSummary {
    pub booking_id: String,
    pub car_id: String,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "String")]
    pub end_date: NaiveDate,
    pub total_cents: i64,
    pub full_name: String,
    pub brand: String,
    pub model_name: String,
}

impl BookingSummary {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
