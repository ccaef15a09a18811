//! # rental-db: Database Layer for the Car Rental System
//!
//! SQLite persistence for cars, users and bookings, and the two transactions
//! that matter: booking a car and returning it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rental Data Flow                                 │
//! │                                                                         │
//! │  Web layer (book form, admin page)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rental-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ CarRepository  │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ UserRepository │   │ 001_initial  │  │   │
//! │  │   │ DbConfig      │    │ BookingRepo    │   │ _schema.sql  │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (WAL)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - `DbConfig` builder and environment loading
//! - [`pool`] - Connection pool creation and the `Database` handle
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Car, user and booking repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rental_db::{Database, DbConfig};
//! use rental_core::BookingRequest;
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let cars = db.cars().list_available().await?;
//! let booking = db.bookings().book(&BookingRequest {
//!     car_id: cars[0].id.clone(),
//!     user_id: session_user_id,
//!     start_date: "2024-01-01".into(),
//!     end_date: "2024-01-04".into(),
//! }).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use pool::Database;

pub use repository::booking::BookingRepository;
pub use repository::car::CarRepository;
pub use repository::user::UserRepository;

// =============================================================================
// Logging
// =============================================================================

/// Installs a `tracing` subscriber for binaries.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once; only
/// the first call installs anything.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
