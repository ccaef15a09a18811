//! # Repository Module
//!
//! Database repository implementations for the rental system.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Web layer                                                             │
//! │       │  db.bookings().book(&request)                                  │
//! │       ▼                                                                 │
//! │  BookingRepository                                                     │
//! │  ├── book(&self, request)        ← one transaction                     │
//! │  ├── return_car(&self, request)  ← one transaction                     │
//! │  ├── admin_report(&self)         ← read-only join                      │
//! │  └── get_by_id(&self, id)                                              │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`car::CarRepository`] - Catalog store
//! - [`user::UserRepository`] - Registration and login lookup
//! - [`booking::BookingRepository`] - Booking engine, return engine, admin query

pub mod booking;
pub mod car;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
