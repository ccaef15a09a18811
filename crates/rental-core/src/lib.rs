//! # rental-core: Pure Business Logic for the Car Rental System
//!
//! This crate holds the booking rules as pure functions with zero I/O
//! dependencies. The database layer (`rental-db`) calls into it from inside
//! its transactions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rental Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Web Layer (external collaborator)               │   │
//! │  │    templates, sessions, routing, login form handling            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ BookingRequest / ReturnRequest         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  rental   │  │ validation│  │   │
//! │  │   │    Car    │  │   Money   │  │  Period   │  │   rules   │  │   │
//! │  │   │  Booking  │  │  (cents)  │  │  Quote    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rental-db (Database Layer)                   │   │
//! │  │          SQLite stores, booking and return transactions         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Car, User, Booking, requests)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rental`] - Rental period parsing and price quotes
//! - [`error`] - Booking and validation error types
//! - [`validation`] - Field validation for registration and catalog input
//!
//! ## Example Usage
//!
//! ```rust
//! use rental_core::money::Money;
//! use rental_core::rental::RentalPeriod;
//!
//! let period = RentalPeriod::parse("2024-01-01", "2024-01-04").unwrap();
//! let quote = period.quote(Money::from_cents(3000)).unwrap();
//!
//! assert_eq!(quote.days, 3);
//! assert_eq!(quote.total.cents(), 9000); // $90.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod rental;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{BookingError, BookingResult, ValidationError};
pub use money::Money;
pub use rental::{RentalPeriod, RentalQuote};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Wire format for rental dates (`2024-01-31`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum length of free-text fields (names, brand, model, license).
pub const MAX_TEXT_LEN: usize = 200;
