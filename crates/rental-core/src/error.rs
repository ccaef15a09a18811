//! # Error Types
//!
//! Domain-specific error types for rental-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rental-core errors (this file)                                        │
//! │  ├── BookingError     - What book() / return_car() report              │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  rental-db errors (separate crate)                                     │
//! │  └── DbError          - Database failures, converted to BookingError   │
//! │                                                                         │
//! │  Flow: ValidationError → BookingError ← DbError → web layer message    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only [`BookingError::TransactionTimeout`] and
//! [`BookingError::StoreUnavailable`] are retryable. Everything else is final
//! for the request and should be shown to the user as-is.

use thiserror::Error;

// =============================================================================
// Booking Error
// =============================================================================

/// Errors returned by the booking and return engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// A date could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDateFormat { field: String, value: String },

    /// The end date is not strictly after the start date.
    ///
    /// ## User Workflow
    /// ```text
    /// Pick dates: 2024-01-04 → 2024-01-04
    ///      │
    ///      ▼
    /// duration = 0 days
    ///      │
    ///      ▼
    /// InvalidDateRange → "Return date must be after start date"
    /// ```
    #[error("Return date {end} must be after start date {start}")]
    InvalidDateRange { start: String, end: String },

    #[error("Car not found: {0}")]
    CarNotFound(String),

    /// The car exists but is already booked.
    #[error("Car {0} is not available")]
    CarUnavailable(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// The booking is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - Returning a car whose booking is already Completed
    #[error("Booking {booking_id} is {current_status}, cannot complete it")]
    InvalidStateTransition {
        booking_id: String,
        current_status: String,
    },

    /// The booking exists but is for a different car than the one returned.
    #[error("Booking {booking_id} is not for car {car_id}")]
    BookingCarMismatch { booking_id: String, car_id: String },

    /// The store did not finish the unit of work in time. Retryable.
    #[error("Transaction timed out, please retry")]
    TransactionTimeout,

    /// The store could not be reached. Retryable.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Unexpected store failure (bad schema, decode error).
    #[error("Store error: {0}")]
    Store(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl BookingError {
    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookingError::TransactionTimeout | BookingError::StoreUnavailable(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with BookingError.
pub type BookingResult<T> = Result<T, BookingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BookingError::InvalidDateRange {
            start: "2024-01-04".to_string(),
            end: "2024-01-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Return date 2024-01-01 must be after start date 2024-01-04"
        );

        let err = BookingError::CarUnavailable("car-1".to_string());
        assert_eq!(err.to_string(), "Car car-1 is not available");
    }

    #[test]
    fn test_only_store_errors_are_retryable() {
        assert!(BookingError::TransactionTimeout.is_retryable());
        assert!(BookingError::StoreUnavailable("pool closed".into()).is_retryable());

        assert!(!BookingError::CarUnavailable("c".into()).is_retryable());
        assert!(!BookingError::Store("decode".into()).is_retryable());
        assert!(!BookingError::InvalidStateTransition {
            booking_id: "b".into(),
            current_status: "completed".into(),
        }
        .is_retryable());
    }

    #[test]
    fn test_validation_converts_to_booking_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(validation_err.to_string(), "email is required");

        let err: BookingError = validation_err.into();
        assert!(matches!(err, BookingError::Validation(_)));
    }
}
