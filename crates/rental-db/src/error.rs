//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BookingError (rental-core) ← Retryable vs final                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Web layer renders the message                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rental_core::{BookingError, ValidationError};
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Registering an email that already exists
    /// - A second Confirmed booking for the same car
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Booking for a user_id that does not exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// SQLite could not take a lock before `busy_timeout` expired.
    #[error("Database is busy: {0}")]
    Busy(String),

    /// A unit of work exceeded `DbConfig::transaction_timeout`.
    #[error("Transaction timed out after {0:?}")]
    TransactionTimeout(std::time::Duration),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - File permissions issue
    /// - Pool has been closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Input rejected before reaching SQL.
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),

    /// Password hashing failed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether the failure is a UNIQUE violation on the given `table.column`.
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        matches!(self, DbError::UniqueViolation { field, .. } if field.contains(column))
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including extended codes.
fn is_lock_contention(code: Option<&str>, message: &str) -> bool {
    let primary = code
        .and_then(|c| c.parse::<i32>().ok())
        .map(|c| c & 0xff);
    matches!(primary, Some(5) | Some(6)) || message.contains("database is locked")
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Busy / UniqueViolation / ForeignKeyViolation / QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed/Io  → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if is_lock_contention(db_err.code().as_deref(), msg) {
                    DbError::Busy(msg.to_string())
                } else if msg.contains("UNIQUE constraint failed") {
                    // "UNIQUE constraint failed: users.email"
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(io) => DbError::ConnectionFailed(io.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Store failures as seen by the booking engine.
///
/// Lock contention and timeouts become `TransactionTimeout`, an unreachable
/// store becomes `StoreUnavailable`; both are retryable. Anything else is a
/// final `Store` error.
impl From<DbError> for BookingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Busy(_) | DbError::TransactionTimeout(_) => BookingError::TransactionTimeout,
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                BookingError::StoreUnavailable(err.to_string())
            }
            DbError::Invalid(v) => BookingError::Validation(v),
            other => BookingError::Store(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_contention_codes() {
        assert!(is_lock_contention(Some("5"), ""));
        assert!(is_lock_contention(Some("517"), "")); // SQLITE_BUSY_SNAPSHOT
        assert!(is_lock_contention(Some("6"), ""));
        assert!(is_lock_contention(None, "database is locked"));
        assert!(!is_lock_contention(Some("2067"), "UNIQUE constraint failed: users.email"));
    }

    #[test]
    fn test_booking_error_mapping() {
        let err: BookingError = DbError::Busy("database is locked".into()).into();
        assert_eq!(err, BookingError::TransactionTimeout);
        assert!(err.is_retryable());

        let err: BookingError =
            DbError::TransactionTimeout(std::time::Duration::from_millis(100)).into();
        assert_eq!(err, BookingError::TransactionTimeout);

        let err: BookingError = DbError::PoolExhausted.into();
        assert!(matches!(err, BookingError::StoreUnavailable(_)));
        assert!(err.is_retryable());

        let err: BookingError = DbError::QueryFailed("no such table".into()).into();
        assert!(matches!(err, BookingError::Store(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unique_violation_on() {
        let err = DbError::duplicate("users.email", "a@b.co");
        assert!(err.is_unique_violation_on("users.email"));
        assert!(!err.is_unique_violation_on("bookings.car_id"));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
