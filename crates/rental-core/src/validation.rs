//! # Validation Module
//!
//! Field validation for registration and catalog input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form (external)                                          │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: rental-core                                                  │
//! │  ├── Typed request structs (deserialization)                           │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints (price >= 0, end_date > start_date)             │
//! │  ├── UNIQUE (users.email, one confirmed booking per car)               │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Date validation lives in [`crate::rental`] because its failures belong to
//! the booking error taxonomy, not to field validation.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewCar, NewUser};
use crate::{MAX_TEXT_LEN, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a free-text field is non-blank and not over [`MAX_TEXT_LEN`].
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_text;
///
/// assert!(validate_text("brand", "Toyota").is_ok());
/// assert!(validate_text("brand", "   ").is_err());
/// ```
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates and normalizes an email address (trimmed, lower-cased).
///
/// Only the shape is checked: one `@`, a non-empty local part, and a domain
/// containing a dot.
///
/// ## Example
/// ```rust
/// use rental_core::validation::normalize_email;
///
/// assert_eq!(normalize_email(" Ada@Example.COM ").unwrap(), "ada@example.com");
/// assert!(normalize_email("ada.example.com").is_err());
/// ```
pub fn normalize_email(email: &str) -> ValidationResult<String> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }

    if email.len() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(email)
}

/// Validates a password before hashing.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a daily rate.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (courtesy cars)
///
/// ## Example
/// ```rust
/// use rental_core::money::Money;
/// use rental_core::validation::validate_price_per_day;
///
/// assert!(validate_price_per_day(Money::from_cents(4550)).is_ok());
/// assert!(validate_price_per_day(Money::zero()).is_ok());
/// assert!(validate_price_per_day(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price_per_day(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price_per_day".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a registration form, returning the normalized email.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<String> {
    validate_text("full_name", &user.full_name)?;
    let email = normalize_email(&user.email)?;
    validate_password(&user.password)?;
    validate_text("license_no", &user.license_no)?;
    Ok(email)
}

/// Validates catalog input for a new car.
pub fn validate_new_car(car: &NewCar) -> ValidationResult<()> {
    validate_text("brand", &car.brand)?;
    validate_text("model_name", &car.model_name)?;
    validate_price_per_day(car.price_per_day)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            full_name: "Ada Driver".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "correct horse".to_string(),
            license_no: "DL-4411".to_string(),
        }
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("brand", "Honda").is_ok());
        assert!(validate_text("brand", "").is_err());
        assert!(validate_text("brand", &"A".repeat(MAX_TEXT_LEN + 1)).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("a@b.co").unwrap(), "a@b.co");
        assert!(normalize_email("").is_err());
        assert!(normalize_email("@b.co").is_err());
        assert!(normalize_email("a@b").is_err());
        assert!(normalize_email("a@@b.co").is_err());
        assert!(normalize_email("a b@c.co").is_err());
        assert!(normalize_email("a@.co").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("12345678").is_ok());
        assert!(matches!(
            validate_password("short"),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
        assert!(matches!(
            validate_password(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_new_user() {
        assert_eq!(validate_new_user(&new_user()).unwrap(), "ada@example.com");

        let mut missing_license = new_user();
        missing_license.license_no = " ".to_string();
        assert!(matches!(
            validate_new_user(&missing_license),
            Err(ValidationError::Required { ref field }) if field == "license_no"
        ));
    }

    #[test]
    fn test_validate_new_car() {
        let car = NewCar {
            brand: "Toyota".to_string(),
            model_name: "Corolla".to_string(),
            price_per_day: Money::from_cents(4500),
        };
        assert!(validate_new_car(&car).is_ok());

        let negative = NewCar {
            price_per_day: Money::from_cents(-1),
            ..car
        };
        assert!(validate_new_car(&negative).is_err());
    }
}
