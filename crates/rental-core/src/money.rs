//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A rental at 33.30/day for 3 days must be exactly 99.90, every time.   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3330 cents × 3 days = 9990 cents                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rental_core::money::Money;
//!
//! // Create from cents (preferred)
//! let per_day = Money::from_cents(3000); // $30.00
//!
//! // Or parse the decimal a catalog form submits
//! let parsed: Money = "30.00".parse().unwrap();
//! assert_eq!(parsed, per_day);
//!
//! let total = per_day.checked_mul_days(3).unwrap();
//! assert_eq!(total.to_string(), "$90.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Car.price_per_day_cents ──► RentalPeriod::quote(days) ──► Booking.total_cents
///                                                                │
///                                        BookingSummary.total ◄──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a daily rate by a number of rental days.
    ///
    /// Returns `None` on overflow instead of wrapping.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// let per_day = Money::from_cents(3330); // $33.30
    /// assert_eq!(per_day.checked_mul_days(3), Some(Money::from_cents(9990)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_days(2), None);
    /// ```
    #[inline]
    pub fn checked_mul_days(&self, days: i64) -> Option<Self> {
        self.0.checked_mul(days).map(Money)
    }

    /// Formats the amount as a plain decimal without currency sign (`90.00`).
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Parses a decimal amount such as `30`, `30.5` or `30.00`.
///
/// At most two fractional digits are accepted; anything finer would need
/// rounding, which is never done implicitly.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number like 30.00"));
        }
        if minor_str.len() > 2 || !minor_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = major_str
            .parse()
            .map_err(|_| invalid("amount is too large"))?;
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => minor_str.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(9000)), "$90.00");
        assert_eq!(format!("{}", Money::from_cents(505)), "$5.05");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(Money::from_cents(9990).to_decimal_string(), "99.90");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!("30.00".parse::<Money>().unwrap().cents(), 3000);
        assert_eq!("30".parse::<Money>().unwrap().cents(), 3000);
        assert_eq!("30.5".parse::<Money>().unwrap().cents(), 3050);
        assert_eq!(" 0.07 ".parse::<Money>().unwrap().cents(), 7);
        assert_eq!("-5.50".parse::<Money>().unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("30.001".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
        assert!("1e3".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    /// 0.1-style prices that drift in floating point stay exact here.
    #[test]
    fn test_daily_rate_has_no_drift() {
        let per_day: Money = "33.30".parse().unwrap();
        let total = per_day.checked_mul_days(3).unwrap();
        assert_eq!(total.cents(), 9990);
        assert_eq!(total.to_decimal_string(), "99.90");

        let per_day: Money = "0.10".parse().unwrap();
        assert_eq!(per_day.checked_mul_days(3).unwrap().cents(), 30);
    }

    #[test]
    fn test_checked_mul_overflow() {
        assert!(Money::from_cents(i64::MAX / 2).checked_mul_days(3).is_none());
    }
}
