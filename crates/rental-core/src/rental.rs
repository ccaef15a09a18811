//! # Rental Period Math
//!
//! Turns the two date strings from a booking form into a validated
//! [`RentalPeriod`] and prices it.
//!
//! ```text
//! "2024-01-01", "2024-01-04"
//!      │
//!      ▼
//! RentalPeriod::parse ── unparseable ──► InvalidDateFormat
//!      │              ── end <= start ─► InvalidDateRange
//!      ▼
//! days = 3
//!      │
//!      ▼
//! quote(price_per_day = 30.00) ──► RentalQuote { days: 3, total: 90.00 }
//! ```
//!
//! Parsing and range checks run before any store access, so a bad form never
//! opens a transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, BookingResult, ValidationError};
use crate::money::Money;
use crate::DATE_FORMAT;

/// A validated date range with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

/// Price of a rental period at a given daily rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalQuote {
    pub days: i64,
    pub price_per_day: Money,
    pub total: Money,
}

impl RentalPeriod {
    /// Builds a period from already-parsed dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> BookingResult<Self> {
        if (end - start).num_days() <= 0 {
            return Err(BookingError::InvalidDateRange {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(RentalPeriod { start, end })
    }

    /// Parses ISO dates from a booking form.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::rental::RentalPeriod;
    /// use rental_core::BookingError;
    ///
    /// assert_eq!(RentalPeriod::parse("2024-02-28", "2024-03-01").unwrap().days(), 2);
    ///
    /// assert!(matches!(
    ///     RentalPeriod::parse("2024-01-04", "2024-01-01"),
    ///     Err(BookingError::InvalidDateRange { .. })
    /// ));
    /// assert!(matches!(
    ///     RentalPeriod::parse("01/04/2024", "2024-01-05"),
    ///     Err(BookingError::InvalidDateFormat { .. })
    /// ));
    /// ```
    pub fn parse(start_date: &str, end_date: &str) -> BookingResult<Self> {
        let start = parse_date("start_date", start_date)?;
        let end = parse_date("end_date", end_date)?;
        Self::new(start, end)
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whole days between start and end. Always at least 1.
    #[inline]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Prices the period at `price_per_day`.
    ///
    /// Overflow is reported as a validation error rather than wrapping.
    pub fn quote(&self, price_per_day: Money) -> BookingResult<RentalQuote> {
        let days = self.days();
        let total = price_per_day
            .checked_mul_days(days)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "total_amount".to_string(),
                min: 0,
                max: i64::MAX,
            })?;

        Ok(RentalQuote {
            days,
            price_per_day,
            total,
        })
    }
}

/// Parses a single `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(field: &str, value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        BookingError::InvalidDateFormat {
            field: field.to_string(),
            value: value.to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_day_rental_at_thirty() {
        let period = RentalPeriod::parse("2024-01-01", "2024-01-04").unwrap();
        let quote = period.quote("30.00".parse().unwrap()).unwrap();

        assert_eq!(quote.days, 3);
        assert_eq!(quote.total.cents(), 9000);
        assert_eq!(quote.total.to_decimal_string(), "90.00");
    }

    #[test]
    fn test_days_across_month_and_leap_day() {
        assert_eq!(RentalPeriod::parse("2024-01-31", "2024-02-01").unwrap().days(), 1);
        assert_eq!(RentalPeriod::parse("2024-02-28", "2024-03-01").unwrap().days(), 2);
        assert_eq!(RentalPeriod::parse("2023-02-28", "2023-03-01").unwrap().days(), 1);
        assert_eq!(RentalPeriod::parse("2023-12-31", "2024-12-31").unwrap().days(), 366);
    }

    #[test]
    fn test_total_is_days_times_price_over_a_range() {
        let start = date(2024, 1, 1);
        for days in 1..=60i64 {
            let end = start + chrono::Duration::days(days);
            let period = RentalPeriod::new(start, end).unwrap();
            for cents in [0i64, 1, 999, 3330, 12_345] {
                let quote = period.quote(Money::from_cents(cents)).unwrap();
                assert_eq!(quote.days, days);
                assert_eq!(quote.total.cents(), cents * days);
            }
        }
    }

    #[test]
    fn test_end_not_after_start_is_rejected() {
        let same = RentalPeriod::parse("2024-01-04", "2024-01-04");
        assert_eq!(
            same,
            Err(BookingError::InvalidDateRange {
                start: "2024-01-04".to_string(),
                end: "2024-01-04".to_string(),
            })
        );

        let reversed = RentalPeriod::parse("2024-01-04", "2024-01-01");
        assert!(matches!(reversed, Err(BookingError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_bad_formats() {
        for bad in ["", "2024-13-01", "2024-02-30", "04-01-2024", "2024/01/01", "soon"] {
            let err = RentalPeriod::parse(bad, "2024-12-31").unwrap_err();
            assert!(
                matches!(err, BookingError::InvalidDateFormat { ref field, .. } if field == "start_date"),
                "{bad:?} gave {err:?}"
            );
        }

        let err = RentalPeriod::parse("2024-01-01", "tomorrow").unwrap_err();
        assert!(matches!(err, BookingError::InvalidDateFormat { ref field, .. } if field == "end_date"));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let period = RentalPeriod::parse(" 2024-01-01", "2024-01-02 ").unwrap();
        assert_eq!(period.start(), date(2024, 1, 1));
        assert_eq!(period.end(), date(2024, 1, 2));
    }

    #[test]
    fn test_quote_overflow() {
        let period = RentalPeriod::parse("2024-01-01", "2024-01-03").unwrap();
        let err = period.quote(Money::from_cents(i64::MAX)).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }
}
