//! Calendar-month bucketing.
//!
//! All monthly aggregation works on half-open `[start, end)` date intervals
//! anchored at the first day of a month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid month input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid month: {year}-{month}")]
pub struct InvalidMonth {
    /// Rejected year.
    pub year: i32,
    /// Rejected month number.
    pub month: u32,
}

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMonth`] if `month` is outside `[1, 12]` or `year`
    /// is outside `[1, 9999]`.
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonth> {
        if (1..=12).contains(&month) && (1..=9999).contains(&year) {
            Ok(Self { year, month })
        } else {
            Err(InvalidMonth { year, month })
        }
    }

    /// Returns the month containing the given date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the 1-based month number.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns the first day of this month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        // month is validated at construction, day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated month")
    }

    /// Returns the following month, rolling over year boundaries.
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Returns the month `n` months before this one, rolling over year
    /// boundaries.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn minus_months(self, n: u32) -> Self {
        Self::from_ordinal(self.ordinal() - n as i32)
    }

    /// Returns the half-open [`Period`] covering this month.
    #[must_use]
    pub fn period(self) -> Period {
        Period {
            start: self.first_day(),
            end: self.next().first_day(),
        }
    }

    /// Returns a short human-readable label, e.g. `"Jan 2025"`.
    #[must_use]
    pub fn label(self) -> String {
        self.first_day().format("%b %Y").to_string()
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn ordinal(self) -> i32 {
        self.year * 12 + (self.month as i32 - 1)
    }

    #[allow(clippy::cast_sign_loss)]
    const fn from_ordinal(ordinal: i32) -> Self {
        Self {
            year: ordinal.div_euclid(12),
            month: (ordinal.rem_euclid(12) + 1) as u32,
        }
    }
}

/// A half-open `[start, end)` date interval covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First day of the month, inclusive.
    pub start: NaiveDate,
    /// First day of the following month, exclusive.
    pub end: NaiveDate,
}

impl Period {
    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
