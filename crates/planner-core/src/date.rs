//! Calendar days without a time component.
//!
//! The only wire format is eight ASCII digits, `YYYYMMDD`. Everything in the
//! scheduler compares dates through [`Date::is_strictly_after`], which looks at
//! the (year, month, day) tuple and nothing else.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecurrenceError;

/// Length of the `YYYYMMDD` wire format.
pub const DATE_LEN: usize = 8;

/// Last year that fits in four digits.
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

impl Date {
    /// Builds a date from its components, `None` if it is not a valid Gregorian
    /// day or does not fit the wire format.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::representable)
    }

    fn representable(date: NaiveDate) -> Option<Self> {
        (0..=MAX_YEAR).contains(&date.year()).then_some(Date(date))
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Weekday index with Sunday as 0 and Saturday as 6.
    pub fn weekday_from_sunday(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Returns true iff `self` falls on a later calendar day than `other`.
    #[inline]
    pub fn is_strictly_after(self, other: Date) -> bool {
        (self.year(), self.month(), self.day()) > (other.year(), other.month(), other.day())
    }

    pub fn add_days(self, days: u64) -> Result<Self, RecurrenceError> {
        self.0
            .checked_add_days(Days::new(days))
            .and_then(Self::representable)
            .ok_or_else(|| RecurrenceError::DateOutOfRange(self.to_string()))
    }

    /// Whole days from `earlier` to `self`; negative when `earlier` is later.
    pub fn days_since(self, earlier: Date) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }

    /// Moves the date one year forward. February 29 lands on March 1 when the
    /// target year is not a leap year.
    pub fn add_one_year(self) -> Result<Self, RecurrenceError> {
        let year = self.year() + 1;
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
            .and_then(Self::representable)
            .ok_or_else(|| RecurrenceError::DateOutOfRange(self.to_string()))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl FromStr for Date {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RecurrenceError::InvalidDateFormat(s.to_string());
        if s.len() != DATE_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // All eight bytes are ASCII digits, so the slices and parses cannot fail.
        let year: i32 = s[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[4..6].parse().map_err(|_| invalid())?;
        let day: u32 = s[6..8].parse().map_err(|_| invalid())?;
        Date::from_ymd(year, month, day).ok_or_else(invalid)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

impl TryFrom<String> for Date {
    type Error = RecurrenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
