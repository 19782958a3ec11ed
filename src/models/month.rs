//! Defines the `YearMonth` type used to select calendar-month reporting
//! windows, and parsing of raw date strings supplied by front ends.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::Error;

/// A calendar month in a specific year, e.g. `2025-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Create a year-month from a year and a 1-based month number.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if `month` is not in `1..=12` or `year`
    /// is outside the range supported by [Date].
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        let invalid = || Error::InvalidDate(format!("{year:04}-{month:02}"));

        let month_name = Month::try_from(month).map_err(|_| invalid())?;
        Date::from_calendar_date(year, month_name, 1).map_err(|_| invalid())?;

        Ok(Self { year, month })
    }

    /// The year-month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The 1-based month number.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Date {
        // Both components were validated in the constructor.
        Date::from_calendar_date(self.year, self.month_name(), 1)
            .expect("year-month was validated on construction")
    }

    /// The last day of the month, accounting for month length and leap years.
    pub fn last_day(&self) -> Date {
        let day = time::util::days_in_year_month(self.year, self.month_name());

        Date::from_calendar_date(self.year, self.month_name(), day)
            .expect("year-month was validated on construction")
    }

    /// Whether `date` falls within this month (inclusive boundaries).
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && u8::from(date.month()) == self.month
    }

    fn month_name(&self) -> Month {
        Month::try_from(self.month).expect("year-month was validated on construction")
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parse a `YYYY-MM` string such as `"2025-01"`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDate(input.to_string());

        let (year_text, month_text) = input.split_once('-').ok_or_else(invalid)?;
        let year = parse_digits(year_text, 4).ok_or_else(invalid)? as i32;
        let month = parse_digits(month_text, 2).ok_or_else(invalid)? as u8;

        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a raw `YYYY-MM-DD` string from a front end into a calendar date.
///
/// # Errors
/// Returns [Error::InvalidDate] if the string is not in `YYYY-MM-DD` form or
/// names an impossible calendar date such as `2025-02-30`.
pub fn parse_date(input: &str) -> Result<Date, Error> {
    let invalid = || Error::InvalidDate(input.to_string());

    let mut parts = input.splitn(3, '-');
    let year = parts
        .next()
        .and_then(|text| parse_digits(text, 4))
        .ok_or_else(invalid)? as i32;
    let month = parts
        .next()
        .and_then(|text| parse_digits(text, 2))
        .ok_or_else(invalid)? as u8;
    let day = parts
        .next()
        .and_then(|text| parse_digits(text, 2))
        .ok_or_else(invalid)? as u8;

    let month = Month::try_from(month).map_err(|_| invalid())?;

    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

/// Format a date as ISO-8601 `YYYY-MM-DD`.
///
/// This is the one date format the ledger speaks: it is what the CSV export
/// writes and what the stores compare against, and it sorts lexicographically
/// in date order.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse a string of exactly `length` ASCII digits.
fn parse_digits(text: &str, length: usize) -> Option<u32> {
    if text.len() != length || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    text.parse().ok()
}
