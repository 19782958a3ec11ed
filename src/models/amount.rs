//! Defines the `Amount` type, a signed monetary value with two-decimal-place
//! semantics.
//!
//! Amounts are stored as integer cents rather than binary floating point so
//! that summing many of them can never drift at the cent level.

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg},
    str::FromStr,
};

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A signed monetary amount held as an exact number of cents.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(i64);

impl Amount {
    /// Zero dollars and zero cents.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount as a number of cents.
    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse a decimal string such as `"12"`, `"-4.5"` or `"30.00"`.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the string is not a plain decimal
    /// number, or has more than two fraction digits, or does not fit in 64-bit
    /// cents.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAmount(input.to_string());

        let trimmed = input.trim();
        let (is_negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole_text, fraction_text) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole_text.is_empty() || !whole_text.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        let has_separator = unsigned.contains('.');
        if has_separator
            && (fraction_text.is_empty()
                || fraction_text.len() > 2
                || !fraction_text.bytes().all(|byte| byte.is_ascii_digit()))
        {
            return Err(invalid());
        }

        let whole: i64 = whole_text.parse().map_err(|_| invalid())?;
        let fraction_cents = match fraction_text.len() {
            0 => 0,
            1 => fraction_text.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction_text.parse::<i64>().map_err(|_| invalid())?,
        };

        let magnitude = whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if is_negative { -magnitude } else { magnitude }))
    }
}

impl Display for Amount {
    /// Format with exactly two decimal places, e.g. `-4.05` or `30.00`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Amount)
    }
}
