//! Calendar month keys (`YYYY-MM`).

use chrono::{Datelike, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// A validated calendar month.
///
/// The rendered form is always zero-padded `YYYY-MM`, so ordering the rendered
/// strings lexicographically is the same as ordering months on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(invalid_month(&format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// Parses a strict `YYYY-MM` key.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        let bytes = raw.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid_month(raw));
        }
        let (year_part, month_part) = (&raw[..4], &raw[5..]);
        if !year_part.bytes().all(|b| b.is_ascii_digit())
            || !month_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid_month(raw));
        }
        let year: i32 = year_part.parse().map_err(|_| invalid_month(raw))?;
        let month: u32 = month_part.parse().map_err(|_| invalid_month(raw))?;
        Self::new(year, month).map_err(|_| invalid_month(raw))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in UTC.
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month immediately before this one.
    pub fn previous_month(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12).ok()
        } else {
            Self::new(self.year, self.month - 1).ok()
        }
    }

    /// The same calendar month one year earlier.
    pub fn previous_year(&self) -> Option<Self> {
        Self::new(self.year - 1, self.month).ok()
    }

    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn invalid_month(raw: &str) -> Error {
    Error::Validation(ValidationError::InvalidMonth(raw.to_string()))
}
