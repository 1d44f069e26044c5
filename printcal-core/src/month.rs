//! Month navigation and calendar arithmetic.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::{CalendarError, CalendarResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month in the navigation view.
///
/// The month index is 0-based (0 = January), matching the grid engine's
/// arithmetic. Construction always normalizes, so a `ViewMonth` never holds
/// an out-of-range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewMonth {
    year: i32,
    month0: u32,
}

impl ViewMonth {
    /// Build a month from a year and a 0-based month index. Out-of-range
    /// indexes overflow into adjacent years (month 12 of 2025 is January
    /// 2026, month -1 is December 2024), never an error.
    pub fn from_parts(year: i32, month0: i64) -> Self {
        let year = year as i64 + month0.div_euclid(12);
        ViewMonth {
            year: year as i32,
            month0: month0.rem_euclid(12) as u32,
        }
    }

    pub fn new(year: i32, month0: u32) -> Self {
        Self::from_parts(year, month0 as i64)
    }

    /// Parse a user-supplied `YYYY-MM` string (1-based month).
    pub fn parse(s: &str) -> CalendarResult<Self> {
        let parsed = (|| {
            let (y, m) = s.split_once('-')?;
            let year: i32 = y.parse().ok()?;
            let month: u32 = m.parse().ok()?;
            (1..=12)
                .contains(&month)
                .then(|| ViewMonth::new(year, month - 1))
        })();

        parsed.ok_or_else(|| CalendarError::InvalidMonth(s.to_string()))
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// 0-based month index (0 = January).
    pub fn month0(self) -> u32 {
        self.month0
    }

    pub fn next(self) -> Self {
        Self::from_parts(self.year, self.month0 as i64 + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_parts(self.year, self.month0 as i64 - 1)
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap()
    }

    pub fn last_day(self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap()
    }

    /// Weekday of the 1st, 0 = Sunday.
    pub fn first_weekday(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    /// The date of a given 1-based day number, if the month has it.
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// English month name ("July").
    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }
}

impl fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

/// Strict `YYYY-MM-DD` parse for user-supplied dates.
pub fn parse_iso_date(s: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}
