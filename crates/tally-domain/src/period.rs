//! Calendar month scoping for expense queries and summaries.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),
    #[error("expected YYYY-MM, got `{0}`")]
    Malformed(String),
}

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PeriodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| PeriodError::Malformed(trimmed.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodError::Malformed(trimmed.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodError::Malformed(trimmed.to_string()))?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_padded_month() {
        let period: YearMonth = "2024-3".parse().expect("parse period");
        assert_eq!(period.to_string(), "2024-03");
    }

    #[test]
    fn rejects_month_thirteen() {
        assert_eq!(
            YearMonth::new(2024, 13),
            Err(PeriodError::MonthOutOfRange(13))
        );
        assert!(matches!(
            "2024".parse::<YearMonth>(),
            Err(PeriodError::Malformed(_))
        ));
    }

    #[test]
    fn month_of_a_date() {
        let period = YearMonth::new(2024, 2).unwrap();
        assert_eq!(YearMonth::of(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()), period);
        assert_ne!(YearMonth::of(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()), period);
        assert_ne!(YearMonth::of(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()), period);
    }
}
