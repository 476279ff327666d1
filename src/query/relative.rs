//! Relative date expressions such as `7 days` or `3 months`.

use chrono::{DateTime, Duration, Months, Utc};
use std::fmt;
use std::str::FromStr;

use super::QueryError;

/// Calendar unit of a relative date expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    /// Parse a unit spelling, singular or plural, ignoring case
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.to_lowercase().as_str() {
            "day" | "days" => Some(TimeUnit::Day),
            "week" | "weeks" => Some(TimeUnit::Week),
            "month" | "months" => Some(TimeUnit::Month),
            "year" | "years" => Some(TimeUnit::Year),
            _ => None,
        }
    }

    fn spelling(&self, count: u32) -> &'static str {
        match (self, count) {
            (TimeUnit::Day, 1) => "day",
            (TimeUnit::Day, _) => "days",
            (TimeUnit::Week, 1) => "week",
            (TimeUnit::Week, _) => "weeks",
            (TimeUnit::Month, 1) => "month",
            (TimeUnit::Month, _) => "months",
            (TimeUnit::Year, 1) => "year",
            (TimeUnit::Year, _) => "years",
        }
    }
}

/// A parsed `<count> <unit>` offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelativeOffset {
    pub count: u32,
    pub unit: TimeUnit,
}

impl RelativeOffset {
    pub fn new(count: u32, unit: TimeUnit) -> Self {
        Self { count, unit }
    }

    /// The instant `self` before `now`
    ///
    /// Days and weeks subtract an exact duration. Months and years step the
    /// calendar, clamping the day to the end of a shorter target month
    /// (March 31st minus one month is February 28th or 29th).
    pub fn before(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, QueryError> {
        let shifted = match self.unit {
            TimeUnit::Day => now.checked_sub_signed(Duration::days(i64::from(self.count))),
            TimeUnit::Week => now.checked_sub_signed(Duration::weeks(i64::from(self.count))),
            TimeUnit::Month => now.checked_sub_months(Months::new(self.count)),
            TimeUnit::Year => self
                .count
                .checked_mul(12)
                .and_then(|months| now.checked_sub_months(Months::new(months))),
        };
        shifted.ok_or_else(|| QueryError::OutOfRange(self.to_string()))
    }
}

impl fmt::Display for RelativeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.unit.spelling(self.count))
    }
}

impl FromStr for RelativeOffset {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_relative_date(s)
    }
}

/// Parse a relative date expression
///
/// The input must be exactly two whitespace-separated tokens: a non-negative
/// integer count followed by one of `day`, `week`, `month` or `year` (singular
/// or plural, any case).
pub fn parse_relative_date(relative: &str) -> Result<RelativeOffset, QueryError> {
    let parts: Vec<&str> = relative.split_whitespace().collect();
    let [count, unit] = parts.as_slice() else {
        return Err(QueryError::InvalidFormat(relative.to_string()));
    };

    let count: u32 = count
        .parse()
        .map_err(|_| QueryError::InvalidNumber(count.to_string()))?;

    let unit = TimeUnit::parse(unit).ok_or_else(|| QueryError::InvalidUnit(unit.to_lowercase()))?;

    Ok(RelativeOffset::new(count, unit))
}
