//! Claim date handling
//!
//! Parses the claim date carried on a request and derives the calendar
//! features the residual model was trained on.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid claim date '{input}': expected a year-first date such as YYYY-MM-DD")]
    InvalidDate { input: String },
}

/// Parses a claim date.
///
/// Accepts a year-first calendar date (`2024-01-15`, `2024/01/15` or
/// `20240115`). Day-first and month-first forms are rejected since they
/// are ambiguous. Timestamps such as
/// `2024-01-15T10:30:00` or RFC 3339 strings are accepted too and truncated
/// to their date. No range is enforced.
pub fn parse_claim_date(input: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = input.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    Err(TemporalError::InvalidDate {
        input: input.to_string(),
    })
}

/// Whole days elapsed since 1970-01-01 (negative before the epoch)
pub fn days_since_epoch(date: NaiveDate) -> i64 {
    date.signed_duration_since(NaiveDate::default()).num_days()
}

/// Calendar features derived from a claim date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarFeatures {
    /// Calendar year
    pub year: i32,
    /// Month, 1..=12
    pub month: u32,
    /// Day of week, 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    /// Saturday or Sunday
    pub is_weekend: bool,
    /// Quarter, 1..=4
    pub quarter: u32,
    /// ISO 8601 week number, 1..=53
    pub week_of_year: u32,
}

impl CalendarFeatures {
    /// Derives the features for a date
    ///
    /// `week_of_year` follows ISO 8601, so the first days of January can fall
    /// in week 52/53 and the last days of December in week 1, while `year`
    /// stays the calendar year.
    pub fn from_date(date: NaiveDate) -> Self {
        let day_of_week = date.weekday().num_days_from_monday();
        Self {
            year: date.year(),
            month: date.month(),
            day_of_week,
            is_weekend: day_of_week >= 5,
            quarter: (date.month() - 1) / 3 + 1,
            week_of_year: date.iso_week().week(),
        }
    }
}

impl From<NaiveDate> for CalendarFeatures {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}
