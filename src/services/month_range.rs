//! Month window used by every listing and report query.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Error;

/// Inclusive `[start, end]` window covering one calendar month in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthRange {
    /// Resolve the window for `month` (1-12) of `year`.
    ///
    /// `start` is 00:00:00.000 on the first day and `end` is 23:59:59.999 on
    /// the last day of the month.
    pub fn resolve(year: i32, month: u32) -> Result<Self, Error> {
        let invalid = || Error::InvalidMonth(month.to_string());

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month_first_day = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let last_day = next_month_first_day.pred_opt().ok_or_else(invalid)?;

        let start = first_day.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc();
        let end = last_day
            .and_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(invalid)?
            .and_utc();

        Ok(Self { start, end })
    }

    /// Parse a raw `month` query parameter and resolve it against `year`.
    pub fn parse(year: i32, raw: Option<&str>) -> Result<Self, Error> {
        let raw = raw.map(str::trim).unwrap_or_default();

        let month = raw
            .parse::<u32>()
            .ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or_else(|| Error::InvalidMonth(raw.to_string()))?;

        Self::resolve(year, month)
    }
}
