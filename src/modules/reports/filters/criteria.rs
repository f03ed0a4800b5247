use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::core::{AppError, ReportClock, Result};

/// Parse an exact-match category filter.
///
/// Absent, blank, `all` and `All` disable the filter. Anything else must
/// parse exactly (case-sensitive) or the request is rejected.
pub fn parse_choice<T>(raw: Option<&str>, field: &str) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    match raw.map(str::trim) {
        None | Some("") | Some("all") | Some("All") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e| AppError::validation(format!("Invalid {} filter: {}", field, e))),
    }
}

/// Parse a yes/no filter (`trial_booked=yes`)
pub fn parse_flag(raw: Option<&str>, field: &str) -> Result<Option<bool>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") | Some("All") => Ok(None),
        Some("yes") | Some("true") => Ok(Some(true)),
        Some("no") | Some("false") => Ok(Some(false)),
        Some(other) => Err(AppError::validation(format!(
            "Invalid {} filter: '{}' (expected yes, no or all)",
            field, other
        ))),
    }
}

/// Inclusive instant window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AppError::validation(format!(
                "start ({}) must be before or equal to end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn contains_opt(&self, instant: Option<DateTime<Utc>>) -> bool {
        instant.map_or(false, |t| self.contains(t))
    }
}

/// How `month` is interpreted for a given date field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthConvention {
    /// Local first-of-month midnight up to now
    CalendarMonth,
    /// Now minus 30 days up to now
    Rolling30Days,
}

/// Payment due dates use a rolling window
pub const DUE_DATE_MONTH: MonthConvention = MonthConvention::Rolling30Days;
/// Invoice dates use the calendar month
pub const INVOICE_DATE_MONTH: MonthConvention = MonthConvention::CalendarMonth;

/// Date-range keyword submitted by the dashboard filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBucket {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateBucket {
    pub fn parse(raw: Option<&str>, field: &str) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") | Some("All") => Ok(DateBucket::All),
            Some("today") => Ok(DateBucket::Today),
            Some("week") => Ok(DateBucket::Week),
            Some("month") => Ok(DateBucket::Month),
            Some(other) => Err(AppError::validation(format!(
                "Invalid {} filter: '{}' (expected all, today, week or month)",
                field, other
            ))),
        }
    }

    /// Resolve against a captured clock; `All` yields no window
    pub fn resolve(self, clock: &ReportClock, month: MonthConvention) -> Option<DateRange> {
        let now = clock.now();
        match self {
            DateBucket::All => None,
            DateBucket::Today => Some(DateRange {
                start: clock.start_of_day(),
                end: clock.end_of_day(),
            }),
            DateBucket::Week => Some(DateRange {
                start: clock.days_ago(7),
                end: now,
            }),
            DateBucket::Month => Some(DateRange {
                start: match month {
                    MonthConvention::CalendarMonth => clock.start_of_month(),
                    MonthConvention::Rolling30Days => clock.days_ago(30),
                },
                end: now,
            }),
        }
    }
}

/// Explicit `YYYY-MM-DD` window in local dates, both ends inclusive.
///
/// Both bounds must be given together; a lone bound is rejected.
pub fn parse_date_window(
    start: Option<&str>,
    end: Option<&str>,
    clock: &ReportClock,
) -> Result<Option<DateRange>> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());

    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start_date = parse_local_date(start, "start_date")?;
            let end_date = parse_local_date(end, "end_date")?;
            let (from, _) = clock.day_bounds(start_date);
            let (_, to) = clock.day_bounds(end_date);
            DateRange::new(from, to).map(Some)
        }
        _ => Err(AppError::validation(
            "start_date and end_date must be supplied together",
        )),
    }
}

fn parse_local_date(raw: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!(
            "Invalid {} format: '{}'. Expected YYYY-MM-DD",
            field, raw
        ))
    })
}
