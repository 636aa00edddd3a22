use std::num::IntErrorKind;

use jiff::ToSpan;
use jiff::civil::Date;
use thiserror::Error;

/// Largest number of days a single run may request.
pub const MAX_DAYS: u8 = 10;

/// Date format used by the PrivatBank API and in the report.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DaysError {
    #[error("'{value}' is not an integer, input an integer from 1 to {}", MAX_DAYS)]
    NotInteger { value: String },
    #[error("{value} exceeds the maximum of {} days", MAX_DAYS)]
    ExceedsMaximum { value: String },
    #[error("{value} is not a positive number of days")]
    NotPositive { value: String },
}

/// Parse the `--days` argument. A blank value means a single day.
pub fn parse_days(value: &str) -> Result<u8, DaysError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(1);
    }

    let value = value.to_string();
    let days = match value.parse::<i64>() {
        Ok(days) => days,
        // Still integers, only out of range for i64
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            return Err(DaysError::ExceedsMaximum { value });
        }
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => {
            return Err(DaysError::NotPositive { value });
        }
        Err(_) => return Err(DaysError::NotInteger { value }),
    };
    if days > i64::from(MAX_DAYS) {
        Err(DaysError::ExceedsMaximum { value })
    } else if days < 1 {
        Err(DaysError::NotPositive { value })
    } else {
        Ok(days as u8)
    }
}

/// Every calendar date from `start` to `end`, both inclusive.
///
/// Returns an empty sequence if `start` is after `end`.
pub fn date_range(start: Date, end: Date) -> Vec<Date> {
    start.series(1.day()).take_while(|d| *d <= end).collect()
}

/// The `days` most recent dates, ending on `today`.
pub fn last_days(today: Date, days: u8) -> Result<Vec<Date>, jiff::Error> {
    let start = today.checked_sub(i64::from(days.saturating_sub(1)).days())?;
    Ok(date_range(start, today))
}

pub fn parse_date(value: &str) -> Result<Date, jiff::Error> {
    Date::strptime(DATE_FORMAT, value)
}

pub fn format_date(date: Date) -> String {
    date.strftime(DATE_FORMAT).to_string()
}
