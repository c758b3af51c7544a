// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic for collection scheduling.
//!
//! All dates in the system are plain calendar dates (no time component),
//! exchanged at every boundary as `YYYY-MM-DD` strings. Date arithmetic is
//! performed on `time::Date` values, which is pure calendar-day arithmetic
//! and never passes through a timestamp, so daylight-saving transitions
//! cannot shift a date by one day.
//!
//! "Today" is the one place the wall clock enters the system. Collection
//! days are defined in local civil time, so today is always evaluated in
//! the fixed operational timezone (Europe/London) regardless of the server
//! locale. Everything below the API boundary takes an explicit reference
//! date instead of reading the clock.

use crate::error::DomainError;
use chrono::Datelike;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month, Weekday};

/// The strict `YYYY-MM-DD` wire format for calendar dates.
const YMD: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// # Arguments
///
/// * `date_string` - The date string to parse
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid
/// `YYYY-MM-DD` date.
pub fn parse_ymd(date_string: &str) -> Result<Date, DomainError> {
    Date::parse(date_string, YMD).map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as a `YYYY-MM-DD` string.
///
/// # Errors
///
/// Returns an error if formatting fails, which indicates a malformed
/// format description and should not occur for valid dates.
pub fn format_ymd(date: Date) -> Result<String, DomainError> {
    date.format(YMD).map_err(|e| DomainError::DateParseError {
        date_string: date.to_string(),
        error: e.to_string(),
    })
}

/// Adds a signed number of days to a calendar date.
///
/// # Arguments
///
/// * `date` - The starting date
/// * `days` - The number of days to add (may be negative)
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is outside
/// the representable date range.
pub fn add_days(date: Date, days: i64) -> Result<Date, DomainError> {
    date.checked_add(Duration::days(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {days} days to {date}"),
        })
}

/// Returns the weekday a calendar date falls on.
#[must_use]
pub const fn weekday_of(date: Date) -> Weekday {
    date.weekday()
}

/// Parses a full English weekday name.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekday` if the name is not one of
/// `Monday` through `Sunday`.
pub fn parse_weekday(name: &str) -> Result<Weekday, DomainError> {
    match name {
        "Monday" => Ok(Weekday::Monday),
        "Tuesday" => Ok(Weekday::Tuesday),
        "Wednesday" => Ok(Weekday::Wednesday),
        "Thursday" => Ok(Weekday::Thursday),
        "Friday" => Ok(Weekday::Friday),
        "Saturday" => Ok(Weekday::Saturday),
        "Sunday" => Ok(Weekday::Sunday),
        _ => Err(DomainError::InvalidWeekday(name.to_string())),
    }
}

/// Returns the full English name of a weekday.
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

/// Returns the ordering index of a weekday (Monday=1 … Sunday=7).
#[must_use]
pub const fn weekday_index(weekday: Weekday) -> u8 {
    weekday.number_from_monday()
}

/// Finds the next occurrence of a target weekday on or after a date.
///
/// If `from` already falls on the target weekday, `from` itself is
/// returned (zero offset), so "your first collection is today" is a valid
/// outcome.
///
/// # Arguments
///
/// * `from` - The date to search from (inclusive)
/// * `target` - The weekday to find
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is outside
/// the representable date range.
pub fn next_occurrence_of_weekday(from: Date, target: Weekday) -> Result<Date, DomainError> {
    let offset: i64 = (i64::from(target.number_from_monday())
        - i64::from(weekday_of(from).number_from_monday()))
    .rem_euclid(7);
    add_days(from, offset)
}

/// Returns today's calendar date in the operational timezone.
///
/// Collection days are civil dates in Europe/London. Evaluating "today"
/// through the zoned clock keeps the answer stable around midnight UTC,
/// where a naive UTC date would disagree with the local calendar during
/// British Summer Time.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the zoned date cannot
/// be represented as a calendar date, which should not occur for any
/// realistic clock value.
pub fn today_in_operational_zone() -> Result<Date, DomainError> {
    let zoned = chrono::Utc::now().with_timezone(&chrono_tz::Europe::London);
    let civil = zoned.date_naive();

    let month_number: u8 =
        u8::try_from(civil.month()).map_err(|_| DomainError::DateArithmeticOverflow {
            operation: String::from("converting zoned month to calendar month"),
        })?;
    let month: Month =
        Month::try_from(month_number).map_err(|_| DomainError::DateArithmeticOverflow {
            operation: String::from("converting zoned month to calendar month"),
        })?;
    let day: u8 = u8::try_from(civil.day()).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: String::from("converting zoned day to calendar day"),
    })?;

    Date::from_calendar_date(civil.year(), month, day).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: String::from("converting zoned today to a calendar date"),
        }
    })
}
