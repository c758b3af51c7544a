// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Weekday};

/// Errors that can occur during domain validation and date arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Postcode is empty after normalization.
    EmptyPostcode,
    /// Frequency day count is not one of the supported cycles.
    InvalidFrequency {
        /// The rejected day count.
        days: u16,
    },
    /// Frequency label could not be parsed.
    InvalidFrequencyLabel(String),
    /// Slot label could not be parsed.
    InvalidSlot(String),
    /// Weekday name could not be parsed.
    InvalidWeekday(String),
    /// Subscription status label could not be parsed.
    InvalidStatus(String),
    /// Extra bag count is outside the allowed range.
    InvalidExtraBags {
        /// The rejected count.
        count: u8,
    },
    /// Pause window start is after its end.
    InvalidPauseWindow {
        /// The window start (inclusive).
        from: Date,
        /// The window end (inclusive).
        to: Date,
    },
    /// A subscription's route day does not match the configured weekday
    /// of its assigned route area.
    RouteDayMismatch {
        /// The route area name.
        area: String,
        /// The weekday configured on the route area.
        configured: Weekday,
        /// The weekday requested for the subscription.
        requested: Weekday,
    },
    /// The named route area does not exist in the catalogue.
    UnknownRouteArea(String),
    /// Failed to parse a calendar date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The recurrence iteration cap was exceeded.
    ///
    /// This signals corrupt stored data (an anchor implausibly far in the
    /// past), not a user input error, and is surfaced distinctly so
    /// operators can tell the two apart.
    RecurrenceOverflow {
        /// The anchor date that started the scan.
        anchor: Date,
        /// The cycle length in days.
        frequency_days: u16,
        /// The reference date the scan was trying to reach.
        reference: Date,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPostcode => write!(f, "Postcode must not be empty"),
            Self::InvalidFrequency { days } => {
                write!(f, "Invalid frequency: {days} days. Must be 7, 14, or 21")
            }
            Self::InvalidFrequencyLabel(label) => {
                write!(
                    f,
                    "Invalid frequency '{label}'. Must be 'weekly', 'fortnightly', or 'three_weekly'"
                )
            }
            Self::InvalidSlot(label) => {
                write!(f, "Invalid slot '{label}'. Must be 'AM', 'PM', or 'ANY'")
            }
            Self::InvalidWeekday(name) => {
                write!(f, "Invalid weekday '{name}'. Must be a full English day name")
            }
            Self::InvalidStatus(label) => write!(f, "Invalid subscription status '{label}'"),
            Self::InvalidExtraBags { count } => {
                write!(f, "Invalid extra bag count: {count}. Must be between 0 and 10")
            }
            Self::InvalidPauseWindow { from, to } => {
                write!(f, "Invalid pause window: {from} is after {to}")
            }
            Self::RouteDayMismatch {
                area,
                configured,
                requested,
            } => {
                write!(
                    f,
                    "Route day {requested} does not match area '{area}' which runs on {configured}"
                )
            }
            Self::UnknownRouteArea(area) => {
                write!(f, "Route area '{area}' does not exist in the catalogue")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::RecurrenceOverflow {
                anchor,
                frequency_days,
                reference,
            } => {
                write!(
                    f,
                    "Recurrence scan from anchor {anchor} (every {frequency_days} days) did not reach {reference} within the iteration cap; stored anchor is likely corrupt"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
