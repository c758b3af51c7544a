// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence calculation for collection cycles.
//!
//! A subscription's due dates form the arithmetic progression
//! `anchor + k * frequency_days` for integer `k >= 0`. The calculator is
//! pure: it takes an explicit reference date and never reads the clock.

use crate::error::DomainError;
use crate::frequency::Frequency;
use time::{Date, Duration};

/// Hard cap on recurrence scan steps.
///
/// At the shortest cycle (7 days) this covers roughly 190 years between
/// anchor and reference. An anchor further in the past than that is
/// corrupt data, and the scan fails with `RecurrenceOverflow` instead of
/// looping unbounded.
pub const MAX_RECURRENCE_STEPS: u32 = 10_000;

/// Finds the next due date on or after a reference date.
///
/// Returns the smallest date of the form `anchor + k * days(frequency)`
/// (`k >= 0`) that is greater than or equal to `reference`. If the anchor
/// is already on or after the reference, the anchor is returned unchanged
/// (`k = 0`); a reference equal to the anchor yields the anchor itself,
/// so "due today" is a valid answer at the boundary.
///
/// # Arguments
///
/// * `anchor` - The date the cycle is anchored to
/// * `frequency` - The collection frequency
/// * `reference` - The date to search from (inclusive)
///
/// # Errors
///
/// Returns `DomainError::RecurrenceOverflow` if the scan exceeds
/// [`MAX_RECURRENCE_STEPS`], or `DomainError::DateArithmeticOverflow` if
/// a candidate date leaves the representable range.
pub fn next_due(anchor: Date, frequency: Frequency, reference: Date) -> Result<Date, DomainError> {
    let step: Duration = Duration::days(i64::from(frequency.days()));
    let mut candidate: Date = anchor;

    for _ in 0..=MAX_RECURRENCE_STEPS {
        if candidate >= reference {
            return Ok(candidate);
        }
        candidate =
            candidate
                .checked_add(step)
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: format!("advancing recurrence candidate past {candidate}"),
                })?;
    }

    Err(DomainError::RecurrenceOverflow {
        anchor,
        frequency_days: frequency.days(),
        reference,
    })
}
