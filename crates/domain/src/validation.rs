// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation shared by the API boundary and batch jobs.

use crate::error::DomainError;
use crate::route_match::RouteArea;
use time::{Date, Weekday};

/// The maximum number of extra bags a subscription may carry.
pub const MAX_EXTRA_BAGS: u8 = 10;

/// Validates an extra bag count.
///
/// # Errors
///
/// Returns `DomainError::InvalidExtraBags` if the count exceeds
/// [`MAX_EXTRA_BAGS`].
pub const fn validate_extra_bags(count: u8) -> Result<(), DomainError> {
    if count > MAX_EXTRA_BAGS {
        return Err(DomainError::InvalidExtraBags { count });
    }
    Ok(())
}

/// Validates a pause window.
///
/// The window is inclusive on both ends; a start after the end is
/// rejected. Open-ended windows (either side missing) are valid.
///
/// # Errors
///
/// Returns `DomainError::InvalidPauseWindow` if both ends are present and
/// the start is after the end.
pub fn validate_pause_window(from: Option<Date>, to: Option<Date>) -> Result<(), DomainError> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(DomainError::InvalidPauseWindow { from, to });
        }
    }
    Ok(())
}

/// Validates that a requested route day matches the configured weekday of
/// the named route area.
///
/// The route day stored on a subscription is a projection of the area's
/// weekday; this check prevents the two from drifting apart when a route
/// assignment is written.
///
/// # Arguments
///
/// * `area_name` - The route area the subscription is being assigned to
/// * `requested_day` - The weekday being written onto the subscription
/// * `catalogue` - The route catalogue
///
/// # Errors
///
/// Returns `DomainError::UnknownRouteArea` if no catalogue entry carries
/// the area name, or `DomainError::RouteDayMismatch` if the area runs on
/// a different weekday.
pub fn validate_route_day(
    area_name: &str,
    requested_day: Weekday,
    catalogue: &[RouteArea],
) -> Result<(), DomainError> {
    let area: &RouteArea = catalogue
        .iter()
        .find(|a| a.area_name() == area_name)
        .ok_or_else(|| DomainError::UnknownRouteArea(area_name.to_string()))?;

    if area.weekday() != requested_day {
        return Err(DomainError::RouteDayMismatch {
            area: area_name.to_string(),
            configured: area.weekday(),
            requested: requested_day,
        });
    }
    Ok(())
}
