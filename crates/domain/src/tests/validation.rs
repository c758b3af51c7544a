// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use crate::{
    DomainError, RouteArea, Slot, validate_extra_bags, validate_pause_window, validate_route_day,
};
use time::Weekday;
use time::macros::date;

#[test]
fn test_extra_bags_range() {
    assert!(validate_extra_bags(0).is_ok());
    assert!(validate_extra_bags(10).is_ok());
    assert!(matches!(
        validate_extra_bags(11),
        Err(DomainError::InvalidExtraBags { count: 11 })
    ));
}

#[test]
fn test_pause_window_ordering() {
    assert!(validate_pause_window(None, None).is_ok());
    assert!(validate_pause_window(Some(date!(2024 - 03 - 01)), None).is_ok());
    assert!(validate_pause_window(None, Some(date!(2024 - 03 - 01))).is_ok());
    assert!(
        validate_pause_window(Some(date!(2024 - 03 - 01)), Some(date!(2024 - 03 - 01))).is_ok()
    );
    assert!(matches!(
        validate_pause_window(Some(date!(2024 - 03 - 02)), Some(date!(2024 - 03 - 01))),
        Err(DomainError::InvalidPauseWindow { .. })
    ));
}

#[test]
fn test_route_day_must_match_area_weekday() {
    let catalogue: Vec<RouteArea> = vec![RouteArea::new(
        "Porthcawl",
        Weekday::Monday,
        Slot::Am,
        &[String::from("CF36")],
        0,
    )];

    assert!(validate_route_day("Porthcawl", Weekday::Monday, &catalogue).is_ok());
    assert!(matches!(
        validate_route_day("Porthcawl", Weekday::Tuesday, &catalogue),
        Err(DomainError::RouteDayMismatch { .. })
    ));
}

#[test]
fn test_route_day_unknown_area() {
    let catalogue: Vec<RouteArea> = Vec::new();
    assert!(matches!(
        validate_route_day("Nowhere", Weekday::Monday, &catalogue),
        Err(DomainError::UnknownRouteArea(_))
    ));
}
