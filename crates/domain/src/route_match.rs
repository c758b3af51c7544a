// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Postcode to route-area matching.
//!
//! Route areas are reference data owned by ops; the matcher is read-only
//! over the catalogue. Matching is prefix-based and deliberately not
//! exclusive: two active routes (say, AM and PM slots on the same day) may
//! both cover a postcode, and the caller gets the full ordered list plus a
//! deterministic default.

use crate::calendar::{next_occurrence_of_weekday, weekday_index};
use crate::error::DomainError;
use crate::postcode::Postcode;
use crate::slot::Slot;
use time::{Date, Weekday};

/// A named operational route.
///
/// Reference data edited by ops and read-only to the engine. Prefixes are
/// normalized on construction so matching never depends on how the
/// catalogue row was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteArea {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the route area has not been persisted yet.
    route_area_id: Option<i64>,
    /// The area label (e.g., "Porthcawl").
    area_name: String,
    /// The weekday this route runs.
    weekday: Weekday,
    /// The slot this route runs in.
    slot: Slot,
    /// Normalized postcode prefixes covered by this route.
    prefixes: Vec<String>,
    /// Whether this route is currently operational.
    is_active: bool,
    /// Display ordering for ops screens.
    sort_order: i32,
}

impl RouteArea {
    /// Creates a new `RouteArea` without a persisted ID.
    ///
    /// Prefixes are normalized (uppercase, collapsed whitespace); empty
    /// prefixes are dropped. New areas start active.
    #[must_use]
    pub fn new(
        area_name: &str,
        weekday: Weekday,
        slot: Slot,
        prefixes: &[String],
        sort_order: i32,
    ) -> Self {
        Self {
            route_area_id: None,
            area_name: area_name.trim().to_string(),
            weekday,
            slot,
            prefixes: Self::normalize_prefixes(prefixes),
            is_active: true,
            sort_order,
        }
    }

    /// Creates a `RouteArea` with an existing persisted ID.
    #[must_use]
    pub fn with_id(
        route_area_id: i64,
        area_name: &str,
        weekday: Weekday,
        slot: Slot,
        prefixes: &[String],
        is_active: bool,
        sort_order: i32,
    ) -> Self {
        Self {
            route_area_id: Some(route_area_id),
            area_name: area_name.trim().to_string(),
            weekday,
            slot,
            prefixes: Self::normalize_prefixes(prefixes),
            is_active,
            sort_order,
        }
    }

    fn normalize_prefixes(prefixes: &[String]) -> Vec<String> {
        prefixes
            .iter()
            .map(|p| Postcode::normalize(p))
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Returns this route area with the active flag cleared.
    ///
    /// Used when catalogue data arrives already marked inactive (e.g.,
    /// from a CSV import) before it has a persisted ID.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn route_area_id(&self) -> Option<i64> {
        self.route_area_id
    }

    /// Returns the area label.
    #[must_use]
    pub fn area_name(&self) -> &str {
        &self.area_name
    }

    /// Returns the weekday this route runs.
    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Returns the slot this route runs in.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    /// Returns the normalized postcode prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns whether this route is currently operational.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the display sort order.
    #[must_use]
    pub const fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Checks whether a postcode falls inside this route's prefix set.
    #[must_use]
    pub fn covers(&self, postcode: &Postcode) -> bool {
        self.prefixes.iter().any(|p| postcode.matches_prefix(p))
    }
}

/// One route that matched a postcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched area label.
    pub area_name: String,
    /// The weekday the route runs.
    pub weekday: Weekday,
    /// The slot the route runs in.
    pub slot: Slot,
    /// The first collection date on or after the reference date.
    pub next_date: Date,
}

/// The result of matching a postcode against the route catalogue.
///
/// An unmatched postcode is a normal outcome ("we don't cover you yet"),
/// never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatchResult {
    /// Whether any active route covers the postcode.
    pub in_area: bool,
    /// All matching routes, ordered by weekday, slot, then area name.
    pub matches: Vec<RouteMatch>,
    /// The first match after ordering; written onto new subscriptions
    /// unless ops overrides it.
    pub default: Option<RouteMatch>,
}

/// Matches a postcode against the route catalogue.
///
/// Only active routes participate. Matches are ordered by weekday index
/// (Monday=1 … Sunday=7), then slot index (AM=1, PM=2, ANY=3), then area
/// name; the default is the first element after the sort. Each match
/// carries the next occurrence of the route's weekday on or after the
/// reference date, so a caller can show "your first collection is on …"
/// before any subscription exists.
///
/// # Arguments
///
/// * `postcode` - The normalized postcode to match
/// * `catalogue` - The route catalogue
/// * `reference` - The date to compute each match's next date from
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if a next date cannot be
/// represented; matching itself never fails.
pub fn match_postcode(
    postcode: &Postcode,
    catalogue: &[RouteArea],
    reference: Date,
) -> Result<RouteMatchResult, DomainError> {
    let mut matches: Vec<RouteMatch> = Vec::new();

    for route in catalogue {
        if !route.is_active() || !route.covers(postcode) {
            continue;
        }
        let next_date: Date = next_occurrence_of_weekday(reference, route.weekday())?;
        matches.push(RouteMatch {
            area_name: route.area_name().to_string(),
            weekday: route.weekday(),
            slot: route.slot(),
            next_date,
        });
    }

    matches.sort_by(|a, b| {
        weekday_index(a.weekday)
            .cmp(&weekday_index(b.weekday))
            .then(a.slot.sort_index().cmp(&b.slot.sort_index()))
            .then(a.area_name.cmp(&b.area_name))
    });

    let default: Option<RouteMatch> = matches.first().cloned();

    Ok(RouteMatchResult {
        in_area: default.is_some(),
        matches,
        default,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn porthcawl(slot: Slot, weekday: Weekday) -> RouteArea {
        RouteArea::new(
            "Porthcawl",
            weekday,
            slot,
            &[String::from("CF36"), String::from("CF33")],
            10,
        )
    }

    #[test]
    fn test_match_normalizes_postcode_case_and_spacing() {
        let postcode: Postcode = Postcode::new("cf36  5aa").unwrap();
        assert_eq!(postcode.value(), "CF36 5AA");

        let catalogue: Vec<RouteArea> = vec![porthcawl(Slot::Am, Weekday::Monday)];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert!(result.in_area);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.default.unwrap().area_name, "Porthcawl");
    }

    #[test]
    fn test_unmatched_postcode_is_a_normal_outcome() {
        let postcode: Postcode = Postcode::new("SA1 1AA").unwrap();
        let catalogue: Vec<RouteArea> = vec![porthcawl(Slot::Am, Weekday::Monday)];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert!(!result.in_area);
        assert!(result.matches.is_empty());
        assert!(result.default.is_none());
    }

    #[test]
    fn test_inactive_routes_do_not_match() {
        let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
        let catalogue: Vec<RouteArea> = vec![RouteArea::with_id(
            1,
            "Porthcawl",
            Weekday::Monday,
            Slot::Am,
            &[String::from("CF36")],
            false,
            10,
        )];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert!(!result.in_area);
    }

    #[test]
    fn test_am_sorts_before_pm_on_the_same_day() {
        let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
        let catalogue: Vec<RouteArea> = vec![
            porthcawl(Slot::Pm, Weekday::Monday),
            porthcawl(Slot::Am, Weekday::Monday),
        ];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].slot, Slot::Am);
        assert_eq!(result.matches[1].slot, Slot::Pm);
        assert_eq!(result.default.unwrap().slot, Slot::Am);
    }

    #[test]
    fn test_earlier_weekday_wins_over_slot() {
        let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
        let catalogue: Vec<RouteArea> = vec![
            porthcawl(Slot::Am, Weekday::Friday),
            porthcawl(Slot::Pm, Weekday::Tuesday),
        ];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert_eq!(result.matches[0].weekday, Weekday::Tuesday);
        assert_eq!(result.matches[1].weekday, Weekday::Friday);
    }

    #[test]
    fn test_area_name_breaks_remaining_ties() {
        let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
        let bridgend: RouteArea = RouteArea::new(
            "Bridgend",
            Weekday::Monday,
            Slot::Am,
            &[String::from("CF36")],
            20,
        );
        let catalogue: Vec<RouteArea> = vec![porthcawl(Slot::Am, Weekday::Monday), bridgend];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert_eq!(result.matches[0].area_name, "Bridgend");
        assert_eq!(result.matches[1].area_name, "Porthcawl");
    }

    #[test]
    fn test_match_next_date_is_zero_offset_on_route_day() {
        // 2024-01-01 is a Monday; a Monday route's first collection is
        // that same day, not the following week.
        let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
        let catalogue: Vec<RouteArea> = vec![porthcawl(Slot::Am, Weekday::Monday)];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert_eq!(result.default.unwrap().next_date, date!(2024 - 01 - 01));
    }

    #[test]
    fn test_match_next_date_rolls_forward_within_week() {
        let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
        let catalogue: Vec<RouteArea> = vec![porthcawl(Slot::Am, Weekday::Thursday)];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert_eq!(result.default.unwrap().next_date, date!(2024 - 01 - 04));
    }

    #[test]
    fn test_prefix_normalization_in_catalogue() {
        let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
        let catalogue: Vec<RouteArea> = vec![RouteArea::new(
            "Porthcawl",
            Weekday::Monday,
            Slot::Any,
            &[String::from("  cf36 ")],
            0,
        )];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert!(result.in_area);
    }

    #[test]
    fn test_empty_prefix_never_matches_everything() {
        let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
        let catalogue: Vec<RouteArea> = vec![RouteArea::new(
            "Broken",
            Weekday::Monday,
            Slot::Any,
            &[String::new()],
            0,
        )];
        let result: RouteMatchResult =
            match_postcode(&postcode, &catalogue, date!(2024 - 01 - 01)).unwrap();

        assert!(!result.in_area);
    }
}
