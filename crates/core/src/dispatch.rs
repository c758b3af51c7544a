// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily run dispatch: run keys, due-set grouping, and due-counts.
//!
//! A daily run is the unit of dispatch a driver is assigned to. Runs are
//! keyed by `(run_date, route_area, route_day, route_slot)`; at most one
//! run exists per key, enforced by a unique index at the storage layer so
//! two ops users opening the same run in the same instant still produce
//! one row.

use kerbside_domain::{Slot, Subscription};
use std::collections::BTreeMap;
use time::{Date, Weekday};

/// Label used to group due subscriptions that have no route assigned.
///
/// Unrouted subscriptions must stay visible to the day planner rather
/// than silently vanishing from the counts.
pub const UNROUTED_AREA_LABEL: &str = "UNROUTED";

/// The composite key identifying a daily run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunKey {
    /// The date the run goes out.
    pub run_date: Date,
    /// The route day.
    pub route_day: Weekday,
    /// The route area name.
    pub route_area: String,
    /// The route slot.
    pub route_slot: Slot,
}

impl RunKey {
    /// Returns the `"area|slot"` grouping label for this key.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}|{}", self.route_area, self.route_slot.as_str())
    }
}

/// One dispatch unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRun {
    /// Canonical numeric identifier assigned by the database.
    /// `None` indicates the run has not been persisted yet.
    pub run_id: Option<i64>,
    /// The date the run goes out.
    pub run_date: Date,
    /// The route day.
    pub route_day: Weekday,
    /// The route area name.
    pub route_area: String,
    /// The route slot.
    pub route_slot: Slot,
    /// The assigned vehicle, if any.
    pub vehicle: Option<String>,
    /// The assigned staff members.
    pub staff: Vec<String>,
    /// Free-text notes for the run.
    pub notes: Option<String>,
}

/// The category a due stop belongs to.
///
/// The categories are mutually exclusive partitions of the same due-set.
/// This engine sources the recurring partition from subscriptions; the
/// one-off and quote partitions are fed by the booking collaborators that
/// sit outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueKind {
    /// A recurring subscription collection.
    Recurring,
    /// A one-off booked collection.
    OneOff,
    /// A quote-driven visit.
    Quote,
}

/// One stop that is due on a given date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueStop {
    /// The route area label (or [`UNROUTED_AREA_LABEL`]).
    pub route_area: String,
    /// The route slot.
    pub route_slot: Slot,
    /// The due-set partition this stop belongs to.
    pub kind: DueKind,
}

/// Due-count breakdown for one `"area|slot"` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DueBreakdown {
    /// Total stops due.
    pub total: u32,
    /// Recurring subscription stops.
    pub recurring: u32,
    /// One-off booking stops.
    pub one_off: u32,
    /// Quote-driven visit stops.
    pub quote: u32,
}

/// Builds the due stops for a run date from a set of subscriptions.
///
/// A subscription contributes a stop when [`Subscription::is_due_on`]
/// holds: its status counts for scheduling, it is not paused on the date,
/// and its next collection date equals the run date. Subscriptions with
/// no route assignment are grouped under [`UNROUTED_AREA_LABEL`].
#[must_use]
pub fn due_stops(subscriptions: &[Subscription], run_date: Date) -> Vec<DueStop> {
    subscriptions
        .iter()
        .filter(|s| s.is_due_on(run_date))
        .map(|s| DueStop {
            route_area: s
                .route_area
                .clone()
                .unwrap_or_else(|| String::from(UNROUTED_AREA_LABEL)),
            route_slot: s.route_slot.unwrap_or_default(),
            kind: DueKind::Recurring,
        })
        .collect()
}

/// Groups due stops into per-`"area|slot"` breakdowns.
///
/// The returned map is ordered by label so day-planner output is stable.
#[must_use]
pub fn due_counts(stops: &[DueStop]) -> BTreeMap<String, DueBreakdown> {
    let mut counts: BTreeMap<String, DueBreakdown> = BTreeMap::new();

    for stop in stops {
        let label: String = format!("{}|{}", stop.route_area, stop.route_slot.as_str());
        let breakdown: &mut DueBreakdown = counts.entry(label).or_default();
        breakdown.total += 1;
        match stop.kind {
            DueKind::Recurring => breakdown.recurring += 1,
            DueKind::OneOff => breakdown.one_off += 1,
            DueKind::Quote => breakdown.quote += 1,
        }
    }

    counts
}
