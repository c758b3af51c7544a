// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk route reassignment planning.
//!
//! The batch scans subscriptions, re-runs the route matcher against each
//! postcode, and classifies every row as updated, skipped, or unmatched.
//! Planning is pure and per-row; the API layer decides whether a planned
//! update is written (apply) or only reported (dry run). Rows are
//! independent: one row's failure never aborts the batch, and re-running
//! with the same filter picks up the remainder.

use crate::error::CoreError;
use kerbside_domain::{
    RouteArea, RouteMatch, Slot, Subscription, SubscriptionStatus, match_postcode,
};
use time::{Date, Weekday};

/// The hard cap on rows a single batch invocation may scan.
///
/// `force` can overwrite ops-curated route overrides, so a single
/// invocation's blast radius is bounded no matter what limit the caller
/// asks for.
pub const MAX_REASSIGN_LIMIT: usize = 500;

/// Options controlling a bulk reassignment batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignOptions {
    /// Maximum rows to scan (clamped to [`MAX_REASSIGN_LIMIT`]).
    pub limit: usize,
    /// Report planned changes without writing anything.
    pub dry_run: bool,
    /// Overwrite rows that already have a route assigned.
    pub force: bool,
    /// Recompute the next collection date even when the route is
    /// unchanged.
    pub recompute_next: bool,
    /// Statuses to include in the scan.
    pub statuses: Vec<SubscriptionStatus>,
}

impl ReassignOptions {
    /// Returns the limit after clamping to [`MAX_REASSIGN_LIMIT`].
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.min(MAX_REASSIGN_LIMIT)
    }
}

impl Default for ReassignOptions {
    fn default() -> Self {
        Self {
            limit: MAX_REASSIGN_LIMIT,
            dry_run: true,
            force: false,
            recompute_next: false,
            statuses: vec![SubscriptionStatus::Active, SubscriptionStatus::Trialing],
        }
    }
}

/// The classification of one scanned row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// A route was (or would be) written.
    Updated,
    /// The row already has a route and `force` is off; left untouched.
    Skipped,
    /// No active route covers the postcode; left untouched.
    NoMatch,
}

impl RowOutcome {
    /// Returns the wire label for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Skipped => "skipped",
            Self::NoMatch => "no_match",
        }
    }
}

/// The route fields a planned update would write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChange {
    /// The new route area name.
    pub route_area: String,
    /// The new route day.
    pub route_day: Weekday,
    /// The new route slot.
    pub route_slot: Slot,
    /// The new next collection date, when it is being touched.
    pub next_collection_date: Option<Date>,
}

/// One planned row of a bulk reassignment batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRow {
    /// The subscription the row refers to.
    pub subscription_id: Option<i64>,
    /// The row classification.
    pub outcome: RowOutcome,
    /// The change an `Updated` row would write.
    pub change: Option<PlannedChange>,
    /// The full new subscription state for an `Updated` row, ready for
    /// the persistence layer under apply mode.
    pub new_subscription: Option<Subscription>,
}

/// Batch totals, accumulated by the caller over planned rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReassignSummary {
    /// Rows scanned.
    pub scanned: u32,
    /// Rows updated (or would-be updated under dry run).
    pub updated: u32,
    /// Rows with no matching route.
    pub no_match: u32,
    /// Rows skipped because a route was already assigned.
    pub skipped: u32,
}

impl ReassignSummary {
    /// Folds one row outcome into the totals.
    pub const fn record(&mut self, outcome: RowOutcome) {
        self.scanned += 1;
        match outcome {
            RowOutcome::Updated => self.updated += 1,
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::NoMatch => self.no_match += 1,
        }
    }
}

/// Plans the reassignment of a single subscription.
///
/// Runs the route matcher against the subscription's postcode and
/// classifies the row. Planning never mutates the input; the returned
/// `new_subscription` is what the persistence layer writes under apply
/// mode.
///
/// Rules:
/// - No match: `NoMatch`, subscription untouched.
/// - Match, route already assigned, `force` off: `Skipped`, untouched.
/// - Otherwise `Updated`: the default match's area/day/slot are planned.
///   The next collection date is planned when the route area actually
///   changes or `recompute_next` is set; otherwise the existing date is
///   kept.
///
/// # Arguments
///
/// * `subscription` - The subscription to plan for
/// * `catalogue` - The route catalogue
/// * `force` - Overwrite existing route assignments
/// * `recompute_next` - Recompute the next date even on an unchanged route
/// * `reference` - The reference date for next-date computation
///
/// # Errors
///
/// Returns an error only if date arithmetic fails while computing a
/// match's next date.
pub fn plan_reassignment(
    subscription: &Subscription,
    catalogue: &[RouteArea],
    force: bool,
    recompute_next: bool,
    reference: Date,
) -> Result<PlannedRow, CoreError> {
    let result = match_postcode(&subscription.postcode, catalogue, reference)?;

    let Some(default) = result.default else {
        return Ok(PlannedRow {
            subscription_id: subscription.subscription_id,
            outcome: RowOutcome::NoMatch,
            change: None,
            new_subscription: None,
        });
    };

    if subscription.route_area.is_some() && !force {
        return Ok(PlannedRow {
            subscription_id: subscription.subscription_id,
            outcome: RowOutcome::Skipped,
            change: None,
            new_subscription: None,
        });
    }

    let route_changed: bool = subscription.route_area.as_deref() != Some(default.area_name.as_str());
    let planned_next: Option<Date> = if route_changed || recompute_next {
        Some(default.next_date)
    } else {
        None
    };

    let new_subscription: Subscription = apply_change(subscription, &default, planned_next);

    Ok(PlannedRow {
        subscription_id: subscription.subscription_id,
        outcome: RowOutcome::Updated,
        change: Some(PlannedChange {
            route_area: default.area_name.clone(),
            route_day: default.weekday,
            route_slot: default.slot,
            next_collection_date: planned_next,
        }),
        new_subscription: Some(new_subscription),
    })
}

fn apply_change(
    subscription: &Subscription,
    matched: &RouteMatch,
    planned_next: Option<Date>,
) -> Subscription {
    let mut new_subscription: Subscription = subscription.clone();
    new_subscription.route_area = Some(matched.area_name.clone());
    new_subscription.route_day = Some(matched.weekday);
    new_subscription.route_slot = Some(matched.slot);
    if let Some(next) = planned_next {
        new_subscription.next_collection_date = Some(next);
    }
    new_subscription
}
