// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::frequency::Frequency;
use crate::postcode::Postcode;
use crate::slot::Slot;
use crate::status::SubscriptionStatus;
use time::{Date, Weekday};

/// One customer's recurring collection service.
///
/// `subscription_id` is the canonical internal identifier, assigned by the
/// persistence layer on first save. Route fields are populated from the
/// route matcher at creation or by the bulk reassignment batch; the next
/// collection date is mutated only through ledger transitions or an
/// explicit ops override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// Optional to support creation before persistence.
    pub subscription_id: Option<i64>,
    /// The customer's name (informational, not unique).
    pub customer_name: String,
    /// The service postcode (normalized).
    pub postcode: Postcode,
    /// The service address.
    pub address: String,
    /// The collection frequency.
    pub frequency: Frequency,
    /// Extra bags collected each visit (0-10).
    pub extra_bags: u8,
    /// Whether the customer supplies their own bin.
    pub use_own_bin: bool,
    /// The assigned route area name, if any.
    pub route_area: Option<String>,
    /// The assigned route day. Derived from the route area's configured
    /// weekday; never edited independently of it.
    pub route_day: Option<Weekday>,
    /// The assigned route slot.
    pub route_slot: Option<Slot>,
    /// The next date this subscription is due for collection.
    pub next_collection_date: Option<Date>,
    /// Pause window start (inclusive).
    pub pause_from: Option<Date>,
    /// Pause window end (inclusive).
    pub pause_to: Option<Date>,
    /// The lifecycle status.
    pub status: SubscriptionStatus,
    /// Free-text notes for ops.
    pub ops_notes: Option<String>,
}

impl Subscription {
    /// Creates a new `Subscription` without a persisted ID.
    ///
    /// Route fields, pause window, and notes start empty; the caller
    /// assigns a route via the matcher before first save.
    #[must_use]
    pub const fn new(
        customer_name: String,
        postcode: Postcode,
        address: String,
        frequency: Frequency,
        extra_bags: u8,
        use_own_bin: bool,
        status: SubscriptionStatus,
    ) -> Self {
        Self {
            subscription_id: None,
            customer_name,
            postcode,
            address,
            frequency,
            extra_bags,
            use_own_bin,
            route_area: None,
            route_day: None,
            route_slot: None,
            next_collection_date: None,
            pause_from: None,
            pause_to: None,
            status,
            ops_notes: None,
        }
    }

    /// Creates a `Subscription` with an existing ID (from persistence).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        subscription_id: i64,
        customer_name: String,
        postcode: Postcode,
        address: String,
        frequency: Frequency,
        extra_bags: u8,
        use_own_bin: bool,
        route_area: Option<String>,
        route_day: Option<Weekday>,
        route_slot: Option<Slot>,
        next_collection_date: Option<Date>,
        pause_from: Option<Date>,
        pause_to: Option<Date>,
        status: SubscriptionStatus,
        ops_notes: Option<String>,
    ) -> Self {
        Self {
            subscription_id: Some(subscription_id),
            customer_name,
            postcode,
            address,
            frequency,
            extra_bags,
            use_own_bin,
            route_area,
            route_day,
            route_slot,
            next_collection_date,
            pause_from,
            pause_to,
            status,
            ops_notes,
        }
    }

    /// Checks whether this subscription is paused on a given date.
    ///
    /// The pause window is inclusive on both ends. A missing end is
    /// treated as unbounded on that side.
    #[must_use]
    pub fn is_paused_on(&self, date: Date) -> bool {
        match (self.pause_from, self.pause_to) {
            (Some(from), Some(to)) => date >= from && date <= to,
            (Some(from), None) => date >= from,
            (None, Some(to)) => date <= to,
            (None, None) => false,
        }
    }

    /// Checks whether this subscription is due for collection on a date.
    ///
    /// Due means: the status counts for scheduling, the subscription is
    /// not paused on the date, and the next collection date equals the
    /// date exactly. A paused subscription is excluded regardless of its
    /// next collection date.
    #[must_use]
    pub fn is_due_on(&self, date: Date) -> bool {
        self.status.counts_for_scheduling()
            && !self.is_paused_on(date)
            && self.next_collection_date == Some(date)
    }
}
