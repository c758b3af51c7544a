// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kerbside_domain::Slot;
use time::{Date, Weekday};

/// A command represents intent against a single subscription as data only.
///
/// Commands are the only way to change a subscription's scheduling state.
/// Applying a command never touches storage; it produces a
/// [`crate::TransitionResult`] that the persistence layer executes
/// atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a completed collection.
    ///
    /// Advances the cycle from the *actual* collection date, not the
    /// previously scheduled date, so a late or early collection re-anchors
    /// the cycle going forward.
    RecordCollection {
        /// The date the collection happened.
        collected_date: Date,
    },
    /// Undo the most recent recorded collection, restoring the next
    /// collection date that was in force before it.
    UndoLastCollection,
    /// Assign a route and first collection date.
    ///
    /// Used at creation (from the route matcher's default), by the bulk
    /// reassignment batch, and by ops overrides.
    AssignRoute {
        /// The route area name.
        route_area: String,
        /// The route day (the area's configured weekday).
        route_day: Weekday,
        /// The route slot.
        route_slot: Slot,
        /// The next collection date to set.
        next_date: Date,
    },
    /// Explicitly override the next collection date.
    OverrideNextCollection {
        /// The new next collection date.
        next_date: Date,
    },
    /// Set the pause window (inclusive on both ends).
    SetPauseWindow {
        /// The window start.
        from: Date,
        /// The window end.
        to: Date,
    },
    /// Clear the pause window.
    ClearPauseWindow,
    /// Cancel the subscription (soft delete via status).
    Cancel,
}
