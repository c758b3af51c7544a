// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kerbside_domain::Subscription;
use kerbside_ledger::CollectionLogEntry;

/// The ledger side effect of a transition.
///
/// At most one ledger operation accompanies any transition: recording a
/// collection appends, undoing pops the most recent entry, and every
/// other command leaves the ledger alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerOp {
    /// No ledger change.
    None,
    /// Append a new entry.
    Append(CollectionLogEntry),
    /// Remove the most recent entry for the subscription.
    PopLast {
        /// The identifier of the entry being removed, when known.
        entry_id: Option<i64>,
    },
}

/// The result of a successful transition.
///
/// Transitions are atomic: the subscription update and the ledger
/// operation must be persisted in one transaction or not at all. A ledger
/// entry written without the matching date update (or vice versa) is a
/// correctness bug, not an acceptable failure mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The subscription after the transition.
    pub new_subscription: Subscription,
    /// The ledger operation accompanying the transition.
    pub ledger_op: LedgerOp,
}
