// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kerbside_domain::{DomainError, SubscriptionStatus};

/// Errors that can occur during engine transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Undo was requested but the subscription has no ledger entries.
    ///
    /// This is a normal, reported condition: the caller asked to undo a
    /// collection that was never recorded.
    NoCollectionToUndo {
        /// The subscription the undo was requested for.
        subscription_id: Option<i64>,
    },
    /// The operation is not permitted in the subscription's current status.
    LifecycleViolation {
        /// The operation that was attempted.
        operation: &'static str,
        /// The subscription's current status.
        status: SubscriptionStatus,
    },
    /// An issue resolution was submitted without an action note.
    EmptyResolutionAction,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoCollectionToUndo { subscription_id } => match subscription_id {
                Some(id) => write!(f, "Subscription {id} has no collection to undo"),
                None => write!(f, "Subscription has no collection to undo"),
            },
            Self::LifecycleViolation { operation, status } => {
                write!(f, "Cannot {operation} a subscription with status '{status}'")
            }
            Self::EmptyResolutionAction => {
                write!(f, "Issue resolution requires a non-empty action note")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
