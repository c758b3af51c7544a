// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle status of a subscription.
///
/// Statuses are a closed enumeration. Every piece of due-date logic that
/// asks "does this subscription count?" goes through
/// [`SubscriptionStatus::counts_for_scheduling`] rather than comparing
/// strings, so the membership rule lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paying and in service.
    #[default]
    Active,
    /// In a trial period; scheduled like an active subscription.
    Trialing,
    /// Explicitly paused by the customer or ops.
    Paused,
    /// Held by ops pending a decision.
    Hold,
    /// Payment overdue.
    PastDue,
    /// Payment failed permanently.
    Unpaid,
    /// Soft-deleted. History is retained; the record is never hard-deleted.
    Canceled,
}

impl SubscriptionStatus {
    /// Whether this status counts as active for scheduling purposes.
    ///
    /// Only `active` and `trialing` subscriptions appear in due-today
    /// computations and day-planner counts.
    #[must_use]
    pub const fn counts_for_scheduling(self) -> bool {
        matches!(self, Self::Active | Self::Trialing)
    }

    /// Returns the storage label for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::Paused => "paused",
            Self::Hold => "hold",
            Self::PastDue => "past_due",
            Self::Unpaid => "unpaid",
            Self::Canceled => "canceled",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "trialing" => Ok(Self::Trialing),
            "paused" => Ok(Self::Paused),
            "hold" => Ok(Self::Hold),
            "past_due" => Ok(Self::PastDue),
            "unpaid" => Ok(Self::Unpaid),
            "canceled" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
