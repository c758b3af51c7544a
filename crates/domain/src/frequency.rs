// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A collection frequency.
///
/// Frequencies are a closed set of supported cycles. Arbitrary day counts
/// are rejected at the boundary rather than carried through the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Collected every 7 days.
    Weekly,
    /// Collected every 14 days.
    Fortnightly,
    /// Collected every 21 days.
    ThreeWeekly,
}

impl Frequency {
    /// Returns the cycle length in days.
    #[must_use]
    pub const fn days(self) -> u16 {
        match self {
            Self::Weekly => 7,
            Self::Fortnightly => 14,
            Self::ThreeWeekly => 21,
        }
    }

    /// Builds a frequency from a cycle length in days.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFrequency` for any day count outside
    /// the supported set {7, 14, 21}.
    pub const fn from_days(days: u16) -> Result<Self, DomainError> {
        match days {
            7 => Ok(Self::Weekly),
            14 => Ok(Self::Fortnightly),
            21 => Ok(Self::ThreeWeekly),
            _ => Err(DomainError::InvalidFrequency { days }),
        }
    }

    /// Returns the storage label for this frequency.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Fortnightly => "fortnightly",
            Self::ThreeWeekly => "three_weekly",
        }
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "fortnightly" => Ok(Self::Fortnightly),
            "three_weekly" => Ok(Self::ThreeWeekly),
            _ => Err(DomainError::InvalidFrequencyLabel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
