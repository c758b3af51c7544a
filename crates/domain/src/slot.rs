// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A collection slot within a route day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Slot {
    /// Morning round.
    Am,
    /// Afternoon round.
    Pm,
    /// No slot restriction.
    #[default]
    Any,
}

impl Slot {
    /// Parses a slot label.
    ///
    /// An empty or absent label means "no slot restriction" and parses to
    /// `Any`; this mirrors how legacy route data left the field blank.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlot` for any other unrecognized label.
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        match label.trim().to_uppercase().as_str() {
            "" | "ANY" => Ok(Self::Any),
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            _ => Err(DomainError::InvalidSlot(label.to_string())),
        }
    }

    /// Returns the wire label for this slot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
            Self::Any => "ANY",
        }
    }

    /// Returns the ordering index used for match sorting (AM=1, PM=2, ANY=3).
    #[must_use]
    pub const fn sort_index(self) -> u8 {
        match self {
            Self::Am => 1,
            Self::Pm => 2,
            Self::Any => 3,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
