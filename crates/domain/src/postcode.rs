// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A normalized postcode.
///
/// Postcodes are normalized on construction: uppercase, internal
/// whitespace collapsed to single spaces, trimmed. All matching and
/// storage goes through the normalized form so `"cf36  5aa"` and
/// `"CF36 5AA"` are the same postcode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Postcode {
    /// The normalized postcode value.
    value: String,
}

impl Postcode {
    /// Creates a new `Postcode`, normalizing the raw input.
    ///
    /// # Arguments
    ///
    /// * `raw` - The postcode as entered by a customer or operator
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyPostcode` if nothing remains after
    /// normalization.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let value: String = Self::normalize(raw);
        if value.is_empty() {
            return Err(DomainError::EmptyPostcode);
        }
        Ok(Self { value })
    }

    /// Normalizes a raw postcode or postcode prefix.
    ///
    /// Uppercases, collapses internal whitespace runs to single spaces,
    /// and trims. Shared with route prefix handling so both sides of a
    /// prefix comparison use the same form.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        raw.split_whitespace()
            .collect::<Vec<&str>>()
            .join(" ")
            .to_uppercase()
    }

    /// Returns the normalized postcode value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Checks whether this postcode starts with a normalized prefix.
    #[must_use]
    pub fn matches_prefix(&self, normalized_prefix: &str) -> bool {
        !normalized_prefix.is_empty() && self.value.starts_with(normalized_prefix)
    }
}

impl std::fmt::Display for Postcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
