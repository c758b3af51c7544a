// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;

/// A driver-raised exception against a stop within a run.
///
/// Issues are created during a run and closed exactly once by an ops
/// action. `resolved_at` is `None` while the issue is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Canonical numeric identifier assigned by the database.
    pub issue_id: Option<i64>,
    /// The run the issue was raised against.
    pub run_id: i64,
    /// The subscription the stop belongs to, when known.
    pub subscription_id: Option<i64>,
    /// The reason category (e.g., "bin not out", "access blocked").
    pub reason: String,
    /// Free-text details from the driver.
    pub details: Option<String>,
    /// The action ops took to resolve the issue.
    pub resolution_action: Option<String>,
    /// The outcome of the resolution.
    pub resolution_outcome: Option<String>,
    /// Resolution timestamp (ISO 8601); `None` while open.
    pub resolved_at: Option<String>,
    /// Creation timestamp (ISO 8601), assigned by the database.
    pub created_at: Option<String>,
}

impl Issue {
    /// Returns whether this issue has been resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// Validates the action note of an issue resolution.
///
/// Closing an issue requires a non-empty action note; a blank note would
/// leave no record of what was actually done.
///
/// # Errors
///
/// Returns `CoreError::EmptyResolutionAction` if the note is empty after
/// trimming.
pub fn validate_resolution_action(action: &str) -> Result<(), CoreError> {
    if action.trim().is_empty() {
        return Err(CoreError::EmptyResolutionAction);
    }
    Ok(())
}
