// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Issue creation and resolution.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::issues;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a new open issue against a run.
///
/// # Returns
///
/// The generated `issue_id`.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., the run does not exist).
pub fn insert_issue(
    conn: &mut _,
    run_id: i64,
    subscription_id: Option<i64>,
    reason: &str,
    details: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(issues::table)
        .values((
            issues::run_id.eq(run_id),
            issues::subscription_id.eq(subscription_id),
            issues::reason.eq(reason),
            issues::details.eq(details),
        ))
        .execute(conn)?;

    let issue_id: i64 = conn.get_last_insert_rowid()?;
    debug!(issue_id, run_id, reason, "Raised issue");
    Ok(issue_id)
}
}

backend_fn! {
/// Resolves an open issue.
///
/// The update is guarded on `resolved_at IS NULL`, so an issue is closed
/// exactly once even if two ops users submit a resolution concurrently;
/// the second submission updates zero rows.
///
/// # Returns
///
/// The number of rows updated: 1 when this call closed the issue, 0 when
/// it was already closed (or does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn resolve_issue(
    conn: &mut _,
    issue_id: i64,
    action: &str,
    outcome: &str,
    resolved_at: &str,
) -> Result<usize, PersistenceError> {
    let updated: usize = diesel::update(
        issues::table
            .filter(issues::issue_id.eq(issue_id))
            .filter(issues::resolved_at.is_null()),
    )
    .set((
        issues::resolution_action.eq(action),
        issues::resolution_outcome.eq(outcome),
        issues::resolved_at.eq(resolved_at),
    ))
    .execute(conn)?;

    if updated == 1 {
        info!(issue_id, "Resolved issue");
    }
    Ok(updated)
}
}
