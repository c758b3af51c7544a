// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Issue lookups.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::IssueRow;
use crate::diesel_schema::issues;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves an issue by ID.
///
/// # Errors
///
/// Returns `NotFound` if no issue carries the given ID.
pub fn get_issue(conn: &mut _, issue_id: i64) -> Result<IssueRow, PersistenceError> {
    issues::table
        .filter(issues::issue_id.eq(issue_id))
        .first::<IssueRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Issue {issue_id} not found")))
}
}

backend_fn! {
/// Lists all issues raised against a run, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_issues_for_run(
    conn: &mut _,
    run_id: i64,
) -> Result<Vec<IssueRow>, PersistenceError> {
    Ok(issues::table
        .filter(issues::run_id.eq(run_id))
        .order(issues::issue_id.asc())
        .load::<IssueRow>(conn)?)
}
}
