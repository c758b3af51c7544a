// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily run lookups.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::DailyRunRow;
use crate::diesel_schema::daily_runs;
use crate::error::PersistenceError;

backend_fn! {
/// Finds the daily run for a dispatch key, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_daily_run(
    conn: &mut _,
    run_date: &str,
    route_day: &str,
    route_area: &str,
    route_slot: &str,
) -> Result<Option<DailyRunRow>, PersistenceError> {
    Ok(daily_runs::table
        .filter(daily_runs::run_date.eq(run_date))
        .filter(daily_runs::route_day.eq(route_day))
        .filter(daily_runs::route_area.eq(route_area))
        .filter(daily_runs::route_slot.eq(route_slot))
        .first::<DailyRunRow>(conn)
        .optional()?)
}
}

backend_fn! {
/// Retrieves a daily run by ID.
///
/// # Errors
///
/// Returns `NotFound` if no run carries the given ID.
pub fn get_daily_run(conn: &mut _, run_id: i64) -> Result<DailyRunRow, PersistenceError> {
    daily_runs::table
        .filter(daily_runs::run_id.eq(run_id))
        .first::<DailyRunRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Run {run_id} not found")))
}
}

backend_fn! {
/// Lists all runs going out on a date, grouped the way the day planner
/// shows them.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_runs_on(conn: &mut _, run_date: &str) -> Result<Vec<DailyRunRow>, PersistenceError> {
    Ok(daily_runs::table
        .filter(daily_runs::run_date.eq(run_date))
        .order((daily_runs::route_area.asc(), daily_runs::route_slot.asc()))
        .load::<DailyRunRow>(conn)?)
}
}
