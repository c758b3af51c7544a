// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily run creation and assignment.
//!
//! Run creation is idempotent get-or-create over the dispatch key
//! `(run_date, route_area, route_day, route_slot)`. Uniqueness is owned
//! by the database index, not an application-level check-then-insert:
//! two ops users can open the same run within the same instant, and the
//! loser of the insert race treats the unique violation as "the run
//! already exists" and reads it back.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::DailyRunRow;
use crate::diesel_schema::daily_runs;
use crate::error::PersistenceError;
use crate::queries::runs::{find_daily_run_mysql, find_daily_run_sqlite};

backend_fn! {
/// Inserts a new daily run with no vehicle, staff, or notes.
///
/// # Errors
///
/// Returns `UniqueViolation` if a run already exists for the dispatch
/// key, or another error if the insert fails.
pub(crate) fn insert_daily_run(
    conn: &mut _,
    run_date: &str,
    route_day: &str,
    route_area: &str,
    route_slot: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(daily_runs::table)
        .values((
            daily_runs::run_date.eq(run_date),
            daily_runs::route_day.eq(route_day),
            daily_runs::route_area.eq(route_area),
            daily_runs::route_slot.eq(route_slot),
            daily_runs::staff_json.eq("[]"),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

/// Finds or creates the daily run for a dispatch key (`SQLite` version).
///
/// If the run exists it is returned unchanged; assignment of staff and
/// vehicle is a separate explicit update, never implied by ensure. A
/// creation race lost to a concurrent writer is resolved by re-reading
/// the row the winner created.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails for any reason other
/// than the uniqueness race.
pub fn ensure_daily_run_sqlite(
    conn: &mut SqliteConnection,
    run_date: &str,
    route_day: &str,
    route_area: &str,
    route_slot: &str,
) -> Result<DailyRunRow, PersistenceError> {
    if let Some(row) = find_daily_run_sqlite(conn, run_date, route_day, route_area, route_slot)? {
        debug!(run_id = row.run_id, "Daily run already exists");
        return Ok(row);
    }

    match insert_daily_run_sqlite(conn, run_date, route_day, route_area, route_slot) {
        Ok(run_id) => {
            info!(run_id, run_date, route_area, route_slot, "Created daily run");
        }
        Err(PersistenceError::UniqueViolation(_)) => {
            debug!(run_date, route_area, "Lost daily run creation race; reading existing row");
        }
        Err(e) => return Err(e),
    }

    find_daily_run_sqlite(conn, run_date, route_day, route_area, route_slot)?.ok_or_else(|| {
        PersistenceError::QueryFailed(format!(
            "Daily run for {run_date}/{route_area}/{route_day}/{route_slot} missing after creation"
        ))
    })
}

/// Finds or creates the daily run for a dispatch key (`MySQL` version).
///
/// # Errors
///
/// Returns an error if the lookup or insert fails for any reason other
/// than the uniqueness race.
pub fn ensure_daily_run_mysql(
    conn: &mut MysqlConnection,
    run_date: &str,
    route_day: &str,
    route_area: &str,
    route_slot: &str,
) -> Result<DailyRunRow, PersistenceError> {
    if let Some(row) = find_daily_run_mysql(conn, run_date, route_day, route_area, route_slot)? {
        debug!(run_id = row.run_id, "Daily run already exists");
        return Ok(row);
    }

    match insert_daily_run_mysql(conn, run_date, route_day, route_area, route_slot) {
        Ok(run_id) => {
            info!(run_id, run_date, route_area, route_slot, "Created daily run");
        }
        Err(PersistenceError::UniqueViolation(_)) => {
            debug!(run_date, route_area, "Lost daily run creation race; reading existing row");
        }
        Err(e) => return Err(e),
    }

    find_daily_run_mysql(conn, run_date, route_day, route_area, route_slot)?.ok_or_else(|| {
        PersistenceError::QueryFailed(format!(
            "Daily run for {run_date}/{route_area}/{route_day}/{route_slot} missing after creation"
        ))
    })
}

backend_fn! {
/// Attaches a vehicle and staff set to a run.
///
/// # Errors
///
/// Returns `NotFound` if no run carries the given ID.
pub fn update_run_assignment(
    conn: &mut _,
    run_id: i64,
    vehicle: Option<&str>,
    staff_json: &str,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(daily_runs::table.filter(daily_runs::run_id.eq(run_id)))
            .set((
                daily_runs::vehicle.eq(vehicle),
                daily_runs::staff_json.eq(staff_json),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Run {run_id} not found")));
    }
    Ok(())
}
}

backend_fn! {
/// Sets the free-text notes on a run.
///
/// # Errors
///
/// Returns `NotFound` if no run carries the given ID.
pub fn update_run_notes(
    conn: &mut _,
    run_id: i64,
    notes: Option<&str>,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(daily_runs::table.filter(daily_runs::run_id.eq(run_id)))
            .set(daily_runs::notes.eq(notes))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Run {run_id} not found")));
    }
    Ok(())
}
}
