// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route catalogue mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use kerbside_domain::{RouteArea, weekday_name};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::route_areas;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a route area into the catalogue.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `route_area` - The route area to insert
///
/// # Returns
///
/// The generated `route_area_id`.
///
/// # Errors
///
/// Returns an error if the insert or prefix serialization fails.
pub fn insert_route_area(
    conn: &mut _,
    route_area: &RouteArea,
) -> Result<i64, PersistenceError> {
    let prefixes_json: String = serde_json::to_string(route_area.prefixes())?;

    diesel::insert_into(route_areas::table)
        .values((
            route_areas::area_name.eq(route_area.area_name()),
            route_areas::weekday.eq(weekday_name(route_area.weekday())),
            route_areas::slot.eq(route_area.slot().as_str()),
            route_areas::prefixes_json.eq(&prefixes_json),
            route_areas::is_active.eq(i32::from(route_area.is_active())),
            route_areas::sort_order.eq(route_area.sort_order()),
        ))
        .execute(conn)?;

    let route_area_id: i64 = conn.get_last_insert_rowid()?;
    debug!(route_area_id, area_name = route_area.area_name(), "Inserted route area");
    Ok(route_area_id)
}
}

backend_fn! {
/// Activates or deactivates a route area.
///
/// # Errors
///
/// Returns `NotFound` if no route area carries the given ID.
pub fn set_route_area_active(
    conn: &mut _,
    route_area_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        route_areas::table.filter(route_areas::route_area_id.eq(route_area_id)),
    )
    .set(route_areas::is_active.eq(i32::from(is_active)))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Route area {route_area_id} not found"
        )));
    }
    Ok(())
}
}
