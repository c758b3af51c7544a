// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route catalogue reads.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::RouteAreaRow;
use crate::diesel_schema::route_areas;
use crate::error::PersistenceError;

backend_fn! {
/// Lists the route catalogue in display order.
///
/// The matcher itself ignores inactive routes; they are included here
/// only when ops asks for the full catalogue view.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_route_areas(
    conn: &mut _,
    include_inactive: bool,
) -> Result<Vec<RouteAreaRow>, PersistenceError> {
    let mut query = route_areas::table.into_boxed();
    if !include_inactive {
        query = query.filter(route_areas::is_active.eq(1));
    }
    Ok(query
        .order((route_areas::sort_order.asc(), route_areas::area_name.asc()))
        .load::<RouteAreaRow>(conn)?)
}
}
