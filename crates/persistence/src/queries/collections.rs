// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collection ledger reads.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::CollectionLogRow;
use crate::diesel_schema::collection_log;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves the most recent ledger entry for a subscription.
///
/// The most recent entry is the undo target; `None` means the
/// subscription has no recorded collections.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_collection_entry(
    conn: &mut _,
    subscription_id: i64,
) -> Result<Option<CollectionLogRow>, PersistenceError> {
    Ok(collection_log::table
        .filter(collection_log::subscription_id.eq(subscription_id))
        .order(collection_log::entry_id.desc())
        .first::<CollectionLogRow>(conn)
        .optional()?)
}
}

backend_fn! {
/// Lists all ledger entries for a subscription, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_collection_entries(
    conn: &mut _,
    subscription_id: i64,
) -> Result<Vec<CollectionLogRow>, PersistenceError> {
    Ok(collection_log::table
        .filter(collection_log::subscription_id.eq(subscription_id))
        .order(collection_log::entry_id.asc())
        .load::<CollectionLogRow>(conn)?)
}
}
