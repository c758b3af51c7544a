// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic transition execution.
//!
//! A transition couples a subscription field update with at most one
//! ledger operation. The two writes happen inside a single database
//! transaction: a ledger entry without the matching date update (or vice
//! versa) would corrupt history, so partial application is prevented at
//! this layer rather than detected later.

use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, SqliteConnection};
use kerbside::{LedgerOp, TransitionResult};
use kerbside_domain::{DomainError, format_ymd};
use kerbside_ledger::CollectionLogEntry;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::collection_log;
use crate::error::PersistenceError;
use crate::mutations::subscriptions::{
    update_subscription_fields_mysql, update_subscription_fields_sqlite,
};

/// Storage-ready column values for a ledger entry.
struct EntryValues {
    collected_date: String,
    previous_next_collection_date: Option<String>,
    resulting_next_collection_date: String,
}

fn entry_values(entry: &CollectionLogEntry) -> Result<EntryValues, PersistenceError> {
    let format = |d| {
        format_ymd(d).map_err(|e: DomainError| PersistenceError::SerializationError(e.to_string()))
    };

    Ok(EntryValues {
        collected_date: format(entry.collected_date)?,
        previous_next_collection_date: entry
            .previous_next_collection_date
            .map(format)
            .transpose()?,
        resulting_next_collection_date: format(entry.resulting_next_collection_date)?,
    })
}

backend_fn! {
/// Appends a collection ledger entry.
///
/// # Returns
///
/// The generated `entry_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
fn insert_collection_entry(
    conn: &mut _,
    subscription_id: i64,
    entry: &CollectionLogEntry,
) -> Result<i64, PersistenceError> {
    let values: EntryValues = entry_values(entry)?;

    diesel::insert_into(collection_log::table)
        .values((
            collection_log::subscription_id.eq(subscription_id),
            collection_log::collected_date.eq(&values.collected_date),
            collection_log::previous_next_collection_date
                .eq(&values.previous_next_collection_date),
            collection_log::resulting_next_collection_date
                .eq(&values.resulting_next_collection_date),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Removes the most recent ledger entry for a subscription.
///
/// When the caller identified a specific entry, only that entry is
/// removed; the filter guards against a concurrent append having changed
/// what "most recent" means since the undo was planned.
///
/// # Errors
///
/// Returns `NotFound` if the identified entry no longer exists, or if
/// the subscription has no entries at all.
fn pop_collection_entry(
    conn: &mut _,
    subscription_id: i64,
    entry_id: Option<i64>,
) -> Result<(), PersistenceError> {
    let deleted: usize = match entry_id {
        Some(id) => diesel::delete(
            collection_log::table
                .filter(collection_log::entry_id.eq(id))
                .filter(collection_log::subscription_id.eq(subscription_id)),
        )
        .execute(conn)?,
        None => {
            let latest: Option<i64> = collection_log::table
                .filter(collection_log::subscription_id.eq(subscription_id))
                .order(collection_log::entry_id.desc())
                .select(collection_log::entry_id)
                .first::<i64>(conn)
                .optional()?;

            match latest {
                Some(id) => diesel::delete(
                    collection_log::table.filter(collection_log::entry_id.eq(id)),
                )
                .execute(conn)?,
                None => 0,
            }
        }
    };

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "No ledger entry to remove for subscription {subscription_id}"
        )));
    }
    Ok(())
}
}

/// Persists a transition atomically (`SQLite` version).
///
/// The subscription update and the ledger operation are executed inside
/// one transaction; if either fails, both roll back.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `subscription_id` - The subscription the transition applies to
/// * `result` - The transition to persist
///
/// # Returns
///
/// The generated `entry_id` when the transition appended a ledger entry.
///
/// # Errors
///
/// Returns an error if any write fails; no partial state is left behind.
pub fn persist_transition_sqlite(
    conn: &mut SqliteConnection,
    subscription_id: i64,
    result: &TransitionResult,
) -> Result<Option<i64>, PersistenceError> {
    conn.transaction(|conn| {
        update_subscription_fields_sqlite(conn, subscription_id, &result.new_subscription)?;

        let entry_id: Option<i64> = match &result.ledger_op {
            LedgerOp::None => None,
            LedgerOp::Append(entry) => {
                let id: i64 = insert_collection_entry_sqlite(conn, subscription_id, entry)?;
                debug!(entry_id = id, subscription_id, "Appended ledger entry");
                Some(id)
            }
            LedgerOp::PopLast { entry_id } => {
                pop_collection_entry_sqlite(conn, subscription_id, *entry_id)?;
                debug!(subscription_id, "Popped most recent ledger entry");
                None
            }
        };

        info!(subscription_id, "Persisted transition");
        Ok(entry_id)
    })
}

/// Persists a transition atomically (`MySQL` version).
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `subscription_id` - The subscription the transition applies to
/// * `result` - The transition to persist
///
/// # Returns
///
/// The generated `entry_id` when the transition appended a ledger entry.
///
/// # Errors
///
/// Returns an error if any write fails; no partial state is left behind.
pub fn persist_transition_mysql(
    conn: &mut MysqlConnection,
    subscription_id: i64,
    result: &TransitionResult,
) -> Result<Option<i64>, PersistenceError> {
    conn.transaction(|conn| {
        update_subscription_fields_mysql(conn, subscription_id, &result.new_subscription)?;

        let entry_id: Option<i64> = match &result.ledger_op {
            LedgerOp::None => None,
            LedgerOp::Append(entry) => {
                let id: i64 = insert_collection_entry_mysql(conn, subscription_id, entry)?;
                debug!(entry_id = id, subscription_id, "Appended ledger entry");
                Some(id)
            }
            LedgerOp::PopLast { entry_id } => {
                pop_collection_entry_mysql(conn, subscription_id, *entry_id)?;
                debug!(subscription_id, "Popped most recent ledger entry");
                None
            }
        };

        info!(subscription_id, "Persisted transition");
        Ok(entry_id)
    })
}
