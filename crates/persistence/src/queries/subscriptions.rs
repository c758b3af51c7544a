// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subscription lookups and scans.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::SubscriptionRow;
use crate::diesel_schema::subscriptions;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a subscription by ID.
///
/// # Errors
///
/// Returns `NotFound` if no subscription carries the given ID.
pub fn get_subscription(
    conn: &mut _,
    subscription_id: i64,
) -> Result<SubscriptionRow, PersistenceError> {
    subscriptions::table
        .filter(subscriptions::subscription_id.eq(subscription_id))
        .first::<SubscriptionRow>(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Subscription {subscription_id} not found"))
        })
}
}

backend_fn! {
/// Lists subscriptions in a status set, oldest first, bounded by a limit.
///
/// This is the scan used by the bulk reassignment batch; the limit
/// bounds a single invocation's blast radius.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_subscriptions(
    conn: &mut _,
    statuses: &[String],
    limit: i64,
) -> Result<Vec<SubscriptionRow>, PersistenceError> {
    Ok(subscriptions::table
        .filter(subscriptions::status.eq_any(statuses))
        .order(subscriptions::subscription_id.asc())
        .limit(limit)
        .load::<SubscriptionRow>(conn)?)
}
}

backend_fn! {
/// Lists subscriptions whose next collection date equals a given date.
///
/// Status and pause filtering happen in the engine, which owns the
/// "counts as active for scheduling" rule; this query only narrows by
/// date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn subscriptions_due_on(
    conn: &mut _,
    run_date: &str,
) -> Result<Vec<SubscriptionRow>, PersistenceError> {
    Ok(subscriptions::table
        .filter(subscriptions::next_collection_date.eq(run_date))
        .order(subscriptions::subscription_id.asc())
        .load::<SubscriptionRow>(conn)?)
}
}
