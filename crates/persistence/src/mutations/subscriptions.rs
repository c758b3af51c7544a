// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subscription row mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use kerbside_domain::{DomainError, Subscription, format_ymd, weekday_name};
use time::Date;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::subscriptions;
use crate::error::PersistenceError;

/// Storage-ready column values for a subscription.
///
/// Dates are formatted once here so the insert and update paths cannot
/// disagree about the wire form.
pub(crate) struct SubscriptionValues {
    pub customer_name: String,
    pub postcode: String,
    pub address: String,
    pub frequency: &'static str,
    pub extra_bags: i32,
    pub use_own_bin: i32,
    pub route_area: Option<String>,
    pub route_day: Option<&'static str>,
    pub route_slot: Option<&'static str>,
    pub next_collection_date: Option<String>,
    pub pause_from: Option<String>,
    pub pause_to: Option<String>,
    pub status: &'static str,
    pub ops_notes: Option<String>,
}

fn format_optional_date(date: Option<Date>) -> Result<Option<String>, PersistenceError> {
    date.map(|d| {
        format_ymd(d).map_err(|e: DomainError| PersistenceError::SerializationError(e.to_string()))
    })
    .transpose()
}

pub(crate) fn subscription_values(
    subscription: &Subscription,
) -> Result<SubscriptionValues, PersistenceError> {
    Ok(SubscriptionValues {
        customer_name: subscription.customer_name.clone(),
        postcode: subscription.postcode.value().to_string(),
        address: subscription.address.clone(),
        frequency: subscription.frequency.as_str(),
        extra_bags: i32::from(subscription.extra_bags),
        use_own_bin: i32::from(subscription.use_own_bin),
        route_area: subscription.route_area.clone(),
        route_day: subscription.route_day.map(weekday_name),
        route_slot: subscription.route_slot.map(|s| s.as_str()),
        next_collection_date: format_optional_date(subscription.next_collection_date)?,
        pause_from: format_optional_date(subscription.pause_from)?,
        pause_to: format_optional_date(subscription.pause_to)?,
        status: subscription.status.as_str(),
        ops_notes: subscription.ops_notes.clone(),
    })
}

backend_fn! {
/// Inserts a new subscription row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `subscription` - The subscription to insert
///
/// # Returns
///
/// The generated `subscription_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_subscription(
    conn: &mut _,
    subscription: &Subscription,
) -> Result<i64, PersistenceError> {
    let values: SubscriptionValues = subscription_values(subscription)?;

    diesel::insert_into(subscriptions::table)
        .values((
            subscriptions::customer_name.eq(&values.customer_name),
            subscriptions::postcode.eq(&values.postcode),
            subscriptions::address.eq(&values.address),
            subscriptions::frequency.eq(values.frequency),
            subscriptions::extra_bags.eq(values.extra_bags),
            subscriptions::use_own_bin.eq(values.use_own_bin),
            subscriptions::route_area.eq(&values.route_area),
            subscriptions::route_day.eq(values.route_day),
            subscriptions::route_slot.eq(values.route_slot),
            subscriptions::next_collection_date.eq(&values.next_collection_date),
            subscriptions::pause_from.eq(&values.pause_from),
            subscriptions::pause_to.eq(&values.pause_to),
            subscriptions::status.eq(values.status),
            subscriptions::ops_notes.eq(&values.ops_notes),
        ))
        .execute(conn)?;

    let subscription_id: i64 = conn.get_last_insert_rowid()?;
    debug!(subscription_id, "Inserted subscription");
    Ok(subscription_id)
}
}

backend_fn! {
/// Updates all mutable fields of a subscription row.
///
/// Subscription updates are last-writer-wins at the field level; no
/// cross-request locking is required here.
///
/// # Errors
///
/// Returns `NotFound` if no subscription carries the given ID.
pub fn update_subscription_fields(
    conn: &mut _,
    subscription_id: i64,
    subscription: &Subscription,
) -> Result<(), PersistenceError> {
    let values: SubscriptionValues = subscription_values(subscription)?;

    let updated: usize = diesel::update(
        subscriptions::table.filter(subscriptions::subscription_id.eq(subscription_id)),
    )
    .set((
        subscriptions::customer_name.eq(&values.customer_name),
        subscriptions::postcode.eq(&values.postcode),
        subscriptions::address.eq(&values.address),
        subscriptions::frequency.eq(values.frequency),
        subscriptions::extra_bags.eq(values.extra_bags),
        subscriptions::use_own_bin.eq(values.use_own_bin),
        subscriptions::route_area.eq(&values.route_area),
        subscriptions::route_day.eq(values.route_day),
        subscriptions::route_slot.eq(values.route_slot),
        subscriptions::next_collection_date.eq(&values.next_collection_date),
        subscriptions::pause_from.eq(&values.pause_from),
        subscriptions::pause_to.eq(&values.pause_to),
        subscriptions::status.eq(values.status),
        subscriptions::ops_notes.eq(&values.ops_notes),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Subscription {subscription_id} not found"
        )));
    }
    Ok(())
}
}
