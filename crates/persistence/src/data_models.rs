// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types loaded from the database and their conversions back into
//! domain values.
//!
//! Dates are stored as `YYYY-MM-DD` text and enums as their storage
//! labels; any row that fails to convert is reported as a
//! `ReconstructionError` rather than silently skipped, because a row the
//! engine cannot read is corrupt data.

use diesel::prelude::*;
use kerbside::{DailyRun, Issue};
use num_traits::ToPrimitive;
use kerbside_domain::{
    DomainError, Frequency, Postcode, RouteArea, Slot, Subscription, SubscriptionStatus,
    parse_weekday, parse_ymd,
};
use kerbside_ledger::CollectionLogEntry;
use std::str::FromStr;
use time::{Date, Weekday};

use crate::error::PersistenceError;

fn reconstruction(context: &str, err: &DomainError) -> PersistenceError {
    PersistenceError::ReconstructionError(format!("{context}: {err}"))
}

fn parse_optional_date(
    context: &str,
    value: Option<&str>,
) -> Result<Option<Date>, PersistenceError> {
    value
        .map(|v| parse_ymd(v).map_err(|e| reconstruction(context, &e)))
        .transpose()
}

/// One row of the `subscriptions` table.
#[derive(Debug, Clone, Queryable)]
pub struct SubscriptionRow {
    pub subscription_id: i64,
    pub customer_name: String,
    pub postcode: String,
    pub address: String,
    pub frequency: String,
    pub extra_bags: i32,
    pub use_own_bin: i32,
    pub route_area: Option<String>,
    pub route_day: Option<String>,
    pub route_slot: Option<String>,
    pub next_collection_date: Option<String>,
    pub pause_from: Option<String>,
    pub pause_to: Option<String>,
    pub status: String,
    pub ops_notes: Option<String>,
    pub created_at: String,
}

impl SubscriptionRow {
    /// Converts the row into a domain `Subscription`.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if any stored label or date fails to
    /// parse.
    pub fn into_domain(self) -> Result<Subscription, PersistenceError> {
        let postcode: Postcode =
            Postcode::new(&self.postcode).map_err(|e| reconstruction("postcode", &e))?;
        let frequency: Frequency =
            Frequency::from_str(&self.frequency).map_err(|e| reconstruction("frequency", &e))?;
        let route_day: Option<Weekday> = self
            .route_day
            .as_deref()
            .map(|d| parse_weekday(d).map_err(|e| reconstruction("route_day", &e)))
            .transpose()?;
        let route_slot: Option<Slot> = self
            .route_slot
            .as_deref()
            .map(|s| Slot::parse(s).map_err(|e| reconstruction("route_slot", &e)))
            .transpose()?;
        let status: SubscriptionStatus =
            SubscriptionStatus::from_str(&self.status).map_err(|e| reconstruction("status", &e))?;
        let extra_bags: u8 = self.extra_bags.to_u8().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "extra_bags out of range: {}",
                self.extra_bags
            ))
        })?;

        Ok(Subscription::with_id(
            self.subscription_id,
            self.customer_name,
            postcode,
            self.address,
            frequency,
            extra_bags,
            self.use_own_bin != 0,
            self.route_area,
            route_day,
            route_slot,
            parse_optional_date("next_collection_date", self.next_collection_date.as_deref())?,
            parse_optional_date("pause_from", self.pause_from.as_deref())?,
            parse_optional_date("pause_to", self.pause_to.as_deref())?,
            status,
            self.ops_notes,
        ))
    }
}

/// One row of the `route_areas` table.
#[derive(Debug, Clone, Queryable)]
pub struct RouteAreaRow {
    pub route_area_id: i64,
    pub area_name: String,
    pub weekday: String,
    pub slot: String,
    pub prefixes_json: String,
    pub is_active: i32,
    pub sort_order: i32,
}

impl RouteAreaRow {
    /// Converts the row into a domain `RouteArea`.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if the weekday/slot labels or the
    /// prefix list fail to parse.
    pub fn into_domain(self) -> Result<RouteArea, PersistenceError> {
        let weekday: Weekday =
            parse_weekday(&self.weekday).map_err(|e| reconstruction("weekday", &e))?;
        let slot: Slot = Slot::parse(&self.slot).map_err(|e| reconstruction("slot", &e))?;
        let prefixes: Vec<String> = serde_json::from_str(&self.prefixes_json)?;

        Ok(RouteArea::with_id(
            self.route_area_id,
            &self.area_name,
            weekday,
            slot,
            &prefixes,
            self.is_active != 0,
            self.sort_order,
        ))
    }
}

/// One row of the `collection_log` table.
#[derive(Debug, Clone, Queryable)]
pub struct CollectionLogRow {
    pub entry_id: i64,
    pub subscription_id: i64,
    pub collected_date: String,
    pub previous_next_collection_date: Option<String>,
    pub resulting_next_collection_date: String,
    pub created_at: String,
}

impl CollectionLogRow {
    /// Converts the row into a `CollectionLogEntry`.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if a stored date fails to parse.
    pub fn into_domain(self) -> Result<CollectionLogEntry, PersistenceError> {
        let collected_date: Date =
            parse_ymd(&self.collected_date).map_err(|e| reconstruction("collected_date", &e))?;
        let previous: Option<Date> = parse_optional_date(
            "previous_next_collection_date",
            self.previous_next_collection_date.as_deref(),
        )?;
        let resulting: Date = parse_ymd(&self.resulting_next_collection_date)
            .map_err(|e| reconstruction("resulting_next_collection_date", &e))?;

        Ok(CollectionLogEntry::with_id(
            self.entry_id,
            self.subscription_id,
            collected_date,
            previous,
            resulting,
            Some(self.created_at),
        ))
    }
}

/// One row of the `daily_runs` table.
#[derive(Debug, Clone, Queryable)]
pub struct DailyRunRow {
    pub run_id: i64,
    pub run_date: String,
    pub route_day: String,
    pub route_area: String,
    pub route_slot: String,
    pub vehicle: Option<String>,
    pub staff_json: String,
    pub notes: Option<String>,
    pub created_at: String,
}

impl DailyRunRow {
    /// Converts the row into a `DailyRun`.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if a stored label, date, or the
    /// staff list fails to parse.
    pub fn into_domain(self) -> Result<DailyRun, PersistenceError> {
        let run_date: Date =
            parse_ymd(&self.run_date).map_err(|e| reconstruction("run_date", &e))?;
        let route_day: Weekday =
            parse_weekday(&self.route_day).map_err(|e| reconstruction("route_day", &e))?;
        let route_slot: Slot =
            Slot::parse(&self.route_slot).map_err(|e| reconstruction("route_slot", &e))?;
        let staff: Vec<String> = serde_json::from_str(&self.staff_json)?;

        Ok(DailyRun {
            run_id: Some(self.run_id),
            run_date,
            route_day,
            route_area: self.route_area,
            route_slot,
            vehicle: self.vehicle,
            staff,
            notes: self.notes,
        })
    }
}

/// One row of the `issues` table.
#[derive(Debug, Clone, Queryable)]
pub struct IssueRow {
    pub issue_id: i64,
    pub run_id: i64,
    pub subscription_id: Option<i64>,
    pub reason: String,
    pub details: Option<String>,
    pub resolution_action: Option<String>,
    pub resolution_outcome: Option<String>,
    pub resolved_at: Option<String>,
    pub created_at: String,
}

impl IssueRow {
    /// Converts the row into an `Issue`.
    #[must_use]
    pub fn into_domain(self) -> Issue {
        Issue {
            issue_id: Some(self.issue_id),
            run_id: self.run_id,
            subscription_id: self.subscription_id,
            reason: self.reason,
            details: self.details,
            resolution_action: self.resolution_action,
            resolution_outcome: self.resolution_outcome,
            resolved_at: self.resolved_at,
            created_at: Some(self.created_at),
        }
    }
}
