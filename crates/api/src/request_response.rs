// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Dates cross this boundary as plain `YYYY-MM-DD` strings, weekdays as
//! full English names, and slots as `AM`/`PM`/`ANY` (absent or empty
//! meaning `ANY`). Parsing into domain types happens inside the
//! handlers, never in the transport layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to check whether a postcode is covered.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckPostcodeRequest {
    /// The postcode as entered by the customer.
    pub postcode: String,
}

/// One matched route, as shown to customers and ops.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteMatchInfo {
    /// The matched area name.
    pub area_name: String,
    /// The route weekday (full English name).
    pub weekday: String,
    /// The route slot.
    pub slot: String,
    /// The first collection date on or after the reference date.
    pub next_date: String,
}

/// Result of a postcode check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckPostcodeResponse {
    /// The normalized postcode that was matched.
    pub postcode: String,
    /// Whether any active route covers the postcode.
    pub in_area: bool,
    /// All matching routes in scheduling order.
    pub matches: Vec<RouteMatchInfo>,
    /// The default route written onto a new subscription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<RouteMatchInfo>,
}

/// Request to create a subscription after checkout completion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSubscriptionRequest {
    /// The customer's name.
    pub customer_name: String,
    /// The service postcode.
    pub postcode: String,
    /// The service address.
    pub address: String,
    /// The collection frequency label.
    pub frequency: String,
    /// Extra bags collected each visit (0-10).
    pub extra_bags: u8,
    /// Whether the customer supplies their own bin.
    pub use_own_bin: bool,
    /// Initial status label; defaults to `active` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Result of creating a subscription.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSubscriptionResponse {
    /// The new subscription's canonical ID.
    pub subscription_id: i64,
    /// Whether the postcode was inside a served area.
    pub in_area: bool,
    /// The assigned route area, if matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_area: Option<String>,
    /// The assigned route day, if matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_day: Option<String>,
    /// The assigned route slot, if matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_slot: Option<String>,
    /// The first collection date, if matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_collection_date: Option<String>,
    /// A success message.
    pub message: String,
}

/// A subscription as exposed to the surrounding platform.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionInfo {
    /// The canonical ID.
    pub subscription_id: i64,
    /// The customer's name.
    pub customer_name: String,
    /// The normalized postcode.
    pub postcode: String,
    /// The service address.
    pub address: String,
    /// The frequency label.
    pub frequency: String,
    /// Extra bags collected each visit.
    pub extra_bags: u8,
    /// Whether the customer supplies their own bin.
    pub use_own_bin: bool,
    /// The assigned route area.
    pub route_area: Option<String>,
    /// The assigned route day.
    pub route_day: Option<String>,
    /// The assigned route slot.
    pub route_slot: Option<String>,
    /// The next collection date.
    pub next_collection_date: Option<String>,
    /// Pause window start.
    pub pause_from: Option<String>,
    /// Pause window end.
    pub pause_to: Option<String>,
    /// The status label.
    pub status: String,
    /// Free-text ops notes.
    pub ops_notes: Option<String>,
}

/// Request to record a completed collection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordCollectionRequest {
    /// The date the collection happened.
    pub collected_date: String,
}

/// Result of recording a collection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordCollectionResponse {
    /// The subscription that was collected.
    pub subscription_id: i64,
    /// The new next collection date.
    pub next_collection_date: String,
    /// The ledger entry recording this collection.
    pub entry_id: i64,
}

/// Result of undoing the most recent collection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UndoCollectionResponse {
    /// The subscription the undo applied to.
    pub subscription_id: i64,
    /// The restored next collection date (exactly as it was before the
    /// undone collection; may be absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_collection_date: Option<String>,
}

/// Request to pause a subscription over an inclusive window.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PauseSubscriptionRequest {
    /// The window start (inclusive).
    pub pause_from: String,
    /// The window end (inclusive).
    pub pause_to: String,
}

/// Request to override the next collection date.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OverrideNextRequest {
    /// The new next collection date.
    pub next_collection_date: String,
}

/// Request to find or create a daily run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnsureRunRequest {
    /// The date the run goes out.
    pub run_date: String,
    /// The route day (full English name).
    pub route_day: String,
    /// The route area name.
    pub route_area: String,
    /// The route slot; absent or empty means `ANY`.
    #[serde(default)]
    pub route_slot: String,
}

/// A daily run as exposed to drivers and ops.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DailyRunInfo {
    /// The canonical run ID.
    pub run_id: i64,
    /// The date the run goes out.
    pub run_date: String,
    /// The route day.
    pub route_day: String,
    /// The route area.
    pub route_area: String,
    /// The route slot.
    pub route_slot: String,
    /// The assigned vehicle.
    pub vehicle: Option<String>,
    /// The assigned staff members.
    pub staff: Vec<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request to attach a vehicle and staff to a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignRunRequest {
    /// The vehicle registration, if any.
    pub vehicle: Option<String>,
    /// The staff members on the run.
    pub staff: Vec<String>,
}

/// Due-count breakdown for one `"area|slot"` group.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DueCountInfo {
    /// Total stops due.
    pub total: u32,
    /// Recurring subscription stops.
    pub recurring: u32,
    /// One-off booking stops.
    pub one_off: u32,
    /// Quote-driven visit stops.
    pub quote: u32,
}

/// Due counts for a run date, keyed by `"area|slot"`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DueCountResponse {
    /// The run date the counts are for.
    pub run_date: String,
    /// Per-group breakdowns.
    pub counts: BTreeMap<String, DueCountInfo>,
}

/// Options for a bulk reassignment batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkReassignRequest {
    /// Maximum rows to scan; clamped to 500.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Report planned changes without writing anything.
    pub dry_run: bool,
    /// Overwrite rows that already have a route assigned.
    pub force: bool,
    /// Recompute the next collection date even on an unchanged route.
    pub recompute_next: bool,
    /// Status labels to include; defaults to active and trialing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<String>>,
}

/// One row of a bulk reassignment report.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReassignRowInfo {
    /// The subscription the row refers to.
    pub subscription_id: i64,
    /// The row classification (`updated`, `skipped`, `no_match`, or
    /// `failed`).
    pub outcome: String,
    /// The new route area for an updated row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_area: Option<String>,
    /// The new route day for an updated row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_day: Option<String>,
    /// The new route slot for an updated row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_slot: Option<String>,
    /// The new next collection date, when it was touched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_collection_date: Option<String>,
    /// Failure detail for a `failed` row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a bulk reassignment batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkReassignResponse {
    /// Rows scanned.
    pub scanned: u32,
    /// Rows updated (or would-be updated under dry run).
    pub updated: u32,
    /// Rows with no matching route.
    pub no_match: u32,
    /// Rows skipped because a route was already assigned.
    pub skipped: u32,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Per-row outcomes.
    pub results: Vec<ReassignRowInfo>,
}

/// Request to raise an issue against a stop on a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenIssueRequest {
    /// The subscription the stop belongs to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<i64>,
    /// The reason category.
    pub reason: String,
    /// Free-text details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Result of raising an issue.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenIssueResponse {
    /// The new issue's canonical ID.
    pub issue_id: i64,
}

/// Request to resolve an issue.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolveIssueRequest {
    /// The action taken (must be non-empty).
    pub action: String,
    /// The outcome of the resolution.
    pub outcome: String,
}

/// Result of resolving an issue.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolveIssueResponse {
    /// The resolved issue's ID.
    pub issue_id: i64,
    /// The resolution timestamp.
    pub resolved_at: String,
}

/// An issue as exposed to ops.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IssueInfo {
    /// The canonical issue ID.
    pub issue_id: i64,
    /// The run the issue was raised against.
    pub run_id: i64,
    /// The subscription the stop belongs to.
    pub subscription_id: Option<i64>,
    /// The reason category.
    pub reason: String,
    /// Free-text details.
    pub details: Option<String>,
    /// The action ops took.
    pub resolution_action: Option<String>,
    /// The resolution outcome.
    pub resolution_outcome: Option<String>,
    /// Resolution timestamp; absent while open.
    pub resolved_at: Option<String>,
}

/// A route area as exposed to ops.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteAreaInfo {
    /// The canonical route area ID.
    pub route_area_id: i64,
    /// The area name.
    pub area_name: String,
    /// The route weekday.
    pub weekday: String,
    /// The route slot.
    pub slot: String,
    /// The normalized postcode prefixes.
    pub prefixes: Vec<String>,
    /// Whether the route is operational.
    pub is_active: bool,
    /// Display ordering.
    pub sort_order: i32,
}
