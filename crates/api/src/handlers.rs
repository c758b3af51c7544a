// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the engine's operations.
//!
//! Handlers parse wire types into domain values, enforce authorization,
//! run the pure engine, and hand the result to persistence. Every
//! operation that reads "today" receives it as an explicit reference
//! date from the caller, so handlers are deterministic under test.

use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::info;

use kerbside::{
    Command, DailyRun, DueBreakdown, Issue, LedgerOp, PlannedRow, ReassignOptions,
    ReassignSummary, RowOutcome, RunKey, TransitionResult, apply, due_counts, due_stops,
    plan_reassignment, validate_resolution_action,
};
use kerbside_domain::{
    DomainError, Frequency, Postcode, RouteArea, RouteMatch, RouteMatchResult, Slot, Subscription,
    SubscriptionStatus, format_ymd, match_postcode, parse_weekday, parse_ymd, validate_extra_bags,
    weekday_name,
};
use kerbside_ledger::CollectionLogEntry;
use kerbside_persistence::Persistence;
use time::Date;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AssignRunRequest, BulkReassignRequest, BulkReassignResponse, CheckPostcodeRequest,
    CheckPostcodeResponse, CreateSubscriptionRequest, CreateSubscriptionResponse, DailyRunInfo,
    DueCountInfo, DueCountResponse, EnsureRunRequest, IssueInfo, OpenIssueRequest,
    OpenIssueResponse, OverrideNextRequest, PauseSubscriptionRequest, ReassignRowInfo,
    RecordCollectionRequest, RecordCollectionResponse, ResolveIssueRequest, ResolveIssueResponse,
    RouteAreaInfo, RouteMatchInfo, SubscriptionInfo, UndoCollectionResponse,
};

fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_ymd(value).map_err(|e: DomainError| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn format_date(date: Date) -> Result<String, ApiError> {
    format_ymd(date).map_err(translate_domain_error)
}

fn format_optional_date(date: Option<Date>) -> Result<Option<String>, ApiError> {
    date.map(format_date).transpose()
}

fn route_match_info(matched: &RouteMatch) -> Result<RouteMatchInfo, ApiError> {
    Ok(RouteMatchInfo {
        area_name: matched.area_name.clone(),
        weekday: weekday_name(matched.weekday).to_string(),
        slot: matched.slot.as_str().to_string(),
        next_date: format_date(matched.next_date)?,
    })
}

fn subscription_info(subscription: &Subscription) -> Result<SubscriptionInfo, ApiError> {
    Ok(SubscriptionInfo {
        subscription_id: subscription.subscription_id.unwrap_or(0),
        customer_name: subscription.customer_name.clone(),
        postcode: subscription.postcode.value().to_string(),
        address: subscription.address.clone(),
        frequency: subscription.frequency.as_str().to_string(),
        extra_bags: subscription.extra_bags,
        use_own_bin: subscription.use_own_bin,
        route_area: subscription.route_area.clone(),
        route_day: subscription.route_day.map(|d| weekday_name(d).to_string()),
        route_slot: subscription.route_slot.map(|s| s.as_str().to_string()),
        next_collection_date: format_optional_date(subscription.next_collection_date)?,
        pause_from: format_optional_date(subscription.pause_from)?,
        pause_to: format_optional_date(subscription.pause_to)?,
        status: subscription.status.as_str().to_string(),
        ops_notes: subscription.ops_notes.clone(),
    })
}

fn daily_run_info(run: &DailyRun) -> Result<DailyRunInfo, ApiError> {
    Ok(DailyRunInfo {
        run_id: run.run_id.unwrap_or(0),
        run_date: format_date(run.run_date)?,
        route_day: weekday_name(run.route_day).to_string(),
        route_area: run.route_area.clone(),
        route_slot: run.route_slot.as_str().to_string(),
        vehicle: run.vehicle.clone(),
        staff: run.staff.clone(),
        notes: run.notes.clone(),
    })
}

fn issue_info(issue: &Issue) -> IssueInfo {
    IssueInfo {
        issue_id: issue.issue_id.unwrap_or(0),
        run_id: issue.run_id,
        subscription_id: issue.subscription_id,
        reason: issue.reason.clone(),
        details: issue.details.clone(),
        resolution_action: issue.resolution_action.clone(),
        resolution_outcome: issue.resolution_outcome.clone(),
        resolved_at: issue.resolved_at.clone(),
    }
}

/// Loads a subscription and its most recent ledger entry, applies a
/// command, and persists the transition atomically.
fn run_transition(
    persistence: &mut Persistence,
    subscription_id: i64,
    command: Command,
) -> Result<(TransitionResult, Option<i64>), ApiError> {
    let subscription: Subscription = persistence
        .get_subscription(subscription_id)
        .map_err(translate_persistence_error)?;
    let last_entry: Option<CollectionLogEntry> = persistence
        .last_collection_entry(subscription_id)
        .map_err(translate_persistence_error)?;

    let result: TransitionResult =
        apply(&subscription, last_entry.as_ref(), command).map_err(translate_core_error)?;

    let entry_id: Option<i64> = persistence
        .persist_transition(subscription_id, &result)
        .map_err(translate_persistence_error)?;

    Ok((result, entry_id))
}

/// Checks whether a postcode is inside a served area.
///
/// Read-only and public: an unmatched postcode is a normal "we don't
/// cover you yet" outcome.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The postcode to check
/// * `reference` - The date to compute first-collection dates from
///
/// # Errors
///
/// Returns an error only for an empty postcode or a storage failure.
pub fn check_postcode(
    persistence: &mut Persistence,
    request: &CheckPostcodeRequest,
    reference: Date,
) -> Result<CheckPostcodeResponse, ApiError> {
    let postcode: Postcode = Postcode::new(&request.postcode).map_err(translate_domain_error)?;
    let catalogue: Vec<RouteArea> = persistence
        .list_route_areas(false)
        .map_err(translate_persistence_error)?;

    let result: RouteMatchResult =
        match_postcode(&postcode, &catalogue, reference).map_err(translate_domain_error)?;

    let matches: Vec<RouteMatchInfo> = result
        .matches
        .iter()
        .map(route_match_info)
        .collect::<Result<_, _>>()?;
    let default: Option<RouteMatchInfo> =
        result.default.as_ref().map(route_match_info).transpose()?;

    Ok(CheckPostcodeResponse {
        postcode: postcode.value().to_string(),
        in_area: result.in_area,
        matches,
        default,
    })
}

/// Creates a subscription, populating route fields and the first
/// collection date from the route matcher's default.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The customer fields from checkout
/// * `reference` - The date to compute the first collection from
///
/// # Errors
///
/// Returns an error if a field fails validation or persistence fails.
/// An uncovered postcode is not an error: the subscription is created
/// unrouted for ops to handle.
pub fn create_subscription(
    persistence: &mut Persistence,
    request: CreateSubscriptionRequest,
    reference: Date,
) -> Result<CreateSubscriptionResponse, ApiError> {
    let postcode: Postcode = Postcode::new(&request.postcode).map_err(translate_domain_error)?;
    let frequency: Frequency =
        Frequency::from_str(&request.frequency).map_err(translate_domain_error)?;
    validate_extra_bags(request.extra_bags).map_err(translate_domain_error)?;
    let status: SubscriptionStatus = match request.status.as_deref() {
        Some(label) => SubscriptionStatus::from_str(label).map_err(translate_domain_error)?,
        None => SubscriptionStatus::Active,
    };

    let mut subscription: Subscription = Subscription::new(
        request.customer_name,
        postcode,
        request.address,
        frequency,
        request.extra_bags,
        request.use_own_bin,
        status,
    );

    let catalogue: Vec<RouteArea> = persistence
        .list_route_areas(false)
        .map_err(translate_persistence_error)?;
    let matched: RouteMatchResult =
        match_postcode(&subscription.postcode, &catalogue, reference)
            .map_err(translate_domain_error)?;

    if let Some(default) = &matched.default {
        subscription.route_area = Some(default.area_name.clone());
        subscription.route_day = Some(default.weekday);
        subscription.route_slot = Some(default.slot);
        subscription.next_collection_date = Some(default.next_date);
    }

    let subscription_id: i64 = persistence
        .insert_subscription(&subscription)
        .map_err(translate_persistence_error)?;

    info!(
        subscription_id,
        postcode = subscription.postcode.value(),
        in_area = matched.in_area,
        "Created subscription"
    );

    Ok(CreateSubscriptionResponse {
        subscription_id,
        in_area: matched.in_area,
        route_area: subscription.route_area.clone(),
        route_day: subscription.route_day.map(|d| weekday_name(d).to_string()),
        route_slot: subscription.route_slot.map(|s| s.as_str().to_string()),
        next_collection_date: format_optional_date(subscription.next_collection_date)?,
        message: if matched.in_area {
            String::from("Subscription created and routed")
        } else {
            String::from("Subscription created; postcode is outside served areas")
        },
    })
}

/// Retrieves a subscription.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the subscription does not exist.
pub fn get_subscription(
    persistence: &mut Persistence,
    subscription_id: i64,
) -> Result<SubscriptionInfo, ApiError> {
    let subscription: Subscription = persistence
        .get_subscription(subscription_id)
        .map_err(translate_persistence_error)?;
    subscription_info(&subscription)
}

/// Records a completed collection and advances the cycle from the
/// actual collection date.
///
/// # Errors
///
/// Returns an error if the actor is not staff, the date is malformed,
/// the subscription is canceled or missing, or persistence fails.
pub fn record_collection(
    persistence: &mut Persistence,
    subscription_id: i64,
    request: &RecordCollectionRequest,
    actor: &AuthenticatedActor,
) -> Result<RecordCollectionResponse, ApiError> {
    AuthorizationService::authorize_staff_action(actor, "record_collection")?;
    let collected_date: Date = parse_date_field("collected_date", &request.collected_date)?;

    let (result, entry_id) = run_transition(
        persistence,
        subscription_id,
        Command::RecordCollection { collected_date },
    )?;

    let next: Date =
        result
            .new_subscription
            .next_collection_date
            .ok_or_else(|| ApiError::Internal {
                message: String::from("Recorded collection produced no next date"),
            })?;
    let entry_id: i64 = entry_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Recorded collection produced no ledger entry"),
    })?;

    info!(
        subscription_id,
        actor_id = %actor.id,
        collected_date = %request.collected_date,
        "Recorded collection"
    );

    Ok(RecordCollectionResponse {
        subscription_id,
        next_collection_date: format_date(next)?,
        entry_id,
    })
}

/// Undoes the most recent recorded collection.
///
/// # Errors
///
/// Returns `Conflict` when the subscription has no collection to undo;
/// this is a normal, reported condition.
pub fn undo_last_collection(
    persistence: &mut Persistence,
    subscription_id: i64,
    actor: &AuthenticatedActor,
) -> Result<UndoCollectionResponse, ApiError> {
    AuthorizationService::authorize_staff_action(actor, "undo_last_collection")?;

    let (result, _) = run_transition(persistence, subscription_id, Command::UndoLastCollection)?;

    info!(subscription_id, actor_id = %actor.id, "Undid last collection");

    Ok(UndoCollectionResponse {
        subscription_id,
        next_collection_date: format_optional_date(
            result.new_subscription.next_collection_date,
        )?,
    })
}

/// Sets a subscription's pause window.
///
/// # Errors
///
/// Returns an error if the actor is not ops or the window is invalid.
pub fn pause_subscription(
    persistence: &mut Persistence,
    subscription_id: i64,
    request: &PauseSubscriptionRequest,
    actor: &AuthenticatedActor,
) -> Result<SubscriptionInfo, ApiError> {
    AuthorizationService::authorize_ops_action(actor, "pause_subscription")?;
    let from: Date = parse_date_field("pause_from", &request.pause_from)?;
    let to: Date = parse_date_field("pause_to", &request.pause_to)?;

    let (result, _) = run_transition(
        persistence,
        subscription_id,
        Command::SetPauseWindow { from, to },
    )?;

    info!(subscription_id, actor_id = %actor.id, "Paused subscription");
    subscription_info(&result.new_subscription)
}

/// Cancels a subscription (soft delete via status).
///
/// # Errors
///
/// Returns an error if the actor is not ops or the subscription is
/// missing.
pub fn cancel_subscription(
    persistence: &mut Persistence,
    subscription_id: i64,
    actor: &AuthenticatedActor,
) -> Result<SubscriptionInfo, ApiError> {
    AuthorizationService::authorize_ops_action(actor, "cancel_subscription")?;

    let (result, _) = run_transition(persistence, subscription_id, Command::Cancel)?;

    info!(subscription_id, actor_id = %actor.id, "Canceled subscription");
    subscription_info(&result.new_subscription)
}

/// Explicitly overrides a subscription's next collection date.
///
/// # Errors
///
/// Returns an error if the actor is not ops or the date is malformed.
pub fn override_next_collection(
    persistence: &mut Persistence,
    subscription_id: i64,
    request: &OverrideNextRequest,
    actor: &AuthenticatedActor,
) -> Result<SubscriptionInfo, ApiError> {
    AuthorizationService::authorize_ops_action(actor, "override_next_collection")?;
    let next_date: Date =
        parse_date_field("next_collection_date", &request.next_collection_date)?;

    let (result, _) = run_transition(
        persistence,
        subscription_id,
        Command::OverrideNextCollection { next_date },
    )?;

    info!(subscription_id, actor_id = %actor.id, "Overrode next collection date");
    subscription_info(&result.new_subscription)
}

/// Finds or creates the daily run for a dispatch key.
///
/// Idempotent: repeated calls return the same run, and a racing
/// duplicate creation resolves to the existing row rather than an
/// error.
///
/// # Errors
///
/// Returns an error if the actor is not ops or a field is malformed.
pub fn ensure_daily_run(
    persistence: &mut Persistence,
    request: &EnsureRunRequest,
    actor: &AuthenticatedActor,
) -> Result<DailyRunInfo, ApiError> {
    AuthorizationService::authorize_ops_action(actor, "ensure_daily_run")?;

    let key: RunKey = RunKey {
        run_date: parse_date_field("run_date", &request.run_date)?,
        route_day: parse_weekday(&request.route_day).map_err(translate_domain_error)?,
        route_area: request.route_area.clone(),
        route_slot: Slot::parse(&request.route_slot).map_err(translate_domain_error)?,
    };

    let run: DailyRun = persistence
        .ensure_daily_run(&key)
        .map_err(translate_persistence_error)?;

    info!(
        run_id = run.run_id.unwrap_or(0),
        key = %key.label(),
        actor_id = %actor.id,
        "Ensured daily run"
    );
    daily_run_info(&run)
}

/// Attaches a vehicle and staff set to a run.
///
/// # Errors
///
/// Returns an error if the actor is not ops or the run is missing.
pub fn assign_run(
    persistence: &mut Persistence,
    run_id: i64,
    request: &AssignRunRequest,
    actor: &AuthenticatedActor,
) -> Result<DailyRunInfo, ApiError> {
    AuthorizationService::authorize_ops_action(actor, "assign_run")?;

    persistence
        .update_run_assignment(run_id, request.vehicle.as_deref(), &request.staff)
        .map_err(translate_persistence_error)?;
    let run: DailyRun = persistence
        .get_daily_run(run_id)
        .map_err(translate_persistence_error)?;

    info!(run_id, actor_id = %actor.id, "Assigned run");
    daily_run_info(&run)
}

/// Lists all runs going out on a date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_runs(
    persistence: &mut Persistence,
    run_date: Date,
) -> Result<Vec<DailyRunInfo>, ApiError> {
    let runs: Vec<DailyRun> = persistence
        .list_runs_on(run_date)
        .map_err(translate_persistence_error)?;
    runs.iter().map(daily_run_info).collect()
}

/// Computes due counts per `"area|slot"` group for a run date.
///
/// Only subscriptions whose status counts for scheduling and which are
/// not paused on the date contribute; the recurring partition is sourced
/// here, the one-off and quote partitions belong to the booking
/// collaborators outside this engine.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn due_count(
    persistence: &mut Persistence,
    run_date: Date,
) -> Result<DueCountResponse, ApiError> {
    let candidates: Vec<Subscription> = persistence
        .subscriptions_due_on(run_date)
        .map_err(translate_persistence_error)?;

    let counts: BTreeMap<String, DueBreakdown> =
        due_counts(&due_stops(&candidates, run_date));
    let counts: BTreeMap<String, DueCountInfo> = counts
        .into_iter()
        .map(|(label, b)| {
            (
                label,
                DueCountInfo {
                    total: b.total,
                    recurring: b.recurring,
                    one_off: b.one_off,
                    quote: b.quote,
                },
            )
        })
        .collect();

    Ok(DueCountResponse {
        run_date: format_date(run_date)?,
        counts,
    })
}

/// Runs a bulk reassignment batch.
///
/// Rows are processed independently: a row that fails to persist is
/// reported as `failed` in its result line and does not abort the
/// batch. Under `dry_run` nothing is written regardless of outcome.
///
/// # Errors
///
/// Returns an error if the actor is not ops, an option is malformed, or
/// the initial scan fails.
pub fn bulk_reassign(
    persistence: &mut Persistence,
    request: &BulkReassignRequest,
    actor: &AuthenticatedActor,
    reference: Date,
) -> Result<BulkReassignResponse, ApiError> {
    AuthorizationService::authorize_ops_action(actor, "bulk_reassign")?;

    let statuses: Vec<SubscriptionStatus> = match &request.statuses {
        Some(labels) => labels
            .iter()
            .map(|label| SubscriptionStatus::from_str(label).map_err(translate_domain_error))
            .collect::<Result<_, _>>()?,
        None => vec![SubscriptionStatus::Active, SubscriptionStatus::Trialing],
    };
    let options: ReassignOptions = ReassignOptions {
        limit: request.limit.unwrap_or(kerbside::MAX_REASSIGN_LIMIT),
        dry_run: request.dry_run,
        force: request.force,
        recompute_next: request.recompute_next,
        statuses,
    };

    let catalogue: Vec<RouteArea> = persistence
        .list_route_areas(false)
        .map_err(translate_persistence_error)?;
    let limit: i64 = i64::try_from(options.effective_limit()).unwrap_or(i64::MAX);
    let scanned: Vec<Subscription> = persistence
        .list_subscriptions(&options.statuses, limit)
        .map_err(translate_persistence_error)?;

    let mut summary: ReassignSummary = ReassignSummary::default();
    let mut results: Vec<ReassignRowInfo> = Vec::with_capacity(scanned.len());

    for subscription in &scanned {
        let subscription_id: i64 = subscription.subscription_id.unwrap_or(0);
        let planned: Result<PlannedRow, _> = plan_reassignment(
            subscription,
            &catalogue,
            options.force,
            options.recompute_next,
            reference,
        );

        let row: ReassignRowInfo = match planned {
            Ok(planned) => {
                summary.record(planned.outcome);
                match reassign_row(persistence, subscription_id, &options, &planned) {
                    Ok(row) => row,
                    Err(e) => failed_row(subscription_id, &e),
                }
            }
            Err(e) => {
                summary.scanned += 1;
                failed_row(subscription_id, &translate_core_error(e))
            }
        };
        results.push(row);
    }

    info!(
        scanned = summary.scanned,
        updated = summary.updated,
        no_match = summary.no_match,
        skipped = summary.skipped,
        dry_run = options.dry_run,
        actor_id = %actor.id,
        "Bulk reassignment batch complete"
    );

    Ok(BulkReassignResponse {
        scanned: summary.scanned,
        updated: summary.updated,
        no_match: summary.no_match,
        skipped: summary.skipped,
        dry_run: options.dry_run,
        results,
    })
}

fn failed_row(subscription_id: i64, error: &ApiError) -> ReassignRowInfo {
    ReassignRowInfo {
        subscription_id,
        outcome: String::from("failed"),
        route_area: None,
        route_day: None,
        route_slot: None,
        next_collection_date: None,
        message: Some(error.to_string()),
    }
}

fn reassign_row(
    persistence: &mut Persistence,
    subscription_id: i64,
    options: &ReassignOptions,
    planned: &PlannedRow,
) -> Result<ReassignRowInfo, ApiError> {
    let mut row: ReassignRowInfo = ReassignRowInfo {
        subscription_id,
        outcome: planned.outcome.as_str().to_string(),
        route_area: None,
        route_day: None,
        route_slot: None,
        next_collection_date: None,
        message: None,
    };

    if let Some(change) = &planned.change {
        row.route_area = Some(change.route_area.clone());
        row.route_day = Some(weekday_name(change.route_day).to_string());
        row.route_slot = Some(change.route_slot.as_str().to_string());
        row.next_collection_date = format_optional_date(change.next_collection_date)?;
    }

    if planned.outcome == RowOutcome::Updated && !options.dry_run {
        let new_subscription: Subscription = planned
            .new_subscription
            .clone()
            .ok_or_else(|| ApiError::Internal {
                message: String::from("Updated row carried no new subscription state"),
            })?;
        persistence
            .persist_transition(
                subscription_id,
                &TransitionResult {
                    new_subscription,
                    ledger_op: LedgerOp::None,
                },
            )
            .map_err(translate_persistence_error)?;
    }

    Ok(row)
}

/// Raises an issue against a stop on a run.
///
/// # Errors
///
/// Returns an error if the actor is not staff, the run is missing, or
/// the reason is empty.
pub fn open_issue(
    persistence: &mut Persistence,
    run_id: i64,
    request: &OpenIssueRequest,
    actor: &AuthenticatedActor,
) -> Result<OpenIssueResponse, ApiError> {
    AuthorizationService::authorize_staff_action(actor, "open_issue")?;
    if request.reason.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("reason"),
            message: String::from("Issue reason must not be empty"),
        });
    }

    // Verify the run exists before attaching an issue to it.
    persistence
        .get_daily_run(run_id)
        .map_err(translate_persistence_error)?;

    let issue_id: i64 = persistence
        .insert_issue(
            run_id,
            request.subscription_id,
            &request.reason,
            request.details.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    info!(issue_id, run_id, actor_id = %actor.id, "Raised issue");
    Ok(OpenIssueResponse { issue_id })
}

/// Resolves an issue exactly once.
///
/// # Arguments
///
/// * `resolved_at` - The resolution timestamp (ISO 8601), supplied by
///   the caller so handlers stay clock-free
///
/// # Errors
///
/// Returns `Conflict` if the issue is already resolved, or
/// `InvalidInput` if the action note is empty.
pub fn resolve_issue(
    persistence: &mut Persistence,
    issue_id: i64,
    request: &ResolveIssueRequest,
    actor: &AuthenticatedActor,
    resolved_at: &str,
) -> Result<ResolveIssueResponse, ApiError> {
    AuthorizationService::authorize_ops_action(actor, "resolve_issue")?;
    validate_resolution_action(&request.action).map_err(translate_core_error)?;

    // Confirm the issue exists so "missing" and "already resolved" stay
    // distinguishable outcomes.
    persistence
        .get_issue(issue_id)
        .map_err(translate_persistence_error)?;

    let closed: bool = persistence
        .resolve_issue(issue_id, &request.action, &request.outcome, resolved_at)
        .map_err(translate_persistence_error)?;
    if !closed {
        return Err(ApiError::Conflict {
            message: format!("Issue {issue_id} is already resolved"),
        });
    }

    info!(issue_id, actor_id = %actor.id, "Resolved issue");
    Ok(ResolveIssueResponse {
        issue_id,
        resolved_at: resolved_at.to_string(),
    })
}

/// Lists all issues raised against a run.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_issues_for_run(
    persistence: &mut Persistence,
    run_id: i64,
) -> Result<Vec<IssueInfo>, ApiError> {
    let issues: Vec<Issue> = persistence
        .list_issues_for_run(run_id)
        .map_err(translate_persistence_error)?;
    Ok(issues.iter().map(issue_info).collect())
}

/// Lists the route catalogue.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_route_areas(
    persistence: &mut Persistence,
    include_inactive: bool,
) -> Result<Vec<RouteAreaInfo>, ApiError> {
    let catalogue: Vec<RouteArea> = persistence
        .list_route_areas(include_inactive)
        .map_err(translate_persistence_error)?;

    Ok(catalogue
        .iter()
        .map(|area| RouteAreaInfo {
            route_area_id: area.route_area_id().unwrap_or(0),
            area_name: area.area_name().to_string(),
            weekday: weekday_name(area.weekday()).to_string(),
            slot: area.slot().as_str().to_string(),
            prefixes: area.prefixes().to_vec(),
            is_active: area.is_active(),
            sort_order: area.sort_order(),
        })
        .collect())
}
