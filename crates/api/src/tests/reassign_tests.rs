// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{bulk_reassign, create_subscription, get_subscription};
use crate::request_response::{
    BulkReassignRequest, BulkReassignResponse, CreateSubscriptionResponse, SubscriptionInfo,
};
use crate::tests::helpers::{
    create_test_persistence, driver_actor, ops_actor, seed_catalogue, subscription_request,
};
use kerbside_domain::{RouteArea, Slot};
use time::Weekday;
use time::macros::date;

fn reassign_request(dry_run: bool, force: bool) -> BulkReassignRequest {
    BulkReassignRequest {
        limit: Some(50),
        dry_run,
        force,
        recompute_next: false,
        statuses: None,
    }
}

#[test]
fn test_bulk_reassign_is_ops_only() {
    let mut persistence = create_test_persistence();

    assert!(matches!(
        bulk_reassign(
            &mut persistence,
            &reassign_request(true, false),
            &driver_actor(),
            date!(2024 - 01 - 01)
        ),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_dry_run_never_mutates_subscriptions() {
    let mut persistence = create_test_persistence();

    // Create the subscriptions while the catalogue is empty, so they
    // land unrouted; then seed the catalogue so a reassignment would
    // match them.
    let mut ids: Vec<i64> = Vec::new();
    for _ in 0..3 {
        let created: CreateSubscriptionResponse = create_subscription(
            &mut persistence,
            subscription_request("CF36 5AA"),
            date!(2024 - 01 - 01),
        )
        .unwrap();
        ids.push(created.subscription_id);
    }
    seed_catalogue(&mut persistence);

    let response: BulkReassignResponse = bulk_reassign(
        &mut persistence,
        &reassign_request(true, false),
        &ops_actor(),
        date!(2024 - 01 - 01),
    )
    .unwrap();

    assert!(response.dry_run);
    assert_eq!(response.scanned, 3);
    assert_eq!(response.updated, 3);

    // The report shows the would-be change, but nothing was written.
    for id in ids {
        let info: SubscriptionInfo = get_subscription(&mut persistence, id).unwrap();
        assert_eq!(info.route_area, None);
        assert_eq!(info.next_collection_date, None);
    }
}

#[test]
fn test_apply_writes_route_and_next_date() {
    let mut persistence = create_test_persistence();

    let created: CreateSubscriptionResponse = create_subscription(
        &mut persistence,
        subscription_request("CF36 5AA"),
        date!(2024 - 01 - 01),
    )
    .unwrap();
    seed_catalogue(&mut persistence);

    let response: BulkReassignResponse = bulk_reassign(
        &mut persistence,
        &reassign_request(false, false),
        &ops_actor(),
        date!(2024 - 01 - 01),
    )
    .unwrap();

    assert_eq!(response.updated, 1);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].outcome, "updated");
    assert_eq!(response.results[0].route_area.as_deref(), Some("Porthcawl"));

    let info: SubscriptionInfo =
        get_subscription(&mut persistence, created.subscription_id).unwrap();
    assert_eq!(info.route_area.as_deref(), Some("Porthcawl"));
    assert_eq!(info.route_day.as_deref(), Some("Monday"));
    assert_eq!(info.next_collection_date.as_deref(), Some("2024-01-01"));
}

#[test]
fn test_assigned_route_is_skipped_without_force() {
    let mut persistence = create_test_persistence();

    // Route the subscription to Porthcawl via the normal creation path.
    seed_catalogue(&mut persistence);
    let created: CreateSubscriptionResponse = create_subscription(
        &mut persistence,
        subscription_request("CF36 5AA"),
        date!(2024 - 01 - 01),
    )
    .unwrap();

    // Add a competing route that would now win the sort.
    persistence
        .insert_route_area(&RouteArea::new(
            "Porthcawl Early",
            Weekday::Monday,
            Slot::Am,
            &[String::from("CF36")],
            5,
        ))
        .unwrap();

    let response: BulkReassignResponse = bulk_reassign(
        &mut persistence,
        &reassign_request(false, false),
        &ops_actor(),
        date!(2024 - 01 - 01),
    )
    .unwrap();

    assert_eq!(response.skipped, 1);
    assert_eq!(response.updated, 0);
    assert_eq!(response.results[0].outcome, "skipped");

    // The ops-curated assignment is untouched.
    let info: SubscriptionInfo =
        get_subscription(&mut persistence, created.subscription_id).unwrap();
    assert_eq!(info.route_area.as_deref(), Some("Porthcawl"));
}

#[test]
fn test_unmatched_rows_are_classified_no_match() {
    let mut persistence = create_test_persistence();
    seed_catalogue(&mut persistence);

    create_subscription(
        &mut persistence,
        subscription_request("SA1 1AA"),
        date!(2024 - 01 - 01),
    )
    .unwrap();

    let response: BulkReassignResponse = bulk_reassign(
        &mut persistence,
        &reassign_request(false, true),
        &ops_actor(),
        date!(2024 - 01 - 01),
    )
    .unwrap();

    assert_eq!(response.no_match, 1);
    assert_eq!(response.results[0].outcome, "no_match");
}

#[test]
fn test_statuses_filter_excludes_canceled_by_default() {
    let mut persistence = create_test_persistence();

    let mut canceled = subscription_request("CF36 5AA");
    canceled.status = Some(String::from("canceled"));
    create_subscription(&mut persistence, canceled, date!(2024 - 01 - 01)).unwrap();
    create_subscription(
        &mut persistence,
        subscription_request("CF36 5AA"),
        date!(2024 - 01 - 01),
    )
    .unwrap();
    seed_catalogue(&mut persistence);

    let response: BulkReassignResponse = bulk_reassign(
        &mut persistence,
        &reassign_request(true, false),
        &ops_actor(),
        date!(2024 - 01 - 01),
    )
    .unwrap();

    assert_eq!(response.scanned, 1);
}

#[test]
fn test_limit_is_clamped_to_the_hard_cap() {
    let mut persistence = create_test_persistence();

    let request = BulkReassignRequest {
        limit: Some(100_000),
        dry_run: true,
        force: false,
        recompute_next: false,
        statuses: None,
    };

    // No subscriptions: the call succeeds and simply scans nothing; the
    // clamp itself is covered by the engine's options tests.
    let response: BulkReassignResponse = bulk_reassign(
        &mut persistence,
        &request,
        &ops_actor(),
        date!(2024 - 01 - 01),
    )
    .unwrap();
    assert_eq!(response.scanned, 0);
}

#[test]
fn test_invalid_status_label_is_rejected() {
    let mut persistence = create_test_persistence();

    let request = BulkReassignRequest {
        limit: None,
        dry_run: true,
        force: false,
        recompute_next: false,
        statuses: Some(vec![String::from("zombie")]),
    };

    assert!(matches!(
        bulk_reassign(&mut persistence, &request, &ops_actor(), date!(2024 - 01 - 01)),
        Err(ApiError::InvalidInput { field, .. }) if field == "status"
    ));
}
