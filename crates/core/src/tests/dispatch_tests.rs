// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::persisted_subscription;
use crate::{DueBreakdown, DueStop, RunKey, UNROUTED_AREA_LABEL, due_counts, due_stops};
use kerbside_domain::{Slot, Subscription, SubscriptionStatus};
use std::collections::BTreeMap;
use time::Weekday;
use time::macros::date;

fn due_subscription(id: i64, area: &str, slot: Slot) -> Subscription {
    let mut subscription: Subscription = persisted_subscription(id);
    subscription.route_area = Some(area.to_string());
    subscription.route_day = Some(Weekday::Monday);
    subscription.route_slot = Some(slot);
    subscription.next_collection_date = Some(date!(2024 - 03 - 04));
    subscription
}

#[test]
fn test_run_key_label() {
    let key: RunKey = RunKey {
        run_date: date!(2024 - 03 - 04),
        route_day: Weekday::Monday,
        route_area: String::from("Porthcawl"),
        route_slot: Slot::Am,
    };
    assert_eq!(key.label(), "Porthcawl|AM");
}

#[test]
fn test_due_stops_excludes_paused_subscription() {
    // Three active subscriptions due 2024-03-04; one paused over the date.
    let mut paused: Subscription = due_subscription(4, "Porthcawl", Slot::Am);
    paused.pause_from = Some(date!(2024 - 03 - 01));
    paused.pause_to = Some(date!(2024 - 03 - 08));

    let subscriptions: Vec<Subscription> = vec![
        due_subscription(1, "Porthcawl", Slot::Am),
        due_subscription(2, "Porthcawl", Slot::Am),
        due_subscription(3, "Porthcawl", Slot::Am),
        paused,
    ];

    let stops: Vec<DueStop> = due_stops(&subscriptions, date!(2024 - 03 - 04));
    assert_eq!(stops.len(), 3);

    let counts: BTreeMap<String, DueBreakdown> = due_counts(&stops);
    assert_eq!(counts.get("Porthcawl|AM").map(|b| b.total), Some(3));
}

#[test]
fn test_due_stops_excludes_wrong_date_and_status() {
    let mut wrong_date: Subscription = due_subscription(1, "Porthcawl", Slot::Am);
    wrong_date.next_collection_date = Some(date!(2024 - 03 - 11));

    let mut on_hold: Subscription = due_subscription(2, "Porthcawl", Slot::Am);
    on_hold.status = SubscriptionStatus::Hold;

    let subscriptions: Vec<Subscription> = vec![
        wrong_date,
        on_hold,
        due_subscription(3, "Porthcawl", Slot::Am),
    ];

    let stops: Vec<DueStop> = due_stops(&subscriptions, date!(2024 - 03 - 04));
    assert_eq!(stops.len(), 1);
}

#[test]
fn test_due_counts_group_by_area_and_slot() {
    let subscriptions: Vec<Subscription> = vec![
        due_subscription(1, "Porthcawl", Slot::Am),
        due_subscription(2, "Porthcawl", Slot::Pm),
        due_subscription(3, "Porthcawl", Slot::Am),
        due_subscription(4, "Bridgend", Slot::Any),
    ];

    let counts: BTreeMap<String, DueBreakdown> =
        due_counts(&due_stops(&subscriptions, date!(2024 - 03 - 04)));

    assert_eq!(counts.len(), 3);
    assert_eq!(counts.get("Porthcawl|AM").map(|b| b.total), Some(2));
    assert_eq!(counts.get("Porthcawl|PM").map(|b| b.total), Some(1));
    assert_eq!(counts.get("Bridgend|ANY").map(|b| b.total), Some(1));
}

#[test]
fn test_due_counts_partition_is_exclusive() {
    let subscriptions: Vec<Subscription> = vec![due_subscription(1, "Porthcawl", Slot::Am)];
    let counts: BTreeMap<String, DueBreakdown> =
        due_counts(&due_stops(&subscriptions, date!(2024 - 03 - 04)));

    let breakdown: &DueBreakdown = counts.get("Porthcawl|AM").unwrap();
    assert_eq!(breakdown.total, 1);
    assert_eq!(breakdown.recurring, 1);
    assert_eq!(breakdown.one_off, 0);
    assert_eq!(breakdown.quote, 0);
    assert_eq!(
        breakdown.recurring + breakdown.one_off + breakdown.quote,
        breakdown.total
    );
}

#[test]
fn test_unrouted_due_subscriptions_stay_visible() {
    let mut unrouted: Subscription = persisted_subscription(1);
    unrouted.next_collection_date = Some(date!(2024 - 03 - 04));

    let counts: BTreeMap<String, DueBreakdown> =
        due_counts(&due_stops(&[unrouted], date!(2024 - 03 - 04)));

    let label: String = format!("{UNROUTED_AREA_LABEL}|ANY");
    assert_eq!(counts.get(&label).map(|b| b.total), Some(1));
}
