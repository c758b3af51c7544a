// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::PersistenceError;
use crate::tests::{create_test_persistence, create_test_route_area, create_test_subscription};
use kerbside::{Command, TransitionResult, apply};
use kerbside_domain::{RouteArea, Slot, Subscription, SubscriptionStatus};
use time::Weekday;
use time::macros::date;

#[test]
fn test_insert_and_get_subscription_round_trips() {
    let mut persistence = create_test_persistence();
    let subscription: Subscription = create_test_subscription();

    let id: i64 = persistence.insert_subscription(&subscription).unwrap();
    assert!(id > 0);

    let loaded: Subscription = persistence.get_subscription(id).unwrap();
    assert_eq!(loaded.subscription_id, Some(id));
    assert_eq!(loaded.customer_name, "Test Customer");
    assert_eq!(loaded.postcode.value(), "CF36 5AA");
    assert_eq!(loaded.frequency, subscription.frequency);
    assert_eq!(loaded.extra_bags, 2);
    assert!(loaded.use_own_bin);
    assert_eq!(loaded.status, SubscriptionStatus::Active);
    assert_eq!(loaded.route_area, None);
    assert_eq!(loaded.next_collection_date, None);
}

#[test]
fn test_get_missing_subscription_is_not_found() {
    let mut persistence = create_test_persistence();
    assert!(matches!(
        persistence.get_subscription(9999),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_route_fields_persist_through_transition() {
    let mut persistence = create_test_persistence();
    let id: i64 = persistence
        .insert_subscription(&create_test_subscription())
        .unwrap();
    let subscription: Subscription = persistence.get_subscription(id).unwrap();

    let result: TransitionResult = apply(
        &subscription,
        None,
        Command::AssignRoute {
            route_area: String::from("Porthcawl"),
            route_day: Weekday::Monday,
            route_slot: Slot::Am,
            next_date: date!(2024 - 01 - 01),
        },
    )
    .unwrap();
    persistence.persist_transition(id, &result).unwrap();

    let loaded: Subscription = persistence.get_subscription(id).unwrap();
    assert_eq!(loaded.route_area.as_deref(), Some("Porthcawl"));
    assert_eq!(loaded.route_day, Some(Weekday::Monday));
    assert_eq!(loaded.route_slot, Some(Slot::Am));
    assert_eq!(loaded.next_collection_date, Some(date!(2024 - 01 - 01)));
}

#[test]
fn test_pause_window_round_trips() {
    let mut persistence = create_test_persistence();
    let id: i64 = persistence
        .insert_subscription(&create_test_subscription())
        .unwrap();
    let subscription: Subscription = persistence.get_subscription(id).unwrap();

    let result: TransitionResult = apply(
        &subscription,
        None,
        Command::SetPauseWindow {
            from: date!(2024 - 03 - 01),
            to: date!(2024 - 03 - 10),
        },
    )
    .unwrap();
    persistence.persist_transition(id, &result).unwrap();

    let loaded: Subscription = persistence.get_subscription(id).unwrap();
    assert_eq!(loaded.pause_from, Some(date!(2024 - 03 - 01)));
    assert_eq!(loaded.pause_to, Some(date!(2024 - 03 - 10)));
}

#[test]
fn test_subscriptions_due_on_filters_by_date() {
    let mut persistence = create_test_persistence();

    for day in [1, 1, 8] {
        let id: i64 = persistence
            .insert_subscription(&create_test_subscription())
            .unwrap();
        let subscription: Subscription = persistence.get_subscription(id).unwrap();
        let result: TransitionResult = apply(
            &subscription,
            None,
            Command::OverrideNextCollection {
                next_date: time::Date::from_calendar_date(2024, time::Month::January, day)
                    .unwrap(),
            },
        )
        .unwrap();
        persistence.persist_transition(id, &result).unwrap();
    }

    let due: Vec<Subscription> = persistence
        .subscriptions_due_on(date!(2024 - 01 - 01))
        .unwrap();
    assert_eq!(due.len(), 2);
}

#[test]
fn test_list_subscriptions_respects_status_filter_and_limit() {
    let mut persistence = create_test_persistence();

    for status in [
        SubscriptionStatus::Active,
        SubscriptionStatus::Active,
        SubscriptionStatus::Canceled,
    ] {
        let mut subscription: Subscription = create_test_subscription();
        subscription.status = status;
        persistence.insert_subscription(&subscription).unwrap();
    }

    let active: Vec<Subscription> = persistence
        .list_subscriptions(&[SubscriptionStatus::Active], 50)
        .unwrap();
    assert_eq!(active.len(), 2);

    let limited: Vec<Subscription> = persistence
        .list_subscriptions(&[SubscriptionStatus::Active], 1)
        .unwrap();
    assert_eq!(limited.len(), 1);

    let canceled: Vec<Subscription> = persistence
        .list_subscriptions(&[SubscriptionStatus::Canceled], 50)
        .unwrap();
    assert_eq!(canceled.len(), 1);
}

#[test]
fn test_route_catalogue_round_trips() {
    let mut persistence = create_test_persistence();
    let area: RouteArea = create_test_route_area();

    let id: i64 = persistence.insert_route_area(&area).unwrap();
    assert!(id > 0);

    let catalogue: Vec<RouteArea> = persistence.list_route_areas(false).unwrap();
    assert_eq!(catalogue.len(), 1);
    assert_eq!(catalogue[0].route_area_id(), Some(id));
    assert_eq!(catalogue[0].area_name(), "Porthcawl");
    assert_eq!(catalogue[0].weekday(), Weekday::Monday);
    assert_eq!(catalogue[0].slot(), Slot::Am);
    assert_eq!(catalogue[0].prefixes(), &["CF36", "CF33"]);
    assert!(catalogue[0].is_active());
}

#[test]
fn test_deactivated_route_hidden_from_active_listing() {
    let mut persistence = create_test_persistence();
    let id: i64 = persistence
        .insert_route_area(&create_test_route_area())
        .unwrap();

    persistence.set_route_area_active(id, false).unwrap();

    assert!(persistence.list_route_areas(false).unwrap().is_empty());
    assert_eq!(persistence.list_route_areas(true).unwrap().len(), 1);
}

#[test]
fn test_catalogue_ordering_follows_sort_order() {
    let mut persistence = create_test_persistence();

    let second: RouteArea = RouteArea::new(
        "Bridgend",
        Weekday::Wednesday,
        Slot::Any,
        &[String::from("CF31")],
        20,
    );
    persistence.insert_route_area(&second).unwrap();
    persistence
        .insert_route_area(&create_test_route_area())
        .unwrap();

    let catalogue: Vec<RouteArea> = persistence.list_route_areas(false).unwrap();
    assert_eq!(catalogue[0].area_name(), "Porthcawl");
    assert_eq!(catalogue[1].area_name(), "Bridgend");
}
