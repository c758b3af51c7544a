// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! MySQL/MariaDB backend validation tests.
//!
//! These tests are explicitly ignored and never run under plain
//! `cargo test`. They are executed by `cargo xtask test-mariadb`, which
//! provisions a `MariaDB` container, sets `DATABASE_URL` and
//! `KERBSIDE_TEST_BACKEND=mariadb`, runs the ignored tests, and cleans
//! the container up. Missing infrastructure is a failure, not a skip.

use crate::Persistence;
use crate::tests::{create_test_route_area, create_test_subscription};
use kerbside::{Command, DailyRun, RunKey, TransitionResult, apply};
use kerbside_domain::{RouteArea, Subscription};
use kerbside_ledger::CollectionLogEntry;
use kerbside_domain::Slot;
use time::Weekday;
use time::macros::date;

fn mariadb_persistence() -> Persistence {
    let backend: String = std::env::var("KERBSIDE_TEST_BACKEND")
        .expect("KERBSIDE_TEST_BACKEND must be set by `cargo xtask test-mariadb`");
    assert_eq!(backend, "mariadb", "unexpected test backend: {backend}");

    let database_url: String = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set by `cargo xtask test-mariadb`");
    Persistence::new_with_mysql(&database_url).expect("Failed to connect to MariaDB")
}

#[test]
#[ignore = "requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mariadb_migrations_and_subscription_round_trip() {
    let mut persistence: Persistence = mariadb_persistence();

    let id: i64 = persistence
        .insert_subscription(&create_test_subscription())
        .unwrap();
    let loaded: Subscription = persistence.get_subscription(id).unwrap();

    assert_eq!(loaded.subscription_id, Some(id));
    assert_eq!(loaded.postcode.value(), "CF36 5AA");
}

#[test]
#[ignore = "requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mariadb_transition_transactionality() {
    let mut persistence: Persistence = mariadb_persistence();

    let id: i64 = persistence
        .insert_subscription(&create_test_subscription())
        .unwrap();
    let subscription: Subscription = persistence.get_subscription(id).unwrap();

    let result: TransitionResult = apply(
        &subscription,
        None,
        Command::RecordCollection {
            collected_date: date!(2024 - 01 - 01),
        },
    )
    .unwrap();
    persistence.persist_transition(id, &result).unwrap();

    let loaded: Subscription = persistence.get_subscription(id).unwrap();
    assert_eq!(loaded.next_collection_date, Some(date!(2024 - 01 - 08)));

    let entry: CollectionLogEntry = persistence.last_collection_entry(id).unwrap().unwrap();
    assert_eq!(entry.resulting_next_collection_date, date!(2024 - 01 - 08));
}

#[test]
#[ignore = "requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mariadb_daily_run_unique_constraint() {
    let mut persistence: Persistence = mariadb_persistence();

    let key: RunKey = RunKey {
        run_date: date!(2030 - 03 - 04),
        route_day: Weekday::Monday,
        route_area: String::from("Porthcawl"),
        route_slot: Slot::Am,
    };

    let first: DailyRun = persistence.ensure_daily_run(&key).unwrap();
    let second: DailyRun = persistence.ensure_daily_run(&key).unwrap();
    assert_eq!(first.run_id, second.run_id);
}

#[test]
#[ignore = "requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mariadb_route_catalogue_round_trip() {
    let mut persistence: Persistence = mariadb_persistence();

    let id: i64 = persistence
        .insert_route_area(&create_test_route_area())
        .unwrap();
    let catalogue: Vec<RouteArea> = persistence.list_route_areas(true).unwrap();

    assert!(catalogue.iter().any(|a| a.route_area_id() == Some(id)));
}
