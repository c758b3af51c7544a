// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use crate::{Frequency, Postcode, Slot, Subscription, SubscriptionStatus};
use std::str::FromStr;
use time::macros::date;

fn test_subscription() -> Subscription {
    Subscription::new(
        String::from("Test Customer"),
        Postcode::new("CF36 5AA").unwrap(),
        String::from("1 Esplanade Avenue"),
        Frequency::Weekly,
        0,
        false,
        SubscriptionStatus::Active,
    )
}

#[test]
fn test_postcode_normalization() {
    assert_eq!(Postcode::new("cf36 5aa").unwrap().value(), "CF36 5AA");
    assert_eq!(Postcode::new("  CF36   5AA  ").unwrap().value(), "CF36 5AA");
    assert_eq!(Postcode::new("cf365aa").unwrap().value(), "CF365AA");
}

#[test]
fn test_postcode_rejects_empty() {
    assert!(Postcode::new("").is_err());
    assert!(Postcode::new("   ").is_err());
}

#[test]
fn test_postcode_prefix_matching() {
    let postcode: Postcode = Postcode::new("CF36 5AA").unwrap();
    assert!(postcode.matches_prefix("CF36"));
    assert!(postcode.matches_prefix("CF36 5"));
    assert!(!postcode.matches_prefix("CF35"));
    assert!(!postcode.matches_prefix(""));
}

#[test]
fn test_frequency_days() {
    assert_eq!(Frequency::Weekly.days(), 7);
    assert_eq!(Frequency::Fortnightly.days(), 14);
    assert_eq!(Frequency::ThreeWeekly.days(), 21);
}

#[test]
fn test_frequency_from_days_rejects_unsupported_cycles() {
    assert_eq!(Frequency::from_days(7).unwrap(), Frequency::Weekly);
    assert_eq!(Frequency::from_days(14).unwrap(), Frequency::Fortnightly);
    assert_eq!(Frequency::from_days(21).unwrap(), Frequency::ThreeWeekly);
    assert!(Frequency::from_days(0).is_err());
    assert!(Frequency::from_days(10).is_err());
    assert!(Frequency::from_days(28).is_err());
}

#[test]
fn test_frequency_label_round_trip() {
    for frequency in [
        Frequency::Weekly,
        Frequency::Fortnightly,
        Frequency::ThreeWeekly,
    ] {
        assert_eq!(Frequency::from_str(frequency.as_str()).unwrap(), frequency);
    }
    assert!(Frequency::from_str("monthly").is_err());
}

#[test]
fn test_slot_parse_empty_means_any() {
    assert_eq!(Slot::parse("").unwrap(), Slot::Any);
    assert_eq!(Slot::parse("  ").unwrap(), Slot::Any);
    assert_eq!(Slot::parse("am").unwrap(), Slot::Am);
    assert_eq!(Slot::parse("PM").unwrap(), Slot::Pm);
    assert_eq!(Slot::parse("any").unwrap(), Slot::Any);
    assert!(Slot::parse("EVENING").is_err());
}

#[test]
fn test_slot_sort_index_ordering() {
    assert!(Slot::Am.sort_index() < Slot::Pm.sort_index());
    assert!(Slot::Pm.sort_index() < Slot::Any.sort_index());
}

#[test]
fn test_status_scheduling_membership() {
    assert!(SubscriptionStatus::Active.counts_for_scheduling());
    assert!(SubscriptionStatus::Trialing.counts_for_scheduling());
    assert!(!SubscriptionStatus::Paused.counts_for_scheduling());
    assert!(!SubscriptionStatus::Hold.counts_for_scheduling());
    assert!(!SubscriptionStatus::PastDue.counts_for_scheduling());
    assert!(!SubscriptionStatus::Unpaid.counts_for_scheduling());
    assert!(!SubscriptionStatus::Canceled.counts_for_scheduling());
}

#[test]
fn test_status_label_round_trip() {
    for status in [
        SubscriptionStatus::Active,
        SubscriptionStatus::Trialing,
        SubscriptionStatus::Paused,
        SubscriptionStatus::Hold,
        SubscriptionStatus::PastDue,
        SubscriptionStatus::Unpaid,
        SubscriptionStatus::Canceled,
    ] {
        assert_eq!(
            SubscriptionStatus::from_str(status.as_str()).unwrap(),
            status
        );
    }
    assert!(SubscriptionStatus::from_str("Active").is_err());
}

#[test]
fn test_pause_window_is_inclusive() {
    let mut subscription: Subscription = test_subscription();
    subscription.pause_from = Some(date!(2024 - 03 - 01));
    subscription.pause_to = Some(date!(2024 - 03 - 07));

    assert!(!subscription.is_paused_on(date!(2024 - 02 - 29)));
    assert!(subscription.is_paused_on(date!(2024 - 03 - 01)));
    assert!(subscription.is_paused_on(date!(2024 - 03 - 04)));
    assert!(subscription.is_paused_on(date!(2024 - 03 - 07)));
    assert!(!subscription.is_paused_on(date!(2024 - 03 - 08)));
}

#[test]
fn test_open_ended_pause_window() {
    let mut subscription: Subscription = test_subscription();
    subscription.pause_from = Some(date!(2024 - 03 - 01));

    assert!(!subscription.is_paused_on(date!(2024 - 02 - 28)));
    assert!(subscription.is_paused_on(date!(2025 - 01 - 01)));
}

#[test]
fn test_is_due_on_requires_exact_date_match() {
    let mut subscription: Subscription = test_subscription();
    subscription.next_collection_date = Some(date!(2024 - 03 - 04));

    assert!(subscription.is_due_on(date!(2024 - 03 - 04)));
    assert!(!subscription.is_due_on(date!(2024 - 03 - 03)));
    assert!(!subscription.is_due_on(date!(2024 - 03 - 05)));
}

#[test]
fn test_paused_subscription_is_not_due_regardless_of_next_date() {
    let mut subscription: Subscription = test_subscription();
    subscription.next_collection_date = Some(date!(2024 - 03 - 04));
    subscription.pause_from = Some(date!(2024 - 03 - 01));
    subscription.pause_to = Some(date!(2024 - 03 - 10));

    assert!(!subscription.is_due_on(date!(2024 - 03 - 04)));
}

#[test]
fn test_non_scheduling_statuses_are_not_due() {
    for status in [
        SubscriptionStatus::Hold,
        SubscriptionStatus::PastDue,
        SubscriptionStatus::Unpaid,
        SubscriptionStatus::Canceled,
    ] {
        let mut subscription: Subscription = test_subscription();
        subscription.status = status;
        subscription.next_collection_date = Some(date!(2024 - 03 - 04));
        assert!(!subscription.is_due_on(date!(2024 - 03 - 04)));
    }
}

#[test]
fn test_trialing_subscription_is_due() {
    let mut subscription: Subscription = test_subscription();
    subscription.status = SubscriptionStatus::Trialing;
    subscription.next_collection_date = Some(date!(2024 - 03 - 04));
    assert!(subscription.is_due_on(date!(2024 - 03 - 04)));
}
