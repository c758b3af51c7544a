// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{persisted_subscription, test_subscription};
use crate::{Command, CoreError, LedgerOp, TransitionResult, apply};
use kerbside_domain::{Slot, Subscription, SubscriptionStatus};
use kerbside_ledger::CollectionLogEntry;
use time::Weekday;
use time::macros::date;

#[test]
fn test_record_collection_advances_one_cycle_from_actual_date() {
    // Weekly subscription scheduled for 2024-01-01 but collected two
    // weeks late on 2024-01-15: the cycle re-anchors to the actual
    // collection date, so the next due date is 2024-01-22, not the
    // stale-schedule continuation 2024-01-08.
    let mut subscription: Subscription = persisted_subscription(7);
    subscription.next_collection_date = Some(date!(2024 - 01 - 01));

    let result: TransitionResult = apply(
        &subscription,
        None,
        Command::RecordCollection {
            collected_date: date!(2024 - 01 - 15),
        },
    )
    .unwrap();

    assert_eq!(
        result.new_subscription.next_collection_date,
        Some(date!(2024 - 01 - 22))
    );

    let LedgerOp::Append(entry) = &result.ledger_op else {
        panic!("record must append a ledger entry");
    };
    assert_eq!(entry.subscription_id, Some(7));
    assert_eq!(entry.collected_date, date!(2024 - 01 - 15));
    assert_eq!(
        entry.previous_next_collection_date,
        Some(date!(2024 - 01 - 01))
    );
    assert_eq!(entry.resulting_next_collection_date, date!(2024 - 01 - 22));
}

#[test]
fn test_record_collection_on_time() {
    let mut subscription: Subscription = persisted_subscription(7);
    subscription.next_collection_date = Some(date!(2024 - 01 - 08));

    let result: TransitionResult = apply(
        &subscription,
        None,
        Command::RecordCollection {
            collected_date: date!(2024 - 01 - 08),
        },
    )
    .unwrap();

    assert_eq!(
        result.new_subscription.next_collection_date,
        Some(date!(2024 - 01 - 15))
    );
}

#[test]
fn test_record_collection_without_existing_next_date() {
    let subscription: Subscription = persisted_subscription(7);
    assert_eq!(subscription.next_collection_date, None);

    let result: TransitionResult = apply(
        &subscription,
        None,
        Command::RecordCollection {
            collected_date: date!(2024 - 01 - 08),
        },
    )
    .unwrap();

    let LedgerOp::Append(entry) = &result.ledger_op else {
        panic!("record must append a ledger entry");
    };
    assert_eq!(entry.previous_next_collection_date, None);
    assert_eq!(
        result.new_subscription.next_collection_date,
        Some(date!(2024 - 01 - 15))
    );
}

#[test]
fn test_record_collection_rejected_for_canceled_subscription() {
    let mut subscription: Subscription = persisted_subscription(7);
    subscription.status = SubscriptionStatus::Canceled;

    let result = apply(
        &subscription,
        None,
        Command::RecordCollection {
            collected_date: date!(2024 - 01 - 08),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::LifecycleViolation {
            status: SubscriptionStatus::Canceled,
            ..
        })
    ));
}

#[test]
fn test_undo_restores_previous_date_exactly() {
    let mut subscription: Subscription = persisted_subscription(7);
    subscription.next_collection_date = Some(date!(2024 - 01 - 01));

    let recorded: TransitionResult = apply(
        &subscription,
        None,
        Command::RecordCollection {
            collected_date: date!(2024 - 01 - 15),
        },
    )
    .unwrap();
    let LedgerOp::Append(entry) = recorded.ledger_op else {
        panic!("record must append a ledger entry");
    };

    let undone: TransitionResult = apply(
        &recorded.new_subscription,
        Some(&entry),
        Command::UndoLastCollection,
    )
    .unwrap();

    // Exact round-trip: record then undo leaves the date byte-identical.
    assert_eq!(
        undone.new_subscription.next_collection_date,
        subscription.next_collection_date
    );
    assert!(matches!(undone.ledger_op, LedgerOp::PopLast { .. }));
}

#[test]
fn test_undo_restores_missing_previous_date() {
    let subscription: Subscription = persisted_subscription(7);

    let recorded: TransitionResult = apply(
        &subscription,
        None,
        Command::RecordCollection {
            collected_date: date!(2024 - 01 - 15),
        },
    )
    .unwrap();
    let LedgerOp::Append(entry) = recorded.ledger_op else {
        panic!("record must append a ledger entry");
    };

    let undone: TransitionResult = apply(
        &recorded.new_subscription,
        Some(&entry),
        Command::UndoLastCollection,
    )
    .unwrap();

    assert_eq!(undone.new_subscription.next_collection_date, None);
}

#[test]
fn test_undo_with_empty_ledger_is_reported_not_fatal() {
    let subscription: Subscription = persisted_subscription(7);

    let result = apply(&subscription, None, Command::UndoLastCollection);

    assert!(matches!(
        result,
        Err(CoreError::NoCollectionToUndo {
            subscription_id: Some(7)
        })
    ));
}

#[test]
fn test_undo_pops_the_identified_entry() {
    let subscription: Subscription = persisted_subscription(7);
    let entry: CollectionLogEntry = CollectionLogEntry::with_id(
        99,
        7,
        date!(2024 - 01 - 15),
        Some(date!(2024 - 01 - 01)),
        date!(2024 - 01 - 22),
        None,
    );

    let result: TransitionResult =
        apply(&subscription, Some(&entry), Command::UndoLastCollection).unwrap();

    assert!(matches!(
        result.ledger_op,
        LedgerOp::PopLast { entry_id: Some(99) }
    ));
}

#[test]
fn test_assign_route_sets_all_route_fields() {
    let subscription: Subscription = test_subscription();

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

    assert_eq!(
        result.new_subscription.route_area.as_deref(),
        Some("Porthcawl")
    );
    assert_eq!(result.new_subscription.route_day, Some(Weekday::Monday));
    assert_eq!(result.new_subscription.route_slot, Some(Slot::Am));
    assert_eq!(
        result.new_subscription.next_collection_date,
        Some(date!(2024 - 01 - 01))
    );
    assert!(matches!(result.ledger_op, LedgerOp::None));
}

#[test]
fn test_override_next_collection() {
    let mut subscription: Subscription = test_subscription();
    subscription.next_collection_date = Some(date!(2024 - 01 - 01));

    let result: TransitionResult = apply(
        &subscription,
        None,
        Command::OverrideNextCollection {
            next_date: date!(2024 - 02 - 05),
        },
    )
    .unwrap();

    assert_eq!(
        result.new_subscription.next_collection_date,
        Some(date!(2024 - 02 - 05))
    );
    assert!(matches!(result.ledger_op, LedgerOp::None));
}

#[test]
fn test_set_pause_window_validates_ordering() {
    let subscription: Subscription = test_subscription();

    let result = apply(
        &subscription,
        None,
        Command::SetPauseWindow {
            from: date!(2024 - 03 - 10),
            to: date!(2024 - 03 - 01),
        },
    );

    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn test_set_and_clear_pause_window() {
    let subscription: Subscription = test_subscription();

    let paused: TransitionResult = apply(
        &subscription,
        None,
        Command::SetPauseWindow {
            from: date!(2024 - 03 - 01),
            to: date!(2024 - 03 - 10),
        },
    )
    .unwrap();
    assert_eq!(
        paused.new_subscription.pause_from,
        Some(date!(2024 - 03 - 01))
    );
    assert_eq!(paused.new_subscription.pause_to, Some(date!(2024 - 03 - 10)));

    let cleared: TransitionResult = apply(
        &paused.new_subscription,
        None,
        Command::ClearPauseWindow,
    )
    .unwrap();
    assert_eq!(cleared.new_subscription.pause_from, None);
    assert_eq!(cleared.new_subscription.pause_to, None);
}

#[test]
fn test_cancel_is_a_soft_delete() {
    let subscription: Subscription = test_subscription();

    let result: TransitionResult = apply(&subscription, None, Command::Cancel).unwrap();

    assert_eq!(
        result.new_subscription.status,
        SubscriptionStatus::Canceled
    );
    // History and fields are retained; only the status changes.
    assert_eq!(
        result.new_subscription.customer_name,
        subscription.customer_name
    );
    assert!(matches!(result.ledger_op, LedgerOp::None));
}

#[test]
fn test_apply_never_mutates_its_input() {
    let mut subscription: Subscription = persisted_subscription(7);
    subscription.next_collection_date = Some(date!(2024 - 01 - 01));
    let before: Subscription = subscription.clone();

    let _ = apply(
        &subscription,
        None,
        Command::RecordCollection {
            collected_date: date!(2024 - 01 - 15),
        },
    )
    .unwrap();

    assert_eq!(subscription, before);
}
