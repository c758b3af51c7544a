// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{LedgerOp, TransitionResult};
use kerbside_domain::{
    Subscription, SubscriptionStatus, add_days, next_due, validate_pause_window,
};
use kerbside_ledger::CollectionLogEntry;
use time::Date;

/// Applies a command to a subscription, producing the new subscription
/// state and the accompanying ledger operation.
///
/// This function is pure: it reads nothing but its arguments and writes
/// nothing. It either fully succeeds or returns a classified error with
/// no side effect; the persistence layer is responsible for executing the
/// result atomically.
///
/// # Arguments
///
/// * `subscription` - The current subscription state (immutable)
/// * `last_entry` - The most recent ledger entry for this subscription,
///   if any (required for undo)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new subscription and ledger op
/// * `Err(CoreError)` if the command is invalid for the current state
///
/// # Errors
///
/// Returns an error if:
/// - A collection is recorded against a canceled subscription
/// - An undo is requested with no ledger entry (`NoCollectionToUndo`)
/// - A pause window is inverted
/// - Date arithmetic fails or the recurrence cap is exceeded
pub fn apply(
    subscription: &Subscription,
    last_entry: Option<&CollectionLogEntry>,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::RecordCollection { collected_date } => {
            record_collection(subscription, collected_date)
        }
        Command::UndoLastCollection => undo_last_collection(subscription, last_entry),
        Command::AssignRoute {
            route_area,
            route_day,
            route_slot,
            next_date,
        } => {
            let mut new_subscription: Subscription = subscription.clone();
            new_subscription.route_area = Some(route_area);
            new_subscription.route_day = Some(route_day);
            new_subscription.route_slot = Some(route_slot);
            new_subscription.next_collection_date = Some(next_date);

            Ok(TransitionResult {
                new_subscription,
                ledger_op: LedgerOp::None,
            })
        }
        Command::OverrideNextCollection { next_date } => {
            let mut new_subscription: Subscription = subscription.clone();
            new_subscription.next_collection_date = Some(next_date);

            Ok(TransitionResult {
                new_subscription,
                ledger_op: LedgerOp::None,
            })
        }
        Command::SetPauseWindow { from, to } => {
            validate_pause_window(Some(from), Some(to))?;

            let mut new_subscription: Subscription = subscription.clone();
            new_subscription.pause_from = Some(from);
            new_subscription.pause_to = Some(to);

            Ok(TransitionResult {
                new_subscription,
                ledger_op: LedgerOp::None,
            })
        }
        Command::ClearPauseWindow => {
            let mut new_subscription: Subscription = subscription.clone();
            new_subscription.pause_from = None;
            new_subscription.pause_to = None;

            Ok(TransitionResult {
                new_subscription,
                ledger_op: LedgerOp::None,
            })
        }
        Command::Cancel => {
            let mut new_subscription: Subscription = subscription.clone();
            new_subscription.status = SubscriptionStatus::Canceled;

            Ok(TransitionResult {
                new_subscription,
                ledger_op: LedgerOp::None,
            })
        }
    }
}

/// Records a completed collection.
///
/// The new next collection date is
/// `next_due(collected_date, frequency, collected_date + 1 day)`, which
/// resolves to one full cycle after the actual collection date. The
/// ledger entry snapshots the next date that was in force before the
/// collection, making undo an exact restore.
fn record_collection(
    subscription: &Subscription,
    collected_date: Date,
) -> Result<TransitionResult, CoreError> {
    if subscription.status == SubscriptionStatus::Canceled {
        return Err(CoreError::LifecycleViolation {
            operation: "record a collection for",
            status: subscription.status,
        });
    }

    let day_after: Date = add_days(collected_date, 1)?;
    let new_next: Date = next_due(collected_date, subscription.frequency, day_after)?;

    let entry: CollectionLogEntry = CollectionLogEntry::new(
        subscription.subscription_id,
        collected_date,
        subscription.next_collection_date,
        new_next,
    );

    let mut new_subscription: Subscription = subscription.clone();
    new_subscription.next_collection_date = Some(new_next);

    Ok(TransitionResult {
        new_subscription,
        ledger_op: LedgerOp::Append(entry),
    })
}

/// Undoes the most recent recorded collection.
///
/// Restores the snapshot taken when the entry was appended. Record
/// followed immediately by undo leaves the subscription's next collection
/// date byte-identical to its value before the record.
fn undo_last_collection(
    subscription: &Subscription,
    last_entry: Option<&CollectionLogEntry>,
) -> Result<TransitionResult, CoreError> {
    let entry: &CollectionLogEntry = last_entry.ok_or(CoreError::NoCollectionToUndo {
        subscription_id: subscription.subscription_id,
    })?;

    let mut new_subscription: Subscription = subscription.clone();
    new_subscription.next_collection_date = entry.previous_next_collection_date;

    Ok(TransitionResult {
        new_subscription,
        ledger_op: LedgerOp::PopLast {
            entry_id: entry.entry_id,
        },
    })
}
