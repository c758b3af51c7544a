// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! The collection ledger.
//!
//! Every completed collection appends exactly one [`CollectionLogEntry`].
//! Entries are immutable once created: the ledger is append-only, and the
//! only removal ever performed is popping the most recent entry for a
//! subscription during an undo. The entry snapshots the next collection
//! date that was in force *before* the collection, which is what makes
//! undo an exact restore rather than a recomputation.

use time::Date;

/// One completed collection event.
///
/// The most recent entry per subscription is the undo target. Entries are
/// never mutated; an undo removes the entry and restores the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLogEntry {
    /// Canonical numeric identifier assigned by the database.
    /// `None` indicates the entry has not been persisted yet.
    pub entry_id: Option<i64>,
    /// The subscription this entry belongs to.
    /// `None` before the subscription itself has been persisted.
    pub subscription_id: Option<i64>,
    /// The date the collection actually happened.
    pub collected_date: Date,
    /// The subscription's next collection date before this collection.
    /// Restored verbatim on undo; `None` if no date was set.
    pub previous_next_collection_date: Option<Date>,
    /// The next collection date produced by this collection.
    pub resulting_next_collection_date: Date,
    /// Creation timestamp (ISO 8601), assigned by the database.
    pub created_at: Option<String>,
}

impl CollectionLogEntry {
    /// Creates a new unpersisted `CollectionLogEntry`.
    ///
    /// # Arguments
    ///
    /// * `subscription_id` - The subscription the entry belongs to
    /// * `collected_date` - The date the collection happened
    /// * `previous_next_collection_date` - Snapshot of the date in force
    ///   before the collection
    /// * `resulting_next_collection_date` - The date produced by the
    ///   collection
    #[must_use]
    pub const fn new(
        subscription_id: Option<i64>,
        collected_date: Date,
        previous_next_collection_date: Option<Date>,
        resulting_next_collection_date: Date,
    ) -> Self {
        Self {
            entry_id: None,
            subscription_id,
            collected_date,
            previous_next_collection_date,
            resulting_next_collection_date,
            created_at: None,
        }
    }

    /// Creates a `CollectionLogEntry` with persisted identifiers.
    #[must_use]
    pub const fn with_id(
        entry_id: i64,
        subscription_id: i64,
        collected_date: Date,
        previous_next_collection_date: Option<Date>,
        resulting_next_collection_date: Date,
        created_at: Option<String>,
    ) -> Self {
        Self {
            entry_id: Some(entry_id),
            subscription_id: Some(subscription_id),
            collected_date,
            previous_next_collection_date,
            resulting_next_collection_date,
            created_at,
        }
    }
}
