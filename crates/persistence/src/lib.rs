// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Kerbside Collections.
//!
//! This crate provides database persistence for subscriptions, the route
//! catalogue, the collection ledger, daily runs, and issues. It is built
//! on Diesel and supports multiple database backends.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default) — Used for development, unit tests, and
//!   integration tests. Always available, no external infrastructure.
//! - **`MariaDB`/`MySQL`** — Compiled by default, validated via explicit
//!   opt-in tests only (`cargo xtask test-mariadb`).
//!
//! ## Migration Strategy
//!
//! Due to `SQL` syntax differences between backends, we maintain separate
//! migration directories:
//!
//! - `migrations/` — `SQLite`-specific (default)
//! - `migrations_mysql/` — `MySQL`/`MariaDB`-specific
//!
//! Both produce identical schema semantics but use backend-appropriate
//! syntax. Parity is enforced by `cargo xtask verify-migrations`.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against `SQLite` only
//! - Backend validation tests are explicitly marked `#[ignore]`
//! - External database tests never run automatically
//! - All infrastructure is orchestrated by `xtask`, not embedded in tests

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{MysqlConnection, SqliteConnection};
use kerbside::{DailyRun, Issue, RunKey, TransitionResult};
use kerbside_domain::{
    DomainError, RouteArea, Subscription, SubscriptionStatus, format_ymd, weekday_name,
};
use kerbside_ledger::CollectionLogEntry;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// This macro generates two separate functions from a single function body:
/// - One suffixed with `_sqlite` taking `&mut SqliteConnection`
/// - One suffixed with `_mysql` taking `&mut MysqlConnection`
///
/// This approach is required because Diesel's type system requires concrete
/// backend types at compile time and cannot handle generic backend functions.
///
/// # Constraints
///
/// - The macro ONLY duplicates function bodies and substitutes connection types
/// - No logic, branching, or dispatch occurs within the macro
/// - Backend dispatch happens exclusively in the Persistence adapter
/// - The generated functions are completely monomorphic
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    CollectionLogRow, DailyRunRow, IssueRow, RouteAreaRow, SubscriptionRow,
};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Internal enum for backend-specific database connections.
///
/// This enum allows the persistence adapter to work with either `SQLite`
/// or `MySQL` backends while maintaining a single public API.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter for the scheduling engine's storage.
///
/// Backend-agnostic: backend selection happens once at construction time
/// and is transparent to callers. All dates cross this boundary as
/// domain `Date` values and are stored as `YYYY-MM-DD` text.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

fn serialize_date(date: Date) -> Result<String, PersistenceError> {
    format_ymd(date).map_err(|e: DomainError| PersistenceError::SerializationError(e.to_string()))
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a `MySQL`/`MariaDB`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `database_url` - The `MySQL` connection URL
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;
        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.verify_foreign_key_enforcement(),
            BackendConnection::Mysql(conn) => conn.verify_foreign_key_enforcement(),
        }
    }

    // ========================================================================
    // Route Catalogue
    // ========================================================================

    /// Inserts a route area into the catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn insert_route_area(&mut self, route_area: &RouteArea) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::insert_route_area_sqlite(conn, route_area)
            }
            BackendConnection::Mysql(conn) => mutations::insert_route_area_mysql(conn, route_area),
        }
    }

    /// Activates or deactivates a route area.
    ///
    /// # Errors
    ///
    /// Returns an error if the route area does not exist.
    pub fn set_route_area_active(
        &mut self,
        route_area_id: i64,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::set_route_area_active_sqlite(conn, route_area_id, is_active)
            }
            BackendConnection::Mysql(conn) => {
                mutations::set_route_area_active_mysql(conn, route_area_id, is_active)
            }
        }
    }

    /// Lists the route catalogue in display order.
    ///
    /// # Arguments
    ///
    /// * `include_inactive` - Whether deactivated routes are included
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be converted.
    pub fn list_route_areas(
        &mut self,
        include_inactive: bool,
    ) -> Result<Vec<RouteArea>, PersistenceError> {
        let rows: Vec<RouteAreaRow> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::list_route_areas_sqlite(conn, include_inactive)?
            }
            BackendConnection::Mysql(conn) => {
                queries::list_route_areas_mysql(conn, include_inactive)?
            }
        };
        rows.into_iter().map(RouteAreaRow::into_domain).collect()
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Inserts a new subscription.
    ///
    /// # Returns
    ///
    /// The generated `subscription_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn insert_subscription(
        &mut self,
        subscription: &Subscription,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::insert_subscription_sqlite(conn, subscription)
            }
            BackendConnection::Mysql(conn) => {
                mutations::insert_subscription_mysql(conn, subscription)
            }
        }
    }

    /// Retrieves a subscription by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the subscription does not exist, or a
    /// `ReconstructionError` if the stored row is corrupt.
    pub fn get_subscription(
        &mut self,
        subscription_id: i64,
    ) -> Result<Subscription, PersistenceError> {
        let row: SubscriptionRow = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::get_subscription_sqlite(conn, subscription_id)?
            }
            BackendConnection::Mysql(conn) => {
                queries::get_subscription_mysql(conn, subscription_id)?
            }
        };
        row.into_domain()
    }

    /// Lists subscriptions in a status set, oldest first, bounded by a
    /// limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be converted.
    pub fn list_subscriptions(
        &mut self,
        statuses: &[SubscriptionStatus],
        limit: i64,
    ) -> Result<Vec<Subscription>, PersistenceError> {
        let labels: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
        let rows: Vec<SubscriptionRow> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::list_subscriptions_sqlite(conn, &labels, limit)?
            }
            BackendConnection::Mysql(conn) => {
                queries::list_subscriptions_mysql(conn, &labels, limit)?
            }
        };
        rows.into_iter().map(SubscriptionRow::into_domain).collect()
    }

    /// Lists subscriptions whose next collection date equals a date.
    ///
    /// The engine applies the status/pause rules on top of this set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be converted.
    pub fn subscriptions_due_on(
        &mut self,
        run_date: Date,
    ) -> Result<Vec<Subscription>, PersistenceError> {
        let date: String = serialize_date(run_date)?;
        let rows: Vec<SubscriptionRow> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::subscriptions_due_on_sqlite(conn, &date)?,
            BackendConnection::Mysql(conn) => queries::subscriptions_due_on_mysql(conn, &date)?,
        };
        rows.into_iter().map(SubscriptionRow::into_domain).collect()
    }

    /// Persists a transition atomically.
    ///
    /// The subscription update and the ledger operation happen inside a
    /// single transaction; partial application is not possible.
    ///
    /// # Arguments
    ///
    /// * `subscription_id` - The subscription the transition applies to
    /// * `result` - The transition produced by the engine
    ///
    /// # Returns
    ///
    /// The generated ledger `entry_id` when the transition appended one.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; the transaction rolls back.
    pub fn persist_transition(
        &mut self,
        subscription_id: i64,
        result: &TransitionResult,
    ) -> Result<Option<i64>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::persist_transition_sqlite(conn, subscription_id, result)
            }
            BackendConnection::Mysql(conn) => {
                mutations::persist_transition_mysql(conn, subscription_id, result)
            }
        }
    }

    // ========================================================================
    // Collection Ledger
    // ========================================================================

    /// Retrieves the most recent ledger entry for a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub fn last_collection_entry(
        &mut self,
        subscription_id: i64,
    ) -> Result<Option<CollectionLogEntry>, PersistenceError> {
        let row: Option<CollectionLogRow> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::last_collection_entry_sqlite(conn, subscription_id)?
            }
            BackendConnection::Mysql(conn) => {
                queries::last_collection_entry_mysql(conn, subscription_id)?
            }
        };
        row.map(CollectionLogRow::into_domain).transpose()
    }

    /// Lists all ledger entries for a subscription, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn list_collection_entries(
        &mut self,
        subscription_id: i64,
    ) -> Result<Vec<CollectionLogEntry>, PersistenceError> {
        let rows: Vec<CollectionLogRow> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::list_collection_entries_sqlite(conn, subscription_id)?
            }
            BackendConnection::Mysql(conn) => {
                queries::list_collection_entries_mysql(conn, subscription_id)?
            }
        };
        rows.into_iter().map(CollectionLogRow::into_domain).collect()
    }

    // ========================================================================
    // Daily Runs
    // ========================================================================

    /// Finds or creates the daily run for a dispatch key.
    ///
    /// Idempotent: repeated (including concurrent) calls with the same
    /// key yield the same row. A newly created run has no vehicle,
    /// staff, or notes; assignment is a separate explicit update.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or creation fails.
    pub fn ensure_daily_run(&mut self, key: &RunKey) -> Result<DailyRun, PersistenceError> {
        let run_date: String = serialize_date(key.run_date)?;
        let route_day: &str = weekday_name(key.route_day);
        let route_slot: &str = key.route_slot.as_str();

        let row: DailyRunRow = match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::ensure_daily_run_sqlite(
                conn,
                &run_date,
                route_day,
                &key.route_area,
                route_slot,
            )?,
            BackendConnection::Mysql(conn) => mutations::ensure_daily_run_mysql(
                conn,
                &run_date,
                route_day,
                &key.route_area,
                route_slot,
            )?,
        };
        row.into_domain()
    }

    /// Retrieves a daily run by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the run does not exist.
    pub fn get_daily_run(&mut self, run_id: i64) -> Result<DailyRun, PersistenceError> {
        let row: DailyRunRow = match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_daily_run_sqlite(conn, run_id)?,
            BackendConnection::Mysql(conn) => queries::get_daily_run_mysql(conn, run_id)?,
        };
        row.into_domain()
    }

    /// Lists all runs going out on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn list_runs_on(&mut self, run_date: Date) -> Result<Vec<DailyRun>, PersistenceError> {
        let date: String = serialize_date(run_date)?;
        let rows: Vec<DailyRunRow> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::list_runs_on_sqlite(conn, &date)?,
            BackendConnection::Mysql(conn) => queries::list_runs_on_mysql(conn, &date)?,
        };
        rows.into_iter().map(DailyRunRow::into_domain).collect()
    }

    /// Attaches a vehicle and staff set to a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the run does not exist or serialization fails.
    pub fn update_run_assignment(
        &mut self,
        run_id: i64,
        vehicle: Option<&str>,
        staff: &[String],
    ) -> Result<(), PersistenceError> {
        let staff_json: String = serde_json::to_string(staff)?;
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::update_run_assignment_sqlite(conn, run_id, vehicle, &staff_json)
            }
            BackendConnection::Mysql(conn) => {
                mutations::update_run_assignment_mysql(conn, run_id, vehicle, &staff_json)
            }
        }
    }

    /// Sets the free-text notes on a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the run does not exist.
    pub fn update_run_notes(
        &mut self,
        run_id: i64,
        notes: Option<&str>,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::update_run_notes_sqlite(conn, run_id, notes)
            }
            BackendConnection::Mysql(conn) => mutations::update_run_notes_mysql(conn, run_id, notes),
        }
    }

    // ========================================================================
    // Issues
    // ========================================================================

    /// Inserts a new open issue against a run.
    ///
    /// # Returns
    ///
    /// The generated `issue_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn insert_issue(
        &mut self,
        run_id: i64,
        subscription_id: Option<i64>,
        reason: &str,
        details: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::insert_issue_sqlite(conn, run_id, subscription_id, reason, details)
            }
            BackendConnection::Mysql(conn) => {
                mutations::insert_issue_mysql(conn, run_id, subscription_id, reason, details)
            }
        }
    }

    /// Retrieves an issue by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the issue does not exist.
    pub fn get_issue(&mut self, issue_id: i64) -> Result<Issue, PersistenceError> {
        let row: IssueRow = match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_issue_sqlite(conn, issue_id)?,
            BackendConnection::Mysql(conn) => queries::get_issue_mysql(conn, issue_id)?,
        };
        Ok(row.into_domain())
    }

    /// Lists all issues raised against a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_issues_for_run(&mut self, run_id: i64) -> Result<Vec<Issue>, PersistenceError> {
        let rows: Vec<IssueRow> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::list_issues_for_run_sqlite(conn, run_id)?,
            BackendConnection::Mysql(conn) => queries::list_issues_for_run_mysql(conn, run_id)?,
        };
        Ok(rows.into_iter().map(IssueRow::into_domain).collect())
    }

    /// Resolves an open issue.
    ///
    /// Guarded on the issue still being open, so an issue is closed
    /// exactly once even under concurrent submissions.
    ///
    /// # Returns
    ///
    /// `true` when this call closed the issue, `false` when it was
    /// already closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn resolve_issue(
        &mut self,
        issue_id: i64,
        action: &str,
        outcome: &str,
        resolved_at: &str,
    ) -> Result<bool, PersistenceError> {
        let updated: usize = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::resolve_issue_sqlite(conn, issue_id, action, outcome, resolved_at)?
            }
            BackendConnection::Mysql(conn) => {
                mutations::resolve_issue_mysql(conn, issue_id, action, outcome, resolved_at)?
            }
        };
        Ok(updated == 1)
    }
}
