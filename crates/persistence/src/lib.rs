// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the dialer operations console.
//!
//! This crate stores phone numbers in `SQLite` through Diesel and executes
//! listing, counting, bulk actions, exports and imports against them. It is
//! the reference storage collaborator for the bulk-action engine; the
//! engine talks to it only through [`SqliteNumberStore`].
//!
//! ## Database
//!
//! - In-memory databases are shared-cache and uniquely named per call, so
//!   tests are isolated without time-based names.
//! - File databases run in WAL mode.
//! - Migrations are embedded and applied on open.
//!
//! ## Consistency
//!
//! A select-all target is resolved inside the same immediate transaction
//! that applies the action. Rows written by others between the operator's
//! "select all" and the request are evaluated as they are at execution time.

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

use diesel::SqliteConnection;
use dialer_console::{BulkAction, BulkTarget, ExportArtifact};
use dialer_console_domain::{CallStatus, FilterCriteria, NumberId, NumberRecord, Privilege};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod export;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use data_models::ImportReport;
pub use error::PersistenceError;
pub use export::{EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
pub use store::SqliteNumberStore;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for phone numbers.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_numbers_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
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

        Ok(Self { conn })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lists one page of numbers matching `filter`, in the filter's order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_numbers(
        &mut self,
        filter: &FilterCriteria,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<NumberRecord>, PersistenceError> {
        queries::list_numbers(&mut self.conn, filter, offset, limit)
    }

    /// Counts numbers matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_numbers(&mut self, filter: &FilterCriteria) -> Result<u64, PersistenceError> {
        queries::count_numbers(&mut self.conn, filter)
    }

    /// Retrieves a number by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_number(&mut self, id: NumberId) -> Result<Option<NumberRecord>, PersistenceError> {
        queries::get_number(&mut self.conn, id)
    }

    /// Renders every number of `target` as CSV.
    ///
    /// Read-only; no eligibility restriction applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or rendering fails.
    pub fn export_numbers(
        &mut self,
        target: &BulkTarget,
    ) -> Result<ExportArtifact, PersistenceError> {
        let rows = queries::export_rows(&mut self.conn, target)?;
        export::render_csv(&rows)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Applies a mutating bulk action on behalf of an operator at `privilege`.
    ///
    /// # Returns
    ///
    /// The number of rows changed or removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is unscoped for `privilege`, the
    /// action is an export, or the database fails.
    pub fn apply_bulk_action(
        &mut self,
        action: &BulkAction,
        target: &BulkTarget,
        privilege: Privilege,
    ) -> Result<u64, PersistenceError> {
        mutations::apply_bulk_action(
            &mut self.conn,
            action,
            target,
            privilege,
            OffsetDateTime::now_utc(),
        )
    }

    /// Records a dial attempt outcome reported by the dialer.
    ///
    /// # Errors
    ///
    /// Returns an error if the number does not exist or the database fails.
    pub fn record_call_attempt(
        &mut self,
        id: NumberId,
        status: CallStatus,
        at: OffsetDateTime,
    ) -> Result<NumberRecord, PersistenceError> {
        mutations::record_call_attempt(&mut self.conn, id, status, at)
    }

    /// Imports raw phone numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails.
    pub fn import_numbers(&mut self, raw_numbers: &[String]) -> Result<ImportReport, PersistenceError> {
        mutations::import_numbers(&mut self.conn, raw_numbers, OffsetDateTime::now_utc())
    }
}
