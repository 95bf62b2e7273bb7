// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence for liftbook.
//!
//! [`Persistence`] owns one Diesel connection and implements
//! [`liftbook::QueryGateway`], so every record in the core crate loads and
//! commits through it. Around that it keeps:
//!
//! - embedded migrations for the entity, relation and `edit_log` tables
//! - a running [`QueryStatistics`] total and a call counter
//! - a [`DataChanged`] broadcast after each successful write
//! - audit history lookups over `edit_log`
//!
//! ## Testing
//!
//! Tests use [`Persistence::new_in_memory`], which hands out a uniquely
//! named shared in-memory database per call.

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

use diesel::{RunQueryDsl, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{info, warn};

mod backend;
mod connectivity;
mod data_models;
mod diesel_schema;
mod dynamic_row;
mod error;
mod gateway;
mod mutations;
mod notifications;
mod queries;
mod settings;
mod statistics;

#[cfg(test)]
mod tests;

pub use connectivity::classify;
pub use data_models::EditLogRow;
pub use dynamic_row::DynamicRow;
pub use error::PersistenceError;
pub use notifications::{ChangeBroadcaster, DataChanged};
pub use settings::{ConnectionSettings, DEFAULT_CONNECT_TIMEOUT, session_user};
pub use statistics::QueryStatistics;

use backend::PersistenceBackend;
use liftbook_audit::AuditEntry;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The SQLite query gateway.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
    pub(crate) settings: ConnectionSettings,
    pub(crate) statistics: QueryStatistics,
    pub(crate) call_count: u64,
    pub(crate) changes: ChangeBroadcaster,
}

impl Persistence {
    /// Opens (and migrates) the database described by `settings`.
    ///
    /// File databases are switched to WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, migrated, or does
    /// not enforce foreign keys.
    pub fn connect(settings: ConnectionSettings) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&settings.database_url, settings.connect_timeout)?;

        if !settings.is_in_memory() {
            backend::sqlite::enable_wal_mode(&mut conn)?;
        }

        conn.verify_foreign_key_enforcement()?;

        info!(
            connection = %settings.describe(),
            user = %settings.user_name,
            "Connected to database"
        );

        Ok(Self {
            conn,
            settings,
            statistics: QueryStatistics::default(),
            call_count: 0,
            changes: ChangeBroadcaster::new(),
        })
    }

    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// Each call receives a unique shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");
        Self::connect(ConnectionSettings::new(shared_memory_url))
    }

    /// Creates a persistence adapter over a database file, creating it if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not UTF-8 or the database cannot be
    /// opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::DatabaseConnectionFailed("Invalid database path".to_string())
        })?;
        Self::connect(ConnectionSettings::new(path_str))
    }

    /// Attributes subsequent audit rows to `user_name`.
    #[must_use]
    pub fn with_user_name(mut self, user_name: &str) -> Self {
        self.settings = self.settings.with_user_name(Some(user_name));
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Tries to open the database without keeping the connection.
    ///
    /// Returns `Ok(false)` when the failure is a recognized connectivity
    /// fault.
    ///
    /// # Errors
    ///
    /// Returns any other failure unchanged.
    pub fn probe(settings: &ConnectionSettings) -> Result<bool, PersistenceError> {
        match backend::sqlite::open(&settings.database_url, settings.connect_timeout) {
            Ok(_) => Ok(true),
            Err(err) => match err.connectivity_fault() {
                Some(fault) => {
                    warn!(connection = %settings.describe(), %fault, "Database unreachable");
                    Ok(false)
                }
                None => Err(err),
            },
        }
    }

    /// Liveness check on the open connection.
    ///
    /// Returns `Ok(false)` when the failure is a recognized connectivity
    /// fault.
    ///
    /// # Errors
    ///
    /// Returns any other failure.
    pub fn check_connection(&mut self) -> Result<bool, PersistenceError> {
        match diesel::sql_query("SELECT 1").execute(&mut self.conn) {
            Ok(_) => Ok(true),
            Err(err) => {
                let err: PersistenceError = PersistenceError::from(err);
                match err.connectivity_fault() {
                    Some(fault) => {
                        warn!(connection = %self.settings.describe(), %fault, "Connection lost");
                        Ok(false)
                    }
                    None => Err(err),
                }
            }
        }
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Receives a [`DataChanged`] for every successful write from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.changes.subscribe()
    }

    /// Totals since the connection opened or the last reset.
    #[must_use]
    pub const fn statistics(&self) -> &QueryStatistics {
        &self.statistics
    }

    /// Gateway calls made since the connection opened.
    #[must_use]
    pub const fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Zeroes the statistics. The call counter keeps running.
    pub fn reset_statistics(&mut self) {
        self.statistics = QueryStatistics::default();
    }

    /// Audit entries for one record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn edit_history(
        &mut self,
        table_name: &str,
        item_id: i64,
    ) -> Result<Vec<AuditEntry>, PersistenceError> {
        queries::edit_history(&mut self.conn, table_name, item_id)
    }

    /// Number of rows in the audit log.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn edit_log_count(&mut self) -> Result<i64, PersistenceError> {
        queries::count_edit_log(&mut self.conn)
    }
}
