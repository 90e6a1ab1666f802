// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Koekalenteri.
//!
//! Events, registrations and the audit trail are stored in `SQLite` through
//! Diesel. Group saves are written in a single transaction: the changed
//! registrations and one audit event per change.
//!
//! ## Databases
//!
//! - In-memory databases use a shared-cache URI with a unique name per
//!   instance, so tests are isolated from one another.
//! - File databases run in WAL mode.
//!
//! Both enforce foreign keys and apply the embedded migrations on open.

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
use koekalenteri::TransitionResult;
use koekalenteri_audit::AuditEvent;
use koekalenteri_domain::{Event, Registration};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::AuditRecord;
pub use error::PersistenceError;
pub use mutations::PersistGroupSaveResult;

use backend::Journal;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Every call gets its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:koekalenteri_mem_{db_id}?mode=memory&cache=shared");

        Ok(Self {
            conn: backend::open(&url, Journal::Default)?,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
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

        Ok(Self {
            conn: backend::open(path_str, Journal::Wal)?,
        })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Inserts or replaces an event and its classes.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be written.
    pub fn upsert_event(&mut self, event: &Event) -> Result<(), PersistenceError> {
        mutations::upsert_event(&mut self.conn, event)
    }

    /// Loads an event.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if it does not exist.
    pub fn get_event(&mut self, event_id: &str) -> Result<Event, PersistenceError> {
        queries::get_event(&mut self.conn, event_id)
    }

    // ========================================================================
    // Registrations
    // ========================================================================

    /// Stores a new registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing or the id is taken.
    pub fn insert_registration(
        &mut self,
        registration: &Registration,
    ) -> Result<(), PersistenceError> {
        mutations::insert_registration(&mut self.conn, registration)
    }

    /// Writes the group, flags and cancel reason of one registration.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RegistrationNotFound` if it does not exist.
    pub fn update_registration(
        &mut self,
        registration: &Registration,
    ) -> Result<(), PersistenceError> {
        mutations::update_registration(&mut self.conn, registration)
    }

    /// Lists the registrations of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_registrations(
        &mut self,
        event_id: &str,
    ) -> Result<Vec<Registration>, PersistenceError> {
        queries::list_registrations(&mut self.conn, event_id)
    }

    /// Loads one registration.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RegistrationNotFound` if it does not exist.
    pub fn get_registration(
        &mut self,
        event_id: &str,
        registration_id: &str,
    ) -> Result<Registration, PersistenceError> {
        queries::get_registration(&mut self.conn, event_id, registration_id)
    }

    // ========================================================================
    // Group saves & audit
    // ========================================================================

    /// Persists the outcome of a group save in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is written in that case.
    pub fn persist_group_save(
        &mut self,
        event_id: &str,
        result: &TransitionResult,
    ) -> Result<PersistGroupSaveResult, PersistenceError> {
        mutations::persist_group_save(&mut self.conn, event_id, result)
    }

    /// Appends a single audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be written.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::insert_audit_event(&mut self.conn, event)
    }

    /// The audit trail of an event, optionally for one registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_trail(
        &mut self,
        event_id: &str,
        registration_id: Option<&str>,
    ) -> Result<Vec<AuditRecord>, PersistenceError> {
        queries::get_audit_trail(&mut self.conn, event_id, registration_id)
    }
}
