// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persisting the outcome of an authoritative group save.

use diesel::prelude::*;
use diesel::SqliteConnection;
use koekalenteri::TransitionResult;
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::audit::insert_audit_event;
use crate::mutations::registrations::update_registration;

/// What a group save wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistGroupSaveResult {
    /// Number of registration rows updated.
    pub updated: usize,
    /// Ids of the appended audit events, in order.
    pub audit_ids: Vec<i64>,
}

/// Writes the changed registrations and their audit events in one transaction.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is written in that case.
pub fn persist_group_save(
    conn: &mut SqliteConnection,
    event_id: &str,
    result: &TransitionResult,
) -> Result<PersistGroupSaveResult, PersistenceError> {
    let outcome: PersistGroupSaveResult = conn.transaction::<_, PersistenceError, _>(|conn| {
        for registration in &result.changed {
            update_registration(conn, registration)?;
        }
        let audit_ids: Vec<i64> = result
            .audit_events
            .iter()
            .map(|event| insert_audit_event(conn, event))
            .collect::<Result<_, _>>()?;
        Ok(PersistGroupSaveResult {
            updated: result.changed.len(),
            audit_ids,
        })
    })?;

    info!(
        event_id,
        updated = outcome.updated,
        audit_events = outcome.audit_ids.len(),
        "Group save persisted"
    );
    Ok(outcome)
}
