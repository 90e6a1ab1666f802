// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use koekalenteri_audit::AuditEvent;

use crate::backend::last_insert_rowid;
use crate::data_models::NewAuditEvent;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Appends an audit event, returning its id.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let row: NewAuditEvent = NewAuditEvent::from_audit_event(event)?;
    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)?;
    last_insert_rowid(conn)
}
