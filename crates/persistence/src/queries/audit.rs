// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{AuditEventRow, AuditRecord};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// The audit trail of an event, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event
/// * `registration_id` - Restricts the trail to one registration when present
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn get_audit_trail(
    conn: &mut SqliteConnection,
    event_id: &str,
    registration_id: Option<&str>,
) -> Result<Vec<AuditRecord>, PersistenceError> {
    let mut query = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .into_boxed();
    if let Some(id) = registration_id {
        query = query.filter(audit_events::registration_id.eq(id));
    }

    query
        .order(audit_events::audit_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(AuditEventRow::into_record)
        .collect()
}
