// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use koekalenteri_domain::Event;
use tracing::debug;

use crate::data_models::{EventClassRow, EventRow};
use crate::diesel_schema::{event_classes, events};
use crate::error::PersistenceError;

/// Inserts or replaces an event and its classes.
///
/// Registrations and audit events of an existing event are kept.
///
/// # Errors
///
/// Returns an error if serialization or any statement fails. Nothing is
/// written in that case.
pub fn upsert_event(conn: &mut SqliteConnection, event: &Event) -> Result<(), PersistenceError> {
    let row: EventRow = EventRow::from_event(event)?;
    let classes: Vec<EventClassRow> = event
        .classes
        .iter()
        .enumerate()
        .map(|(position, class)| EventClassRow::from_class(&event.id, position, class))
        .collect::<Result<_, _>>()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(events::table)
            .values(&row)
            .on_conflict(events::event_id)
            .do_update()
            .set((
                events::event_type.eq(&row.event_type),
                events::name.eq(&row.name),
                events::state.eq(&row.state),
                events::default_times_json.eq(&row.default_times_json),
                events::dates_json.eq(&row.dates_json),
            ))
            .execute(conn)?;

        diesel::delete(event_classes::table.filter(event_classes::event_id.eq(&event.id)))
            .execute(conn)?;
        if !classes.is_empty() {
            diesel::insert_into(event_classes::table)
                .values(&classes)
                .execute(conn)?;
        }
        Ok(())
    })?;

    debug!(event_id = %event.id, classes = classes.len(), "Event stored");
    Ok(())
}
