// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use koekalenteri_domain::Event;

use crate::data_models::{EventClassRow, EventRow};
use crate::diesel_schema::{event_classes, events};
use crate::error::PersistenceError;

/// Loads an event with its classes in their stored order.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no such event exists.
pub fn get_event(conn: &mut SqliteConnection, event_id: &str) -> Result<Event, PersistenceError> {
    let row: EventRow = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first::<EventRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::EventNotFound(event_id.to_string()))?;

    let classes: Vec<EventClassRow> = event_classes::table
        .filter(event_classes::event_id.eq(event_id))
        .order(event_classes::position.asc())
        .select(EventClassRow::as_select())
        .load::<EventClassRow>(conn)?;

    row.into_event(classes)
}

/// Returns true if the event is stored.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn event_exists(conn: &mut SqliteConnection, event_id: &str) -> Result<bool, PersistenceError> {
    let count: i64 = events::table
        .filter(events::event_id.eq(event_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
