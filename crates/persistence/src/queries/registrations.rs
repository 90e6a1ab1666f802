// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use koekalenteri_domain::Registration;

use crate::data_models::RegistrationRow;
use crate::diesel_schema::registrations;
use crate::error::PersistenceError;

/// Lists the registrations of an event in the order they were created.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_registrations(
    conn: &mut SqliteConnection,
    event_id: &str,
) -> Result<Vec<Registration>, PersistenceError> {
    registrations::table
        .filter(registrations::event_id.eq(event_id))
        .order((registrations::created_at.asc(), registrations::registration_id.asc()))
        .select(RegistrationRow::as_select())
        .load::<RegistrationRow>(conn)?
        .into_iter()
        .map(RegistrationRow::into_registration)
        .collect()
}

/// Loads one registration of an event.
///
/// # Errors
///
/// Returns `PersistenceError::RegistrationNotFound` if it does not exist.
pub fn get_registration(
    conn: &mut SqliteConnection,
    event_id: &str,
    registration_id: &str,
) -> Result<Registration, PersistenceError> {
    registrations::table
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::registration_id.eq(registration_id))
        .select(RegistrationRow::as_select())
        .first::<RegistrationRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::RegistrationNotFound(registration_id.to_string()))?
        .into_registration()
}
