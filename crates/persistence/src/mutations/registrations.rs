// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use koekalenteri_domain::Registration;

use crate::data_models::{RegistrationChangeset, RegistrationRow};
use crate::diesel_schema::registrations;
use crate::error::PersistenceError;
use crate::queries::event_exists;

/// Stores a new registration.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if its event is not stored and
/// `PersistenceError::AlreadyExists` if the id is taken.
pub fn insert_registration(
    conn: &mut SqliteConnection,
    registration: &Registration,
) -> Result<(), PersistenceError> {
    if !event_exists(conn, &registration.event_id)? {
        return Err(PersistenceError::EventNotFound(registration.event_id.clone()));
    }

    let row: RegistrationRow = RegistrationRow::from_registration(registration)?;
    diesel::insert_into(registrations::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Writes the group, flags and cancel reason of a registration.
///
/// Identity fields (event, class, dog, requested dates) are never changed here.
///
/// # Errors
///
/// Returns `PersistenceError::RegistrationNotFound` if no row was updated.
pub fn update_registration(
    conn: &mut SqliteConnection,
    registration: &Registration,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        registrations::table
            .filter(registrations::registration_id.eq(&registration.id))
            .filter(registrations::event_id.eq(&registration.event_id)),
    )
    .set(RegistrationChangeset::from_registration(registration))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::RegistrationNotFound(registration.id.clone()));
    }
    Ok(())
}
