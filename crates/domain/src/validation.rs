// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::patch::GroupChange;
use crate::types::{GROUP_KEY_CANCELLED, Registration, RegistrationTime};
use std::collections::HashSet;

/// Validates the structural fields of a registration.
///
/// This does NOT check that the registration's group exists in the event;
/// stale groups are tolerated and degrade to reserve.
///
/// # Arguments
///
/// * `registration` - The registration to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidRegistration` if:
/// - The id, event id or dog name is empty
/// - A day and slot is requested twice
/// - The all-day slot is requested together with another slot on the same day
/// - The stored order number is not finite
pub fn validate_registration(registration: &Registration) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidRegistration {
        registration_id: registration.id.clone(),
        reason: reason.to_string(),
    };

    if registration.id.is_empty() {
        return Err(invalid("Registration id cannot be empty"));
    }
    if registration.event_id.is_empty() {
        return Err(invalid("Event id cannot be empty"));
    }
    if registration.dog_name.trim().is_empty() {
        return Err(invalid("Dog name cannot be empty"));
    }

    let mut seen: HashSet<(time::Date, Option<RegistrationTime>)> = HashSet::new();
    for date in &registration.dates {
        if !seen.insert((date.date, date.time)) {
            return Err(invalid(&format!(
                "Date {} requested more than once",
                date.key()
            )));
        }
    }

    // kp cannot share a day with ap or ip
    for date in &registration.dates {
        if date.time != Some(RegistrationTime::Kp) {
            continue;
        }
        let mixed: bool = registration
            .dates
            .iter()
            .any(|d| d.date == date.date && d.time != Some(RegistrationTime::Kp));
        if mixed {
            return Err(invalid(&format!(
                "All-day slot on {} cannot be combined with other slots",
                crate::dates::format_date(date.date)
            )));
        }
    }

    if let Some(number) = registration.number().filter(|n| !n.is_finite()) {
        return Err(invalid(&format!("Invalid group number {number}")));
    }

    Ok(())
}

/// Validates a group change sent by a client against the event being modified.
///
/// # Errors
///
/// Returns an error if:
/// - The change targets another event (`DomainError::EventMismatch`)
/// - The group key is empty or the number is not finite
/// - The change marks a registration cancelled while placing it outside the cancelled list
pub fn validate_group_change(change: &GroupChange, event_id: &str) -> Result<(), DomainError> {
    if change.event_id != event_id {
        return Err(DomainError::EventMismatch {
            expected: event_id.to_string(),
            actual: change.event_id.clone(),
        });
    }

    let invalid = |reason: String| DomainError::InvalidRegistration {
        registration_id: change.id.clone(),
        reason,
    };

    if change.group.key.is_empty() {
        return Err(invalid(String::from("Group key cannot be empty")));
    }
    if let Some(number) = change.group.number.filter(|n| !n.is_finite()) {
        return Err(invalid(format!("Invalid group number {number}")));
    }
    if change.cancelled == Some(true) && change.group.key != GROUP_KEY_CANCELLED {
        return Err(invalid(format!(
            "Cancelled registration cannot be placed in '{}'",
            change.group.key
        )));
    }

    Ok(())
}
