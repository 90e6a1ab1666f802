// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.
//!
//! Nested values (trial days, requested dates, audit parts) are stored as
//! JSON text. The registration's group is flattened into columns so lists
//! can be queried directly.

use diesel::prelude::*;
use koekalenteri_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use koekalenteri_domain::dates::{format_date, parse_date};
use koekalenteri_domain::{
    ClassDate, Event, EventClass, EventState, Registration, RegistrationDate, RegistrationGroup,
    RegistrationTime,
};
use num_traits::ToPrimitive;

use crate::diesel_schema::{audit_events, event_classes, events, registrations};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = events)]
pub struct EventRow {
    pub event_id: String,
    pub event_type: String,
    pub name: String,
    pub state: String,
    pub default_times_json: String,
    pub dates_json: String,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = event_classes)]
pub struct EventClassRow {
    pub event_id: String,
    pub class: String,
    pub position: i32,
    pub state: Option<String>,
    pub dates_json: String,
    pub places: i32,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = registrations)]
pub struct RegistrationRow {
    pub registration_id: String,
    pub event_id: String,
    pub event_type: String,
    pub class: Option<String>,
    pub dog_name: String,
    pub dates_json: String,
    pub cancelled: bool,
    pub cancel_reason: Option<String>,
    pub reserve_notified: bool,
    pub confirmed: bool,
    pub group_key: Option<String>,
    pub group_number: Option<f64>,
    pub group_date: Option<String>,
    pub group_time: Option<String>,
}

/// The mutable part of a registration row.
///
/// `treat_none_as_null` so that clearing a group or a cancel reason is written.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = registrations, treat_none_as_null = true)]
pub struct RegistrationChangeset {
    pub cancelled: bool,
    pub cancel_reason: Option<String>,
    pub reserve_notified: bool,
    pub confirmed: bool,
    pub group_key: Option<String>,
    pub group_number: Option<f64>,
    pub group_date: Option<String>,
    pub group_time: Option<String>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub audit_id: i64,
    pub event_id: String,
    pub registration_id: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent {
    pub event_id: String,
    pub registration_id: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}

/// A stored audit event with its database identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub audit_id: i64,
    pub created_at: Option<String>,
    pub event: AuditEvent,
}

impl EventRow {
    pub fn from_event(event: &Event) -> Result<Self, PersistenceError> {
        Ok(Self {
            event_id: event.id.clone(),
            event_type: event.event_type.clone(),
            name: event.name.clone(),
            state: event.state.as_str().to_string(),
            default_times_json: serde_json::to_string(&event.default_times)?,
            dates_json: serde_json::to_string(&event.dates)?,
        })
    }

    /// Rebuilds the event from its row and its class rows.
    pub fn into_event(self, classes: Vec<EventClassRow>) -> Result<Event, PersistenceError> {
        let default_times: Vec<RegistrationTime> = serde_json::from_str(&self.default_times_json)?;
        let dates: Vec<ClassDate> = serde_json::from_str(&self.dates_json)?;
        let classes: Vec<EventClass> = classes
            .into_iter()
            .map(EventClassRow::into_class)
            .collect::<Result<_, _>>()?;

        Ok(Event {
            id: self.event_id,
            event_type: self.event_type,
            name: self.name,
            state: self.state.parse::<EventState>()?,
            default_times,
            dates,
            classes,
        })
    }
}

impl EventClassRow {
    pub fn from_class(
        event_id: &str,
        position: usize,
        class: &EventClass,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            event_id: event_id.to_string(),
            class: class.class.clone(),
            position: position.to_i32().ok_or_else(|| {
                PersistenceError::SerializationError(format!("Class position {position} out of range"))
            })?,
            state: class.state.map(|s| s.as_str().to_string()),
            dates_json: serde_json::to_string(&class.dates)?,
            places: class.places.to_i32().ok_or_else(|| {
                PersistenceError::SerializationError(format!("Places {} out of range", class.places))
            })?,
        })
    }

    fn into_class(self) -> Result<EventClass, PersistenceError> {
        let state: Option<EventState> = self
            .state
            .as_deref()
            .map(str::parse::<EventState>)
            .transpose()?;
        let places: u32 = self.places.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!("Negative places for class {}", self.class))
        })?;

        Ok(EventClass {
            dates: serde_json::from_str(&self.dates_json)?,
            class: self.class,
            state,
            places,
        })
    }
}

impl RegistrationRow {
    pub fn from_registration(registration: &Registration) -> Result<Self, PersistenceError> {
        let changes: RegistrationChangeset = RegistrationChangeset::from_registration(registration);
        Ok(Self {
            registration_id: registration.id.clone(),
            event_id: registration.event_id.clone(),
            event_type: registration.event_type.clone(),
            class: registration.class.clone(),
            dog_name: registration.dog_name.clone(),
            dates_json: serde_json::to_string(&registration.dates)?,
            cancelled: changes.cancelled,
            cancel_reason: changes.cancel_reason,
            reserve_notified: changes.reserve_notified,
            confirmed: changes.confirmed,
            group_key: changes.group_key,
            group_number: changes.group_number,
            group_date: changes.group_date,
            group_time: changes.group_time,
        })
    }

    pub fn into_registration(self) -> Result<Registration, PersistenceError> {
        let dates: Vec<RegistrationDate> = serde_json::from_str(&self.dates_json)?;
        let group: Option<RegistrationGroup> = match self.group_key {
            Some(key) => Some(RegistrationGroup {
                key,
                number: self.group_number,
                date: self.group_date.as_deref().map(parse_date).transpose()?,
                time: self
                    .group_time
                    .as_deref()
                    .map(str::parse::<RegistrationTime>)
                    .transpose()?,
            }),
            None => None,
        };

        Ok(Registration {
            id: self.registration_id,
            event_id: self.event_id,
            event_type: self.event_type,
            class: self.class,
            dog_name: self.dog_name,
            dates,
            cancelled: self.cancelled,
            cancel_reason: self.cancel_reason,
            reserve_notified: self.reserve_notified,
            confirmed: self.confirmed,
            group,
        })
    }
}

impl RegistrationChangeset {
    #[must_use]
    pub fn from_registration(registration: &Registration) -> Self {
        let group: Option<&RegistrationGroup> = registration.group.as_ref();
        Self {
            cancelled: registration.cancelled,
            cancel_reason: registration.cancel_reason.clone(),
            reserve_notified: registration.reserve_notified,
            confirmed: registration.confirmed,
            group_key: group.map(|g| g.key.clone()),
            group_number: group.and_then(|g| g.number),
            group_date: group.and_then(|g| g.date).map(format_date),
            group_time: group.and_then(|g| g.time).map(|t| t.as_str().to_string()),
        }
    }
}

impl NewAuditEvent {
    pub fn from_audit_event(event: &AuditEvent) -> Result<Self, PersistenceError> {
        Ok(Self {
            event_id: event.event_id.clone(),
            registration_id: event.registration_id.clone(),
            actor_json: serde_json::to_string(&event.actor)?,
            cause_json: serde_json::to_string(&event.cause)?,
            action_json: serde_json::to_string(&event.action)?,
            before_snapshot_json: serde_json::to_string(&event.before)?,
            after_snapshot_json: serde_json::to_string(&event.after)?,
        })
    }
}

impl AuditEventRow {
    pub fn into_record(self) -> Result<AuditRecord, PersistenceError> {
        let actor: Actor = serde_json::from_str(&self.actor_json)?;
        let cause: Cause = serde_json::from_str(&self.cause_json)?;
        let action: Action = serde_json::from_str(&self.action_json)?;
        let before: StateSnapshot = serde_json::from_str(&self.before_snapshot_json)?;
        let after: StateSnapshot = serde_json::from_str(&self.after_snapshot_json)?;

        Ok(AuditRecord {
            audit_id: self.audit_id,
            created_at: self.created_at,
            event: AuditEvent::new(
                self.event_id,
                self.registration_id,
                actor,
                cause,
                action,
                before,
                after,
            ),
        })
    }
}
