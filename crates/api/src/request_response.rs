// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use koekalenteri::{Notice, PlannedMessage};
use koekalenteri_domain::{
    ClassDate, ClassEntryCounts, Event, EventClass, EventGroup, EventState, GroupChange,
    GroupedRegistrations, MoveDecision, MoveIntent, Registration, RegistrationDate,
    RegistrationGroup,
};
use koekalenteri_persistence::AuditRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API request to create or replace an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub id: String,
    pub event_type: String,
    pub name: String,
    /// Lifecycle state, e.g. `confirmed`.
    pub state: String,
    /// Slots offered on each trial day, e.g. `["ap", "ip"]`.
    #[serde(default)]
    pub default_times: Vec<String>,
    #[serde(default)]
    pub dates: Vec<ClassDate>,
    #[serde(default)]
    pub classes: Vec<EventClass>,
}

/// API response for a stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub event_id: String,
    /// A success message.
    pub message: String,
}

/// An event and the date-time groups its registrations may be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEventResponse {
    pub event: Event,
    pub event_groups: Vec<EventGroup>,
}

/// API request to register a dog for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub id: String,
    #[serde(default)]
    pub class: Option<String>,
    pub dog_name: String,
    #[serde(default)]
    pub dates: Vec<RegistrationDate>,
    /// An initial placement; registrations without one start in reserve.
    #[serde(default)]
    pub group: Option<RegistrationGroup>,
    #[serde(default)]
    pub reserve_notified: bool,
    #[serde(default)]
    pub confirmed: bool,
}

/// API response for a stored registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRegistrationResponse {
    pub registration_id: String,
    /// The list the registration resolves to.
    pub group_key: String,
    /// A success message.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRegistrationsResponse {
    pub event_id: String,
    pub registrations: Vec<Registration>,
}

/// Which class view to build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    /// The class; `None` for events without classes.
    #[serde(default)]
    pub class: Option<String>,
    /// The operator override for reordering a notified reserve list.
    #[serde(default)]
    pub unlock_arrange: bool,
}

/// The admin view of one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetSelectionResponse {
    pub event_id: String,
    pub class: Option<String>,
    pub state: EventState,
    pub event_groups: Vec<EventGroup>,
    pub lists: GroupedRegistrations,
    pub can_arrange_reserve: bool,
    pub entry_counts: BTreeMap<String, ClassEntryCounts>,
}

/// API request to judge, and optionally commit, a drag-and-drop move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateMoveRequest {
    #[serde(default)]
    pub class: Option<String>,
    pub intent: MoveIntent,
    #[serde(default)]
    pub unlock_arrange: bool,
    /// Save accepted changes right away.
    #[serde(default)]
    pub commit: bool,
    /// The operator already confirmed; lets `commit` save changes that need confirmation.
    #[serde(default)]
    pub confirmed: bool,
}

/// A notice for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeInfo {
    /// `info`, `warning`, `error` or `success`.
    pub severity: String,
    pub message: String,
}

impl From<Notice> for NoticeInfo {
    fn from(notice: Notice) -> Self {
        Self {
            severity: notice.severity.as_str().to_string(),
            message: notice.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluateMoveResponse {
    pub decision: MoveDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<NoticeInfo>,
    /// Present when the move was committed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<SaveGroupsResponse>,
}

/// API request to save group changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGroupsRequest {
    pub changes: Vec<GroupChange>,
}

/// A message owed to a registration's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMessageInfo {
    /// `picked`, `invitation`, `reserve` or `cancel`.
    pub kind: String,
    pub registration_id: String,
}

impl From<&PlannedMessage> for PlannedMessageInfo {
    fn from(message: &PlannedMessage) -> Self {
        Self {
            kind: message.kind.as_str().to_string(),
            registration_id: message.registration_id.clone(),
        }
    }
}

/// API response for a successful group save.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveGroupsResponse {
    pub event_id: String,
    /// Every registration of the event after renumbering.
    pub registrations: Vec<Registration>,
    /// Ids of the registrations whose placement changed.
    pub changed: Vec<String>,
    pub entry_counts: BTreeMap<String, ClassEntryCounts>,
    pub messages: Vec<PlannedMessageInfo>,
    pub audit_event_ids: Vec<i64>,
    /// A success message.
    pub message: String,
}

/// One entry of an audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntryInfo {
    pub audit_id: i64,
    pub registration_id: String,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before: String,
    pub after: String,
    pub created_at: Option<String>,
}

impl From<AuditRecord> for AuditEntryInfo {
    fn from(record: AuditRecord) -> Self {
        let event = record.event;
        Self {
            audit_id: record.audit_id,
            registration_id: event.registration_id,
            actor_id: event.actor.id,
            actor_type: event.actor.actor_type,
            cause_id: event.cause.id,
            cause_description: event.cause.description,
            action_name: event.action.name,
            action_details: event.action.details,
            before: event.before.data,
            after: event.after.data,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAuditTrailResponse {
    pub event_id: String,
    pub entries: Vec<AuditEntryInfo>,
}
