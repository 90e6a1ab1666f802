// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request handlers.
//!
//! Each handler loads what it needs from persistence, runs the pure domain
//! and core logic, and writes the outcome back. Errors are translated at
//! this boundary.

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AuditEntryInfo, CreateEventRequest, CreateEventResponse, CreateRegistrationRequest,
    CreateRegistrationResponse, EvaluateMoveRequest, EvaluateMoveResponse, GetAuditTrailResponse,
    GetEventResponse, GetSelectionResponse, ListRegistrationsResponse, NoticeInfo,
    PlannedMessageInfo, SaveGroupsRequest, SaveGroupsResponse, SelectionRequest,
};
use koekalenteri::{
    ClassSelection, Command, Notice, TransitionResult, all_event_groups, apply,
    class_event_groups, report_rejection,
};
use koekalenteri_audit::{Actor, Cause};
use koekalenteri_domain::{
    Event, EventGroup, EventState, GroupChange, MoveContext, MoveDecision, Registration,
    RegistrationTime, resolve_group_key, validate_registration,
};
use koekalenteri_persistence::{PersistGroupSaveResult, Persistence};
use tracing::{debug, error, info};

fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} cannot be empty"),
        });
    }
    Ok(())
}

/// Checks that `class` names a class of the event.
///
/// Events without classes accept only `None`.
fn check_class(event: &Event, class: Option<&str>) -> Result<(), ApiError> {
    match class {
        Some(name) if event.class(name).is_none() => Err(ApiError::InvalidInput {
            field: String::from("class"),
            message: format!("Event '{}' has no class '{name}'", event.id),
        }),
        None if !event.classes.is_empty() => Err(ApiError::InvalidInput {
            field: String::from("class"),
            message: format!("Event '{}' requires a class", event.id),
        }),
        _ => Ok(()),
    }
}

fn load_event(persistence: &mut Persistence, event_id: &str) -> Result<Event, ApiError> {
    persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)
}

fn load_registrations(
    persistence: &mut Persistence,
    event_id: &str,
) -> Result<Vec<Registration>, ApiError> {
    persistence
        .list_registrations(event_id)
        .map_err(translate_persistence_error)
}

/// Creates or replaces an event and its classes.
///
/// Existing registrations of the event are kept.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The event definition
///
/// # Errors
///
/// Returns an error if:
/// - The id or name is empty
/// - The state or a default time slot is not recognized
/// - The event cannot be written
pub fn create_event(
    persistence: &mut Persistence,
    request: CreateEventRequest,
) -> Result<CreateEventResponse, ApiError> {
    info!(event_id = %request.id, classes = request.classes.len(), "Handling create_event request");

    require_non_empty("id", &request.id)?;
    require_non_empty("name", &request.name)?;

    let state: EventState = request
        .state
        .parse::<EventState>()
        .map_err(translate_domain_error)?;
    let default_times: Vec<RegistrationTime> = request
        .default_times
        .iter()
        .map(|t| t.parse::<RegistrationTime>())
        .collect::<Result<_, _>>()
        .map_err(translate_domain_error)?;

    let event: Event = Event {
        id: request.id,
        event_type: request.event_type,
        name: request.name,
        state,
        default_times,
        dates: request.dates,
        classes: request.classes,
    };

    persistence
        .upsert_event(&event)
        .map_err(translate_persistence_error)?;

    info!(event_id = %event.id, state = %event.state, "Event stored");

    Ok(CreateEventResponse {
        message: format!("Event '{}' stored", event.name),
        event_id: event.id,
    })
}

/// Loads an event with the groups of all its classes.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the event does not exist.
pub fn get_event(
    persistence: &mut Persistence,
    event_id: &str,
) -> Result<GetEventResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let registrations: Vec<Registration> = load_registrations(persistence, event_id)?;
    let event_groups: Vec<EventGroup> = all_event_groups(&event, &registrations);

    Ok(GetEventResponse {
        event,
        event_groups,
    })
}

/// Registers a dog for an event.
///
/// Registrations without an initial group resolve to the reserve list.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event to register for
/// * `request` - The registration
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - The class is not one of the event's classes
/// - The registration is malformed
/// - The id is already taken
pub fn create_registration(
    persistence: &mut Persistence,
    event_id: &str,
    request: CreateRegistrationRequest,
) -> Result<CreateRegistrationResponse, ApiError> {
    info!(
        event_id = %event_id,
        registration_id = %request.id,
        class = ?request.class,
        "Handling create_registration request"
    );

    let event: Event = load_event(persistence, event_id)?;
    check_class(&event, request.class.as_deref())?;

    let registration: Registration = Registration {
        id: request.id,
        event_id: event.id.clone(),
        event_type: event.event_type.clone(),
        class: request.class,
        dog_name: request.dog_name,
        dates: request.dates,
        cancelled: false,
        cancel_reason: None,
        reserve_notified: request.reserve_notified,
        confirmed: request.confirmed,
        group: request.group,
    };
    validate_registration(&registration).map_err(translate_domain_error)?;

    persistence
        .insert_registration(&registration)
        .map_err(translate_persistence_error)?;

    let registrations: Vec<Registration> = load_registrations(persistence, event_id)?;
    let class_regs: Vec<Registration> = registrations
        .into_iter()
        .filter(|r| r.class == registration.class)
        .collect();
    let event_groups: Vec<EventGroup> =
        class_event_groups(&event, registration.class.as_deref(), &class_regs);
    let group_key: String = resolve_group_key(&registration, &event_groups);

    info!(
        event_id = %event_id,
        registration_id = %registration.id,
        group_key = %group_key,
        "Registration stored"
    );

    Ok(CreateRegistrationResponse {
        message: format!("{} registered", registration.dog_name),
        registration_id: registration.id,
        group_key,
    })
}

/// Lists the registrations of an event in creation order.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the event does not exist.
pub fn list_registrations(
    persistence: &mut Persistence,
    event_id: &str,
) -> Result<ListRegistrationsResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let registrations: Vec<Registration> = load_registrations(persistence, &event.id)?;

    Ok(ListRegistrationsResponse {
        event_id: event.id,
        registrations,
    })
}

fn build_selection(
    persistence: &mut Persistence,
    event: &Event,
    request: &SelectionRequest,
) -> Result<ClassSelection, ApiError> {
    check_class(event, request.class.as_deref())?;
    let registrations: Vec<Registration> = load_registrations(persistence, &event.id)?;
    let state: EventState = event.class_state(request.class.as_deref());

    Ok(ClassSelection::build(
        event,
        request.class.as_deref(),
        state,
        &registrations,
        request.unlock_arrange,
    ))
}

/// Builds the admin view of one class: its groups and partitioned lists.
///
/// # Errors
///
/// Returns an error if the event does not exist or the class is unknown.
pub fn get_selection(
    persistence: &mut Persistence,
    event_id: &str,
    request: &SelectionRequest,
) -> Result<GetSelectionResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let selection: ClassSelection = build_selection(persistence, &event, request)?;

    debug!(
        event_id = %event_id,
        class = ?selection.class,
        state = %selection.state,
        lists = selection.lists.len(),
        "Selection built"
    );

    Ok(GetSelectionResponse {
        event_id: event.id,
        class: selection.class,
        state: selection.state,
        event_groups: selection.event_groups,
        lists: selection.lists,
        can_arrange_reserve: selection.can_arrange_reserve,
        entry_counts: selection.entry_counts,
    })
}

/// Judges a drag-and-drop move against the current lists.
///
/// With `commit`, accepted changes are saved right away. Changes that need
/// confirmation are saved only when `confirmed` is also set.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event
/// * `request` - The move and the view it was made in
/// * `actor` - The operator
/// * `cause` - The reason recorded in the audit trail
///
/// # Errors
///
/// Returns an error if the event does not exist, the class is unknown or a
/// committed save fails.
pub fn evaluate_move(
    persistence: &mut Persistence,
    event_id: &str,
    request: &EvaluateMoveRequest,
    actor: Actor,
    cause: Cause,
) -> Result<EvaluateMoveResponse, ApiError> {
    info!(
        event_id = %event_id,
        registration_id = %request.intent.registration_id,
        from = %request.intent.from_group_key,
        to = %request.intent.to_group_key,
        commit = request.commit,
        "Handling evaluate_move request"
    );

    let event: Event = load_event(persistence, event_id)?;
    let selection_request: SelectionRequest = SelectionRequest {
        class: request.class.clone(),
        unlock_arrange: request.unlock_arrange,
    };
    let selection: ClassSelection = build_selection(persistence, &event, &selection_request)?;
    let context: MoveContext<'_> = MoveContext {
        event_id: &event.id,
        lists: &selection.lists,
        event_groups: &selection.event_groups,
        state: selection.state,
        can_arrange_reserve: selection.can_arrange_reserve,
    };
    let decision: MoveDecision = koekalenteri_domain::evaluate_move(&context, &request.intent);

    let commit: bool = request.commit
        && match &decision {
            MoveDecision::Accepted { .. } => true,
            MoveDecision::NeedsConfirmation { .. } => request.confirmed,
            MoveDecision::NoOp | MoveDecision::Rejected(_) => false,
        };

    if !commit {
        let notice: Option<NoticeInfo> = match &decision {
            MoveDecision::Rejected(rejection) => {
                report_rejection(rejection, selection.state).map(NoticeInfo::from)
            }
            _ => None,
        };
        return Ok(EvaluateMoveResponse {
            decision,
            notice,
            saved: None,
        });
    }

    let changes: Vec<GroupChange> = decision.changes().to_vec();
    let saved: SaveGroupsResponse = save_changes(persistence, &event, changes, actor, cause)?;
    let notice: NoticeInfo = NoticeInfo::from(Notice::success(saved.message.clone()));

    Ok(EvaluateMoveResponse {
        decision,
        notice: Some(notice),
        saved: Some(saved),
    })
}

/// Saves group changes: applies them, renumbers and writes the result with
/// its audit trail.
///
/// Changes for other events are ignored.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event being modified
/// * `request` - The group changes
/// * `actor` - The operator
/// * `cause` - The reason recorded in the audit trail
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - No change belongs to the event
/// - A change is malformed
/// - The save cannot be written
pub fn save_groups(
    persistence: &mut Persistence,
    event_id: &str,
    request: SaveGroupsRequest,
    actor: Actor,
    cause: Cause,
) -> Result<SaveGroupsResponse, ApiError> {
    info!(
        event_id = %event_id,
        changes = request.changes.len(),
        actor_id = %actor.id,
        "Handling save_groups request"
    );

    let event: Event = load_event(persistence, event_id)?;
    save_changes(persistence, &event, request.changes, actor, cause)
}

fn save_changes(
    persistence: &mut Persistence,
    event: &Event,
    changes: Vec<GroupChange>,
    actor: Actor,
    cause: Cause,
) -> Result<SaveGroupsResponse, ApiError> {
    let registrations: Vec<Registration> = load_registrations(persistence, &event.id)?;
    let command: Command = Command::SaveGroups {
        event_id: event.id.clone(),
        changes,
    };
    let result: TransitionResult =
        apply(event, &registrations, command, actor, cause).map_err(translate_core_error)?;

    let persisted: PersistGroupSaveResult = persistence
        .persist_group_save(&event.id, &result)
        .map_err(|err| {
            error!(event_id = %event.id, error = %err, "Failed to persist group save");
            translate_persistence_error(err)
        })?;

    let changed: Vec<String> = result.changed.iter().map(|r| r.id.clone()).collect();
    let messages: Vec<PlannedMessageInfo> =
        result.messages.iter().map(PlannedMessageInfo::from).collect();

    info!(
        event_id = %event.id,
        updated = persisted.updated,
        messages = messages.len(),
        "Groups saved"
    );

    Ok(SaveGroupsResponse {
        event_id: event.id.clone(),
        message: format!("Saved {} registration(s)", changed.len()),
        registrations: result.registrations,
        changed,
        entry_counts: result.entry_counts,
        messages,
        audit_event_ids: persisted.audit_ids,
    })
}

/// The audit trail of an event, optionally for one registration, oldest first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the event does not exist.
pub fn get_audit_trail(
    persistence: &mut Persistence,
    event_id: &str,
    registration_id: Option<&str>,
) -> Result<GetAuditTrailResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    let entries: Vec<AuditEntryInfo> = persistence
        .get_audit_trail(&event.id, registration_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(AuditEntryInfo::from)
        .collect();

    Ok(GetAuditTrailResponse {
        event_id: event.id,
        entries,
    })
}
