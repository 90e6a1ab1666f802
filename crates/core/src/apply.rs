// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::messages::{PlannedMessage, plan_messages};
use crate::state::{TransitionResult, all_event_groups};
use koekalenteri_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use koekalenteri_domain::{
    ClassEntryCounts, DomainError, Event, EventGroup, EventState, GroupChange, Registration,
    RegistrationGroup, apply_patch, class_entry_counts, renumber, validate_group_change,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Applies a command to an event's registrations, producing the new
/// registrations, their audit events and the planned owner messages.
///
/// # Arguments
///
/// * `event` - The event being modified
/// * `registrations` - All registrations of the event (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The command names another event
/// - No changes remain after dropping those for other events
/// - A change is malformed
pub fn apply(
    event: &Event,
    registrations: &[Registration],
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SaveGroups { event_id, changes } => {
            if event_id != event.id {
                return Err(CoreError::DomainViolation(DomainError::EventMismatch {
                    expected: event.id.clone(),
                    actual: event_id,
                }));
            }
            save_groups(event, registrations, changes, &actor, &cause)
        }
    }
}

fn save_groups(
    event: &Event,
    registrations: &[Registration],
    changes: Vec<GroupChange>,
    actor: &Actor,
    cause: &Cause,
) -> Result<TransitionResult, CoreError> {
    let received: usize = changes.len();
    let changes: Vec<GroupChange> = changes
        .into_iter()
        .filter(|c| c.event_id == event.id)
        .collect();
    if changes.is_empty() {
        debug!(event_id = %event.id, received, "No group changes after filtering by event");
        return Err(CoreError::DomainViolation(DomainError::NoGroupChanges));
    }
    for change in &changes {
        validate_group_change(change, &event.id)?;
    }

    let mut updated: Vec<Registration> = registrations.to_vec();
    for change in &changes {
        if let Some(reg) = updated.iter_mut().find(|r| r.id == change.id) {
            *reg = apply_patch(reg, &change.to_patch());
        } else {
            debug!(event_id = %event.id, registration_id = %change.id, "Skipping change for unknown registration");
        }
    }

    let event_groups: Vec<EventGroup> = all_event_groups(event, &updated);
    renumber(&mut updated, &event_groups);

    let mut changed: Vec<Registration> = Vec::new();
    let mut audit_events: Vec<AuditEvent> = Vec::new();
    for reg in &updated {
        let old: Option<&Registration> = registrations.iter().find(|r| r.id == reg.id);
        let old_group: Option<&RegistrationGroup> = old.and_then(|r| r.group.as_ref());
        let group_changed: bool = !same_assignment(old_group, reg.group.as_ref());
        let flag_changed: bool = old.is_some_and(|r| r.cancelled != reg.cancelled);
        if !group_changed && !flag_changed {
            continue;
        }

        let moved: bool = changes.iter().any(|c| c.id == reg.id);
        audit_events.push(group_audit_event(reg, old_group, moved, actor, cause));
        changed.push(reg.clone());
    }

    let entry_counts: BTreeMap<String, ClassEntryCounts> =
        class_entry_counts(&updated, &event_groups);

    let class: Option<String> = changes
        .first()
        .and_then(|c| updated.iter().find(|r| r.id == c.id))
        .and_then(|r| r.class.clone());
    let state: EventState = event.class_state(class.as_deref());
    let messages: Vec<PlannedMessage> = plan_messages(
        state,
        class.as_deref(),
        registrations,
        &updated,
        &event_groups,
    );

    debug!(
        event_id = %event.id,
        changes = changes.len(),
        changed = changed.len(),
        messages = messages.len(),
        "Groups saved"
    );

    Ok(TransitionResult {
        registrations: updated,
        changed,
        audit_events,
        entry_counts,
        messages,
    })
}

fn same_assignment(a: Option<&RegistrationGroup>, b: Option<&RegistrationGroup>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.key == b.key
                && match (a.number, b.number) {
                    (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
                    (None, None) => true,
                    _ => false,
                }
        }
        _ => false,
    }
}

/// Formats a group as `key #number` for audit lines.
#[must_use]
pub fn format_group(group: &RegistrationGroup) -> String {
    match group.number {
        Some(number) => format!("{} #{number}", group.key),
        None => group.key.clone(),
    }
}

fn group_audit_event(
    reg: &Registration,
    old_group: Option<&RegistrationGroup>,
    moved: bool,
    actor: &Actor,
    cause: &Cause,
) -> AuditEvent {
    let reason: &str = if moved { "move" } else { "consequence" };
    let old_info: String = old_group.map_or_else(String::new, |g| format!("{} -> ", format_group(g)));
    let new_info: String = reg.group.as_ref().map_or_else(String::new, format_group);

    let before: StateSnapshot = old_group.map_or_else(StateSnapshot::empty, |g| StateSnapshot::new(format_group(g)));
    let after: StateSnapshot = StateSnapshot::new(new_info.clone());
    let action: Action = Action::new(
        String::from(if moved { "MoveRegistration" } else { "Renumber" }),
        Some(format!("Group: {old_info}{new_info} {reason}")),
    );

    AuditEvent::new(
        reg.event_id.clone(),
        reg.id.clone(),
        actor.clone(),
        cause.clone(),
        action,
        before,
        after,
    )
}
