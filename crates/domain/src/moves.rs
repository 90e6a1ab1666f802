// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of registration moves between lists.
//!
//! A move is either a drag-and-drop (`evaluate_move`) or one of the menu
//! driven alternatives. Both end in a `MoveDecision`; nothing here has side
//! effects.

use crate::error::DomainError;
use crate::lifecycle::EventState;
use crate::order::{HoverPosition, reorder_number};
use crate::partition::{GroupedEntry, GroupedRegistrations};
use crate::patch::GroupChange;
use crate::types::{
    EventGroup, GROUP_KEY_CANCELLED, GROUP_KEY_RESERVE, Registration, RegistrationGroup,
    is_participant_group,
};
use serde::{Deserialize, Serialize};

/// A drop of one registration onto a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub registration_id: String,
    /// The list the registration was dragged from.
    pub from_group_key: String,
    /// The list the registration was dropped on.
    pub to_group_key: String,
    /// Index of the registration in its source list.
    pub from_index: usize,
    /// Index of the hovered row, if the drop landed on a row.
    #[serde(default)]
    pub to_index: Option<usize>,
    /// The list the hovered row belongs to; a drop on a row without it is
    /// taken to hover the destination list.
    #[serde(default)]
    pub target_group_key: Option<String>,
    #[serde(default)]
    pub position: HoverPosition,
}

/// Everything a move is judged against.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub event_id: &'a str,
    pub lists: &'a GroupedRegistrations,
    pub event_groups: &'a [EventGroup],
    pub state: EventState,
    pub can_arrange_reserve: bool,
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The reserve list is locked after reserve notifications.
    ReserveLocked,
    /// The registration did not ask for the destination group's day.
    NotRegisteredForGroup,
    /// Participants cannot return to reserve once places are confirmed.
    CannotReturnToReserve,
    /// The lifecycle state does not allow the move.
    NotEligible,
}

impl RejectReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReserveLocked => "reserve_locked",
            Self::NotRegisteredForGroup => "not_registered_for_group",
            Self::CannotReturnToReserve => "cannot_return_to_reserve",
            Self::NotEligible => "not_eligible",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A refused move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: RejectReason,
    pub event_id: String,
    pub registration_id: String,
    pub dog_name: String,
    pub from_group_key: String,
    pub to_group_key: String,
}

/// Text of the dialog that asks the operator to confirm a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub title: String,
    pub description: String,
    pub confirmation_text: String,
    pub cancellation_text: String,
}

impl ConfirmationRequest {
    /// Builds the request shown before admitting a dog once owners have been
    /// told who participates.
    #[must_use]
    pub fn admit_participant(dog_name: &str, state: EventState) -> Self {
        let extra: &str = if state.sends_invitation() {
            " and an invitation"
        } else {
            ""
        };
        Self {
            title: format!("You are adding {dog_name} to the participants"),
            description: format!(
                "Once added, the owner is sent a confirmation of the place{extra}. \
                 Are you sure you want to add {dog_name} to the participants?"
            ),
            confirmation_text: String::from("Add to participants"),
            cancellation_text: String::from("Cancel"),
        }
    }
}

/// The outcome of judging a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum MoveDecision {
    /// Nothing to change.
    NoOp,
    Rejected(Rejection),
    /// The changes may only be committed after the operator confirms.
    NeedsConfirmation {
        request: ConfirmationRequest,
        changes: Vec<GroupChange>,
    },
    Accepted { changes: Vec<GroupChange> },
}

impl MoveDecision {
    /// The prepared changes, if any.
    #[must_use]
    pub fn changes(&self) -> &[GroupChange] {
        match self {
            Self::NeedsConfirmation { changes, .. } | Self::Accepted { changes } => changes,
            Self::NoOp | Self::Rejected(_) => &[],
        }
    }
}

/// Judges a drag-and-drop move.
///
/// Checks run in order: locked reserve, self drop, eligibility, then the state
/// gated confirmation. An unknown registration is a no-op.
#[must_use]
pub fn evaluate_move(context: &MoveContext<'_>, intent: &MoveIntent) -> MoveDecision {
    let Some((from_key, from_index, entry)) = context.lists.find(&intent.registration_id) else {
        return MoveDecision::NoOp;
    };
    let to_key: &str = intent.to_group_key.as_str();
    let same_list: bool = from_key == to_key;

    if same_list {
        if to_key == GROUP_KEY_RESERVE && !context.can_arrange_reserve {
            return MoveDecision::Rejected(rejection(
                RejectReason::ReserveLocked,
                entry,
                from_key,
                to_key,
            ));
        }
        if intent.to_index == Some(from_index) || to_key == GROUP_KEY_CANCELLED {
            return MoveDecision::NoOp;
        }
    } else if let Some(reason) = eligibility(context, entry, from_key, to_key) {
        return MoveDecision::Rejected(rejection(reason, entry, from_key, to_key));
    }

    let regs: Vec<&Registration> = others_in(context.lists, to_key, &entry.registration.id);
    let reorder: bool = same_list
        && intent.to_index.is_some()
        && intent.target_group_key.as_deref().unwrap_or(to_key) == to_key;

    let number: f64 = if reorder {
        reorder_number(
            &regs,
            intent.to_index.unwrap_or(0),
            from_index,
            intent.position,
        )
    } else {
        append_number(&regs)
    };

    if same_list && entry.registration.number().is_some_and(|n| same_number(n, number)) {
        return MoveDecision::NoOp;
    }

    let cancelled: Option<bool> = (!same_list).then_some(to_key == GROUP_KEY_CANCELLED);
    let Some(change) = group_change(context, &entry.registration, to_key, number, cancelled) else {
        return MoveDecision::NoOp;
    };

    gate_confirmation(context, &entry.registration, to_key, !same_list, change)
}

/// Moves a registration to the end of a participant group.
///
/// # Errors
///
/// Returns `DomainError::RegistrationNotFound` for unknown registrations and
/// `DomainError::UnknownGroup` when `group_key` is not a participant group of
/// the class.
pub fn move_to_group(
    context: &MoveContext<'_>,
    registration_id: &str,
    group_key: &str,
) -> Result<MoveDecision, DomainError> {
    let (from_key, _, entry) = find_entry(context, registration_id)?;
    if !is_participant_group(group_key) || !context.event_groups.iter().any(|g| g.key == group_key) {
        return Err(DomainError::UnknownGroup {
            group_key: group_key.to_string(),
        });
    }
    if from_key == group_key {
        return Ok(MoveDecision::NoOp);
    }
    if let Some(reason) = eligibility(context, entry, from_key, group_key) {
        return Ok(MoveDecision::Rejected(rejection(
            reason, entry, from_key, group_key,
        )));
    }

    let regs: Vec<&Registration> = others_in(context.lists, group_key, registration_id);
    let Some(change) = group_change(
        context,
        &entry.registration,
        group_key,
        append_number(&regs),
        Some(false),
    ) else {
        return Ok(MoveDecision::NoOp);
    };

    Ok(gate_confirmation(
        context,
        &entry.registration,
        group_key,
        true,
        change,
    ))
}

/// Places a registration at a 1-based position of its participant group.
///
/// A registration in reserve is placed in the first participant group.
///
/// # Errors
///
/// Returns `DomainError::RegistrationNotFound` for unknown registrations,
/// `DomainError::InvalidPosition` for position 0 or past the end of the
/// group, and `DomainError::UnknownGroup` when the registration is cancelled
/// or the class has no participant groups.
pub fn move_to_position(
    context: &MoveContext<'_>,
    registration_id: &str,
    position: usize,
) -> Result<MoveDecision, DomainError> {
    let (from_key, from_index, entry) = find_entry(context, registration_id)?;

    let to_key: &str = if from_key == GROUP_KEY_RESERVE {
        context
            .event_groups
            .first()
            .map(|g| g.key.as_str())
            .ok_or_else(|| DomainError::UnknownGroup {
                group_key: String::from("participants"),
            })?
    } else if is_participant_group(from_key) {
        from_key
    } else {
        return Err(DomainError::UnknownGroup {
            group_key: from_key.to_string(),
        });
    };

    let same_list: bool = from_key == to_key;
    let max: usize = context.lists.list(to_key).len() + usize::from(!same_list);
    if position == 0 || position > max {
        return Err(DomainError::InvalidPosition { position, max });
    }

    if same_list && from_index + 1 == position {
        return Ok(MoveDecision::NoOp);
    }
    let refused: Option<RejectReason> = if same_list {
        None
    } else {
        eligibility(context, entry, from_key, to_key)
    };
    if let Some(reason) = refused {
        return Ok(MoveDecision::Rejected(rejection(
            reason, entry, from_key, to_key,
        )));
    }

    // Moving down within a list lands after the row currently at `position`.
    let number: f64 = if same_list && from_index + 1 < position {
        position_number(position) + 1.0
    } else {
        position_number(position)
    };

    let cancelled: Option<bool> = (!same_list).then_some(false);
    let Some(change) = group_change(context, &entry.registration, to_key, number, cancelled) else {
        return Ok(MoveDecision::NoOp);
    };

    Ok(gate_confirmation(
        context,
        &entry.registration,
        to_key,
        !same_list,
        change,
    ))
}

/// Moves a registration to the end of the reserve list, clearing any
/// cancellation.
///
/// # Errors
///
/// Returns `DomainError::RegistrationNotFound` for unknown registrations.
pub fn move_to_reserve(
    context: &MoveContext<'_>,
    registration_id: &str,
) -> Result<MoveDecision, DomainError> {
    let (from_key, _, entry) = find_entry(context, registration_id)?;
    if from_key == GROUP_KEY_RESERVE {
        return Ok(MoveDecision::NoOp);
    }
    if let Some(reason) = eligibility(context, entry, from_key, GROUP_KEY_RESERVE) {
        return Ok(MoveDecision::Rejected(rejection(
            reason,
            entry,
            from_key,
            GROUP_KEY_RESERVE,
        )));
    }

    let regs: Vec<&Registration> = others_in(context.lists, GROUP_KEY_RESERVE, registration_id);
    let change: GroupChange = GroupChange {
        event_id: entry.registration.event_id.clone(),
        id: entry.registration.id.clone(),
        group: RegistrationGroup::new(GROUP_KEY_RESERVE, append_number(&regs)),
        cancelled: Some(false),
    };

    Ok(MoveDecision::Accepted {
        changes: vec![change],
    })
}

/// Returns the reason a move between different lists is refused, if any.
fn eligibility(
    context: &MoveContext<'_>,
    entry: &GroupedEntry,
    from_key: &str,
    to_key: &str,
) -> Option<RejectReason> {
    match to_key {
        GROUP_KEY_CANCELLED => (from_key == GROUP_KEY_CANCELLED).then_some(RejectReason::NotEligible),
        GROUP_KEY_RESERVE => {
            let allowed: bool = (context.state != EventState::Picked && from_key != GROUP_KEY_RESERVE)
                || from_key == GROUP_KEY_CANCELLED
                || (from_key == GROUP_KEY_RESERVE && context.can_arrange_reserve);
            if allowed {
                None
            } else if context.state == EventState::Picked {
                Some(RejectReason::CannotReturnToReserve)
            } else {
                Some(RejectReason::NotEligible)
            }
        }
        _ => {
            if !entry.can_drop_into(to_key) {
                Some(RejectReason::NotRegisteredForGroup)
            } else if context.state == EventState::Started && from_key != GROUP_KEY_RESERVE {
                Some(RejectReason::NotEligible)
            } else {
                None
            }
        }
    }
}

fn gate_confirmation(
    context: &MoveContext<'_>,
    registration: &Registration,
    to_key: &str,
    changing_group: bool,
    change: GroupChange,
) -> MoveDecision {
    if context.state.participants_notified() && is_participant_group(to_key) && changing_group {
        MoveDecision::NeedsConfirmation {
            request: ConfirmationRequest::admit_participant(&registration.dog_name, context.state),
            changes: vec![change],
        }
    } else {
        MoveDecision::Accepted {
            changes: vec![change],
        }
    }
}

fn group_change(
    context: &MoveContext<'_>,
    registration: &Registration,
    to_key: &str,
    number: f64,
    cancelled: Option<bool>,
) -> Option<GroupChange> {
    let group: RegistrationGroup = if is_participant_group(to_key) {
        let event_group: &EventGroup = context.event_groups.iter().find(|g| g.key == to_key)?;
        RegistrationGroup::in_group(event_group, number)
    } else {
        RegistrationGroup::new(to_key, number)
    };

    Some(GroupChange {
        event_id: registration.event_id.clone(),
        id: registration.id.clone(),
        group,
        cancelled,
    })
}

fn find_entry<'a>(
    context: &MoveContext<'a>,
    registration_id: &str,
) -> Result<(&'a str, usize, &'a GroupedEntry), DomainError> {
    context
        .lists
        .find(registration_id)
        .ok_or_else(|| DomainError::RegistrationNotFound {
            event_id: context.event_id.to_string(),
            registration_id: registration_id.to_string(),
        })
}

fn others_in<'a>(
    lists: &'a GroupedRegistrations,
    key: &str,
    registration_id: &str,
) -> Vec<&'a Registration> {
    lists
        .list(key)
        .iter()
        .map(|e| &e.registration)
        .filter(|r| r.id != registration_id)
        .collect()
}

fn rejection(reason: RejectReason, entry: &GroupedEntry, from_key: &str, to_key: &str) -> Rejection {
    Rejection {
        reason,
        event_id: entry.registration.event_id.clone(),
        registration_id: entry.registration.id.clone(),
        dog_name: entry.registration.dog_name.clone(),
        from_group_key: from_key.to_string(),
        to_group_key: to_key.to_string(),
    }
}

fn append_number(regs: &[&Registration]) -> f64 {
    f64::from(u32::try_from(regs.len()).unwrap_or(u32::MAX)) + 1.0
}

fn position_number(position: usize) -> f64 {
    f64::from(u32::try_from(position).unwrap_or(u32::MAX)) - 0.5
}

fn same_number(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}
