// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Planning of owner notifications after a group save.
//!
//! Only the plan is produced here; delivery belongs to the mailer.

use koekalenteri_domain::{
    EventGroup, EventState, GROUP_KEY_CANCELLED, GROUP_KEY_RESERVE, MISSING_NUMBER_SENTINEL,
    Registration, is_participant_group, normalized_key,
};

/// The template of a planned message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKind {
    /// The dog got a place.
    Picked,
    /// Invitation to the trial.
    Invitation,
    /// The dog's reserve position changed.
    Reserve,
    /// The registration was cancelled.
    Cancel,
}

impl MessageKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Picked => "picked",
            Self::Invitation => "invitation",
            Self::Reserve => "reserve",
            Self::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message to one registration's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMessage {
    pub kind: MessageKind,
    pub registration_id: String,
}

/// Plans the messages caused by a group save of one class.
///
/// When the class is `picked` or `invited`, dogs newly admitted from reserve
/// or cancelled get `picked` (and `invitation` when `invited`), and notified
/// reserve dogs whose position improved get `reserve`. Newly cancelled
/// registrations get `cancel` in any state.
///
/// # Arguments
///
/// * `state` - The class lifecycle state
/// * `class` - The class the save was made in
/// * `before` - Registrations before the save
/// * `after` - Registrations after the save
/// * `event_groups` - The event's groups
#[must_use]
pub fn plan_messages(
    state: EventState,
    class: Option<&str>,
    before: &[Registration],
    after: &[Registration],
    event_groups: &[EventGroup],
) -> Vec<PlannedMessage> {
    let previous = |id: &str| before.iter().find(|r| r.id == id);
    let key_of = |reg: &Registration| normalized_key(reg, event_groups);
    let in_class: Vec<&Registration> = after.iter().filter(|r| r.class.as_deref() == class).collect();

    let mut messages: Vec<PlannedMessage> = Vec::new();
    let mut push = |kind: MessageKind, reg: &Registration| {
        messages.push(PlannedMessage {
            kind,
            registration_id: reg.id.clone(),
        });
    };

    if state.participants_notified() {
        let new_participants: Vec<&Registration> = in_class
            .iter()
            .copied()
            .filter(|reg| is_participant_group(&key_of(reg)))
            .filter(|reg| previous(&reg.id).is_some_and(|old| !is_participant_group(&key_of(old))))
            .collect();
        for reg in &new_participants {
            push(MessageKind::Picked, reg);
        }
        if state.sends_invitation() {
            for reg in &new_participants {
                push(MessageKind::Invitation, reg);
            }
        }

        for reg in in_class.iter().copied() {
            if key_of(reg) != GROUP_KEY_RESERVE || !reg.reserve_notified {
                continue;
            }
            let moved_up: bool = previous(&reg.id).is_some_and(|old| {
                key_of(old) == GROUP_KEY_RESERVE && reserve_number(old) > reserve_number(reg)
            });
            if moved_up {
                push(MessageKind::Reserve, reg);
            }
        }
    }

    for reg in in_class.iter().copied() {
        let newly_cancelled: bool = key_of(reg) == GROUP_KEY_CANCELLED
            && previous(&reg.id).is_some_and(|old| key_of(old) != GROUP_KEY_CANCELLED);
        if newly_cancelled {
            push(MessageKind::Cancel, reg);
        }
    }

    messages
}

fn reserve_number(registration: &Registration) -> f64 {
    registration.number().unwrap_or(MISSING_NUMBER_SENTINEL)
}
