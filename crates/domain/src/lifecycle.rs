// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and class lifecycle states.
//!
//! An event moves through `draft`, `tentative` and `confirmed` while it is
//! being planned. Each class of a confirmed event then moves through the
//! participant selection states `picked`, `invited`, `started`, `ended`
//! and `completed`. The class state, when present, overrides the event state.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of an event or one of its classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventState {
    /// Being edited, not visible to the public.
    #[default]
    Draft,
    /// Published with provisional details.
    Tentative,
    /// The event was called off.
    Cancelled,
    /// Published and open for registrations.
    Confirmed,
    /// Participants have been picked and notified.
    Picked,
    /// Participants have received their invitations.
    Invited,
    /// The trial is running.
    Started,
    /// The trial has ended.
    Ended,
    /// Results are final.
    Completed,
}

impl EventState {
    /// Returns the string representation of the state.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Tentative => "tentative",
            Self::Cancelled => "cancelled",
            Self::Confirmed => "confirmed",
            Self::Picked => "picked",
            Self::Invited => "invited",
            Self::Started => "started",
            Self::Ended => "ended",
            Self::Completed => "completed",
        }
    }

    /// Returns true when owners have already been told who participates.
    ///
    /// Admitting a new participant in these states sends messages, so the
    /// operator must confirm such moves.
    #[must_use]
    pub const fn participants_notified(&self) -> bool {
        matches!(self, Self::Picked | Self::Invited)
    }

    /// Returns true when admitting a participant also sends an invitation.
    #[must_use]
    pub const fn sends_invitation(&self) -> bool {
        matches!(self, Self::Invited)
    }
}

impl FromStr for EventState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "tentative" => Ok(Self::Tentative),
            "cancelled" => Ok(Self::Cancelled),
            "confirmed" => Ok(Self::Confirmed),
            "picked" => Ok(Self::Picked),
            "invited" => Ok(Self::Invited),
            "started" => Ok(Self::Started),
            "ended" => Ok(Self::Ended),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidLifecycleState(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_string_round_trip() {
        let states = vec![
            EventState::Draft,
            EventState::Tentative,
            EventState::Cancelled,
            EventState::Confirmed,
            EventState::Picked,
            EventState::Invited,
            EventState::Started,
            EventState::Ended,
            EventState::Completed,
        ];

        for state in states {
            match state.as_str().parse::<EventState>() {
                Ok(parsed) => assert_eq!(state, parsed),
                Err(e) => panic!("Failed to parse state string: {state}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_state_string() {
        let result = "selected".parse::<EventState>();
        assert_eq!(
            result,
            Err(DomainError::InvalidLifecycleState(String::from("selected")))
        );
    }

    #[test]
    fn test_participants_notified_only_after_picking() {
        assert!(!EventState::Confirmed.participants_notified());
        assert!(EventState::Picked.participants_notified());
        assert!(EventState::Invited.participants_notified());
        assert!(!EventState::Started.participants_notified());
    }

    #[test]
    fn test_only_invited_sends_invitation() {
        assert!(!EventState::Picked.sends_invitation());
        assert!(EventState::Invited.sends_invitation());
    }
}
