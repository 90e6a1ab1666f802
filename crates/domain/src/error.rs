// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Lifecycle state string is not recognized.
    InvalidLifecycleState(String),
    /// Time slot string is not recognized.
    InvalidTimeSlot(String),
    /// A registration could not be found.
    RegistrationNotFound {
        /// The event the registration was looked up in.
        event_id: String,
        /// The registration identifier.
        registration_id: String,
    },
    /// A group key does not name a group of the event.
    UnknownGroup {
        /// The unknown group key.
        group_key: String,
    },
    /// A requested list position is out of range.
    InvalidPosition {
        /// The requested 1-based position.
        position: usize,
        /// The largest valid position.
        max: usize,
    },
    /// A group change references another event.
    EventMismatch {
        /// The event being modified.
        expected: String,
        /// The event named by the change.
        actual: String,
    },
    /// No group changes remained after filtering.
    NoGroupChanges,
    /// A registration violates a structural invariant.
    InvalidRegistration {
        /// The registration identifier.
        registration_id: String,
        /// Description of the violation.
        reason: String,
    },
    /// Failed to parse a date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLifecycleState(state) => write!(f, "Invalid lifecycle state: {state}"),
            Self::InvalidTimeSlot(slot) => write!(f, "Invalid time slot: {slot}"),
            Self::RegistrationNotFound {
                event_id,
                registration_id,
            } => {
                write!(
                    f,
                    "Registration '{registration_id}' not found in event '{event_id}'"
                )
            }
            Self::UnknownGroup { group_key } => write!(f, "Unknown group '{group_key}'"),
            Self::InvalidPosition { position, max } => {
                write!(
                    f,
                    "Invalid position: {position}. Must be between 1 and {max}"
                )
            }
            Self::EventMismatch { expected, actual } => {
                write!(
                    f,
                    "Group change targets event '{actual}' but event '{expected}' is being modified"
                )
            }
            Self::NoGroupChanges => write!(f, "no groups"),
            Self::InvalidRegistration {
                registration_id,
                reason,
            } => {
                write!(f, "Invalid registration '{registration_id}': {reason}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
