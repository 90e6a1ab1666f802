// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator notices for refused moves.

use koekalenteri_domain::{EventState, GROUP_KEY_RESERVE, RejectReason, Rejection};
use tracing::warn;

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

/// A short message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

/// Builds the notice for a refused drop, if the operator should see one.
///
/// Dropping back onto the registration's own list is silent except for the
/// locked reserve list. Anything other than a refused return to reserve is
/// also recorded as a `dnd-group-rejected` telemetry event.
#[must_use]
pub fn report_rejection(rejection: &Rejection, state: EventState) -> Option<Notice> {
    if rejection.from_group_key == rejection.to_group_key {
        return (rejection.to_group_key == GROUP_KEY_RESERVE).then(|| {
            Notice::new(
                Severity::Info,
                "Reserve dogs can no longer be rearranged once reserve notifications have been sent",
            )
        });
    }

    if state == EventState::Picked && rejection.to_group_key == GROUP_KEY_RESERVE {
        return Some(Notice::new(
            Severity::Warning,
            "Once places are confirmed, a participant can no longer be moved back to reserve.",
        ));
    }

    warn!(
        telemetry = "dnd-group-rejected",
        event_id = %rejection.event_id,
        registration_id = %rejection.registration_id,
        source_group = %rejection.from_group_key,
        target_group = %rejection.to_group_key,
        reason = %rejection.reason,
        "Move rejected"
    );
    let message: String = match rejection.reason {
        RejectReason::NotRegisteredForGroup => {
            format!("Dog {} did not register for this group", rejection.dog_name)
        }
        _ => format!(
            "Registration of {} is not eligible for this group",
            rejection.dog_name
        ),
    };
    Some(Notice::error(message))
}
