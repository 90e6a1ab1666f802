// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed partial updates of registrations.

use crate::types::{Registration, RegistrationGroup};
use serde::{Deserialize, Serialize};

/// A group reassignment of one registration, as sent to the registration store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupChange {
    pub event_id: String,
    pub id: String,
    pub group: RegistrationGroup,
    /// Set on every move between lists; absent on reorders within a list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
}

impl GroupChange {
    /// The patch that applies this change to a registration.
    #[must_use]
    pub fn to_patch(&self) -> RegistrationPatch {
        RegistrationPatch {
            group: Some(self.group.clone()),
            cancelled: self.cancelled,
            ..RegistrationPatch::default()
        }
    }
}

/// Fields of a registration that may be updated independently.
///
/// `None` leaves a field untouched. `cancel_reason` is doubly optional so a
/// patch can clear the reason.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationPatch {
    pub group: Option<RegistrationGroup>,
    pub cancelled: Option<bool>,
    pub cancel_reason: Option<Option<String>>,
    pub reserve_notified: Option<bool>,
    pub confirmed: Option<bool>,
}

impl RegistrationPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Applies a patch, returning the updated registration.
#[must_use]
pub fn apply_patch(registration: &Registration, patch: &RegistrationPatch) -> Registration {
    let mut updated: Registration = registration.clone();
    if let Some(group) = &patch.group {
        updated.group = Some(group.clone());
    }
    if let Some(cancelled) = patch.cancelled {
        updated.cancelled = cancelled;
    }
    if let Some(reason) = &patch.cancel_reason {
        updated.cancel_reason.clone_from(reason);
    }
    if let Some(notified) = patch.reserve_notified {
        updated.reserve_notified = notified;
    }
    if let Some(confirmed) = patch.confirmed {
        updated.confirmed = confirmed;
    }
    updated
}
