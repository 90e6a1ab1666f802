// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{EventGroup, GROUP_KEY_CANCELLED, GROUP_KEY_RESERVE, Registration};

/// Resolves the list a registration belongs to.
///
/// Cancellation always wins. A stored key that no longer names one of the
/// event's groups is retried with the key derived from the stored date and
/// slot; anything left over degrades to reserve.
///
/// # Arguments
///
/// * `registration` - The registration to place
/// * `event_groups` - The current groups of the registration's class
#[must_use]
pub fn resolve_group_key(registration: &Registration, event_groups: &[EventGroup]) -> String {
    if registration.cancelled {
        return GROUP_KEY_CANCELLED.to_string();
    }

    let Some(group) = &registration.group else {
        return GROUP_KEY_RESERVE.to_string();
    };

    let is_current = |key: &str| event_groups.iter().any(|g| g.key == key);

    if is_current(&group.key) {
        return group.key.clone();
    }

    match group.derived_key() {
        Some(derived) if is_current(&derived) => derived,
        _ => GROUP_KEY_RESERVE.to_string(),
    }
}
