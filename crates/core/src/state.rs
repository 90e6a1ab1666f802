// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::messages::PlannedMessage;
use koekalenteri_audit::AuditEvent;
use koekalenteri_domain::{
    ClassEntryCounts, Event, EventGroup, EventState, GroupedRegistrations, Registration,
    class_entry_counts, derive_event_groups, partition,
};
use std::collections::BTreeMap;

/// The admin view of one class: its groups and the partitioned registrations.
///
/// Everything here is derived from the event and a registration snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSelection {
    /// The class, or `None` for events without classes.
    pub class: Option<String>,
    pub state: EventState,
    pub event_groups: Vec<EventGroup>,
    pub lists: GroupedRegistrations,
    pub can_arrange_reserve: bool,
    pub entry_counts: BTreeMap<String, ClassEntryCounts>,
}

impl ClassSelection {
    /// Builds the view of a class.
    ///
    /// # Arguments
    ///
    /// * `event` - The event
    /// * `class` - The class, or `None` for events without classes
    /// * `state` - The class lifecycle state
    /// * `registrations` - Registrations of the whole event
    /// * `unlock_arrange` - The operator override for reserve ordering
    #[must_use]
    pub fn build(
        event: &Event,
        class: Option<&str>,
        state: EventState,
        registrations: &[Registration],
        unlock_arrange: bool,
    ) -> Self {
        let class_regs: Vec<Registration> = registrations
            .iter()
            .filter(|r| r.class.as_deref() == class)
            .cloned()
            .collect();
        let event_groups: Vec<EventGroup> = class_event_groups(event, class, &class_regs);
        let lists: GroupedRegistrations = partition(&class_regs, &event_groups);
        let can_arrange_reserve: bool = lists.can_arrange_reserve(unlock_arrange);
        let entry_counts: BTreeMap<String, ClassEntryCounts> =
            class_entry_counts(&class_regs, &event_groups);

        Self {
            class: class.map(str::to_string),
            state,
            event_groups,
            lists,
            can_arrange_reserve,
            entry_counts,
        }
    }
}

/// The date-time groups of one class.
#[must_use]
pub fn class_event_groups(
    event: &Event,
    class: Option<&str>,
    registrations: &[Registration],
) -> Vec<EventGroup> {
    derive_event_groups(
        event.class_dates(class),
        &event.default_times,
        registrations,
    )
}

/// The date-time groups of every class of an event, one entry per key.
#[must_use]
pub fn all_event_groups(event: &Event, registrations: &[Registration]) -> Vec<EventGroup> {
    let mut groups: Vec<EventGroup> = if event.classes.is_empty() {
        class_event_groups(event, None, registrations)
    } else {
        event
            .classes
            .iter()
            .flat_map(|c| {
                let class_regs: Vec<Registration> = registrations
                    .iter()
                    .filter(|r| r.class.as_deref() == Some(c.class.as_str()))
                    .cloned()
                    .collect();
                class_event_groups(event, Some(&c.class), &class_regs)
            })
            .collect()
    };
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups.dedup_by(|a, b| a.key == b.key);
    groups
}

/// The result of a successful group save.
///
/// Saves are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// Every registration of the event after renumbering.
    pub registrations: Vec<Registration>,
    /// The registrations whose group or cancellation changed.
    pub changed: Vec<Registration>,
    /// One audit event per changed registration.
    pub audit_events: Vec<AuditEvent>,
    /// Entry counts per class.
    pub entry_counts: BTreeMap<String, ClassEntryCounts>,
    /// Messages to send to owners.
    pub messages: Vec<PlannedMessage>,
}
