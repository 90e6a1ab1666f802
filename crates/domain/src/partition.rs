// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Partitioning of a class's registrations into ordered lists.

use crate::group_key::resolve_group_key;
use crate::types::{
    EventGroup, GROUP_KEY_CANCELLED, GROUP_KEY_RESERVE, Registration, is_participant_group,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sort position of a registration that has no order number.
pub const MISSING_NUMBER_SENTINEL: f64 = 999.0;

/// A registration placed in a list, with the groups it may be moved into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedEntry {
    pub registration: Registration,
    /// Keys of the registration's own requested dates.
    pub groups: Vec<String>,
    /// Keys of the event groups the registration may be dropped into.
    pub drop_groups: Vec<String>,
}

impl GroupedEntry {
    /// Returns true if the registration may be placed in the given group.
    #[must_use]
    pub fn can_drop_into(&self, key: &str) -> bool {
        self.drop_groups.iter().any(|g| g == key)
    }
}

/// Registrations of a class split into the reserve, cancelled and
/// date-time group lists, each sorted by order number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedRegistrations {
    lists: BTreeMap<String, Vec<GroupedEntry>>,
}

impl GroupedRegistrations {
    /// The entries of a list; unknown keys yield an empty slice.
    #[must_use]
    pub fn list(&self, key: &str) -> &[GroupedEntry] {
        self.lists.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn reserve(&self) -> &[GroupedEntry] {
        self.list(GROUP_KEY_RESERVE)
    }

    #[must_use]
    pub fn cancelled(&self) -> &[GroupedEntry] {
        self.list(GROUP_KEY_CANCELLED)
    }

    /// All list keys, including empty lists.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    /// Finds a registration, returning its list key, index and entry.
    #[must_use]
    pub fn find(&self, registration_id: &str) -> Option<(&str, usize, &GroupedEntry)> {
        self.lists.iter().find_map(|(key, entries)| {
            entries
                .iter()
                .position(|e| e.registration.id == registration_id)
                .map(|index| (key.as_str(), index, &entries[index]))
        })
    }

    /// Flattens the lists back into registrations, list by list.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Registration> {
        self.lists
            .values()
            .flat_map(|entries| entries.iter().map(|e| &e.registration))
            .collect()
    }

    /// Total number of registrations across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if any reserve registration has been told it is in reserve.
    #[must_use]
    pub fn reserve_notified_any(&self) -> bool {
        self.reserve().iter().any(|e| e.registration.reserve_notified)
    }

    /// Whether the reserve list may be reordered.
    ///
    /// Reordering locks once a reserve notification has been sent, unless the
    /// operator has unlocked it for the current session.
    #[must_use]
    pub fn can_arrange_reserve(&self, unlock_override: bool) -> bool {
        !self.reserve_notified_any() || unlock_override
    }
}

/// Partitions registrations into ordered lists.
///
/// The result always holds the reserve and cancelled lists and one list per
/// event group, any of which may be empty. Lists are stably sorted by order
/// number with missing numbers last.
///
/// # Arguments
///
/// * `registrations` - Registrations of one class
/// * `event_groups` - The class's date-time groups
#[must_use]
pub fn partition(registrations: &[Registration], event_groups: &[EventGroup]) -> GroupedRegistrations {
    let mut lists: BTreeMap<String, Vec<GroupedEntry>> = BTreeMap::new();
    lists.insert(GROUP_KEY_CANCELLED.to_string(), Vec::new());
    lists.insert(GROUP_KEY_RESERVE.to_string(), Vec::new());
    for group in event_groups {
        lists.entry(group.key.clone()).or_default();
    }

    for registration in registrations {
        let key: String = resolve_group_key(registration, event_groups);
        let entry: GroupedEntry = GroupedEntry {
            groups: registration.dates.iter().map(|d| d.key()).collect(),
            drop_groups: drop_groups(registration, event_groups),
            registration: registration.clone(),
        };
        lists.entry(key).or_default().push(entry);
    }

    for entries in lists.values_mut() {
        entries.sort_by(|a, b| sort_number(&a.registration).total_cmp(&sort_number(&b.registration)));
    }

    GroupedRegistrations { lists }
}

/// Keys of the event groups a registration may be placed in.
///
/// A group without a date accepts anyone; otherwise the group's day must be
/// one of the registration's requested days.
#[must_use]
pub fn drop_groups(registration: &Registration, event_groups: &[EventGroup]) -> Vec<String> {
    event_groups
        .iter()
        .filter(|g| is_participant_group(&g.key))
        .filter(|g| {
            g.date
                .is_none_or(|date| registration.dates.iter().any(|d| d.date == date))
        })
        .map(|g| g.key.clone())
        .collect()
}

fn sort_number(registration: &Registration) -> f64 {
    registration.number().unwrap_or(MISSING_NUMBER_SENTINEL)
}

/// Entry counts of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClassEntryCounts {
    /// Registrations that are not cancelled.
    pub entries: usize,
    /// Registrations placed in a date-time group.
    pub participants: usize,
}

/// Counts entries per class (or event type for class-less registrations).
#[must_use]
pub fn class_entry_counts(
    registrations: &[Registration],
    event_groups: &[EventGroup],
) -> BTreeMap<String, ClassEntryCounts> {
    let mut counts: BTreeMap<String, ClassEntryCounts> = BTreeMap::new();
    for registration in registrations.iter().filter(|r| !r.cancelled) {
        let count: &mut ClassEntryCounts = counts
            .entry(registration.class_or_type().to_string())
            .or_default();
        count.entries += 1;
        if is_participant_group(&resolve_group_key(registration, event_groups)) {
            count.participants += 1;
        }
    }
    counts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::helpers::{create_test_groups, create_test_registration, with_group};
    use std::collections::BTreeSet;
    use time::macros::date;

    #[test]
    fn test_empty_input_still_has_fixed_lists() {
        let groups: Vec<EventGroup> = create_test_groups();
        let lists: GroupedRegistrations = partition(&[], &groups);

        assert!(lists.is_empty());
        assert!(lists.reserve().is_empty());
        assert!(lists.cancelled().is_empty());
        assert_eq!(lists.keys().count(), groups.len() + 2);
    }

    #[test]
    fn test_each_registration_in_exactly_one_list() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let mut cancelled: Registration = with_group(create_test_registration("c", &[d1]), &groups[0].key, 1.0);
        cancelled.cancelled = true;
        let regs: Vec<Registration> = vec![
            with_group(create_test_registration("a", &[d1]), &groups[0].key, 2.0),
            create_test_registration("b", &[d1]),
            cancelled,
            with_group(create_test_registration("d", &[d1]), "gone", 1.0),
        ];

        let lists: GroupedRegistrations = partition(&regs, &groups);

        assert_eq!(lists.len(), regs.len());
        let ids: BTreeSet<&str> = lists.flatten().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, BTreeSet::from(["a", "b", "c", "d"]));
        assert_eq!(lists.list(&groups[0].key).len(), 1);
        assert_eq!(lists.reserve().len(), 2);
        assert_eq!(lists.cancelled().len(), 1);
    }

    #[test]
    fn test_lists_sorted_with_missing_numbers_last() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let mut unnumbered: Registration = create_test_registration("none", &[d1]);
        unnumbered.group = Some(crate::types::RegistrationGroup {
            key: groups[0].key.clone(),
            number: None,
            date: None,
            time: None,
        });
        let regs: Vec<Registration> = vec![
            unnumbered,
            with_group(create_test_registration("three", &[d1]), &groups[0].key, 3.0),
            with_group(create_test_registration("half", &[d1]), &groups[0].key, 1.5),
            with_group(create_test_registration("one", &[d1]), &groups[0].key, 1.0),
        ];

        let lists: GroupedRegistrations = partition(&regs, &groups);
        let order: Vec<&str> = lists
            .list(&groups[0].key)
            .iter()
            .map(|e| e.registration.id.as_str())
            .collect();

        assert_eq!(order, vec!["one", "half", "three", "none"]);
    }

    #[test]
    fn test_equal_numbers_keep_input_order() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let regs: Vec<Registration> = vec![
            with_group(create_test_registration("first", &[d1]), &groups[0].key, 1.0),
            with_group(create_test_registration("second", &[d1]), &groups[0].key, 1.0),
        ];

        let lists: GroupedRegistrations = partition(&regs, &groups);
        let order: Vec<&str> = lists
            .list(&groups[0].key)
            .iter()
            .map(|e| e.registration.id.as_str())
            .collect();

        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn test_drop_groups_follow_requested_days() {
        let groups: Vec<EventGroup> = create_test_groups();
        let reg: Registration = create_test_registration("a", &[date!(2024 - 06 - 02)]);

        let lists: GroupedRegistrations = partition(&[reg], &groups);
        let (_, _, entry) = lists.find("a").unwrap();

        assert_eq!(entry.drop_groups, vec!["2024-06-02-ap", "2024-06-02-ip"]);
        assert!(!entry.can_drop_into("2024-06-01-ap"));
    }

    #[test]
    fn test_group_without_date_accepts_anyone() {
        let groups: Vec<EventGroup> = vec![EventGroup {
            key: String::from("open"),
            number: 1,
            date: None,
            time: None,
        }];
        let reg: Registration = create_test_registration("a", &[date!(2024 - 06 - 02)]);

        assert_eq!(drop_groups(&reg, &groups), vec!["open"]);
    }

    #[test]
    fn test_can_arrange_reserve_locks_after_notification() {
        let groups: Vec<EventGroup> = create_test_groups();
        let mut notified: Registration = create_test_registration("a", &[date!(2024 - 06 - 01)]);
        notified.reserve_notified = true;

        let lists: GroupedRegistrations = partition(&[notified], &groups);

        assert!(lists.reserve_notified_any());
        assert!(!lists.can_arrange_reserve(false));
        assert!(lists.can_arrange_reserve(true));
    }

    #[test]
    fn test_class_entry_counts_skip_cancelled() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let mut cancelled: Registration = create_test_registration("c", &[d1]);
        cancelled.cancelled = true;
        let regs: Vec<Registration> = vec![
            with_group(create_test_registration("a", &[d1]), &groups[0].key, 1.0),
            create_test_registration("b", &[d1]),
            cancelled,
        ];

        let counts = class_entry_counts(&regs, &groups);

        assert_eq!(
            counts.get("AVO"),
            Some(&ClassEntryCounts {
                entries: 2,
                participants: 1
            })
        );
    }
}
