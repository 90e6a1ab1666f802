// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authoritative dense renumbering of registrations.

use crate::group_key::resolve_group_key;
use crate::partition::MISSING_NUMBER_SENTINEL;
use crate::types::{
    EventGroup, GROUP_KEY_CANCELLED, GROUP_KEY_RESERVE, Registration, RegistrationGroup,
    is_participant_group,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Numbering bucket shared by every participant group of an event.
const PARTICIPANTS_BUCKET: &str = "participants";

/// The list key a registration is normalised to.
///
/// A registration carrying the cancelled key counts as cancelled even if its
/// flag was not set.
#[must_use]
pub fn normalized_key(registration: &Registration, event_groups: &[EventGroup]) -> String {
    let stored_cancelled: bool = registration
        .group
        .as_ref()
        .is_some_and(|g| g.key == GROUP_KEY_CANCELLED);
    if stored_cancelled {
        return GROUP_KEY_CANCELLED.to_string();
    }
    resolve_group_key(registration, event_groups)
}

/// The bucket a registration is numbered in.
///
/// Participants share one running numbering across all groups of the event;
/// reserve and cancelled lists number per class.
#[must_use]
pub fn numbering_key(registration: &Registration, event_groups: &[EventGroup]) -> String {
    let key: String = normalized_key(registration, event_groups);
    if key == GROUP_KEY_CANCELLED {
        format!("{GROUP_KEY_CANCELLED}-{}", registration.class_or_type())
    } else if is_participant_group(&key) {
        PARTICIPANTS_BUCKET.to_string()
    } else {
        format!("{GROUP_KEY_RESERVE}-{}", registration.class_or_type())
    }
}

/// Renumbers registrations to consecutive integers per bucket.
///
/// Registrations are stably sorted by group day, class, slot and current number,
/// then numbered 1..n within their bucket. Keys are normalised and the
/// cancelled flag follows the key. The slice is left in sorted order.
pub fn renumber(registrations: &mut [Registration], event_groups: &[EventGroup]) {
    registrations.sort_by(compare_for_numbering);

    let mut counters: BTreeMap<String, u32> = BTreeMap::new();
    for registration in registrations.iter_mut() {
        let key: String = normalized_key(registration, event_groups);
        let counter: &mut u32 = counters
            .entry(numbering_key(registration, event_groups))
            .or_insert(0);
        *counter += 1;
        let number: f64 = f64::from(*counter);

        let group: RegistrationGroup = match event_groups.iter().find(|g| g.key == key) {
            Some(event_group) => RegistrationGroup::in_group(event_group, number),
            None => RegistrationGroup::new(&key, number),
        };
        registration.cancelled = key == GROUP_KEY_CANCELLED;
        registration.group = Some(group);
    }
}

fn compare_for_numbering(a: &Registration, b: &Registration) -> Ordering {
    sort_date(a)
        .cmp(&sort_date(b))
        .then_with(|| a.class_or_type().cmp(b.class_or_type()))
        .then_with(|| sort_time(a).cmp(&sort_time(b)))
        .then_with(|| sort_number(a).total_cmp(&sort_number(b)))
}

/// Undated groups (reserve, cancelled) sort after dated ones.
fn sort_date(registration: &Registration) -> (bool, Option<time::Date>) {
    let date: Option<time::Date> = registration.group.as_ref().and_then(|g| g.date);
    (date.is_none(), date)
}

fn sort_time(registration: &Registration) -> (bool, Option<crate::types::RegistrationTime>) {
    let time = registration.group.as_ref().and_then(|g| g.time);
    (time.is_none(), time)
}

fn sort_number(registration: &Registration) -> f64 {
    registration.number().unwrap_or(MISSING_NUMBER_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{create_test_groups, create_test_registration, with_group};
    use time::macros::date;

    fn summary(regs: &[Registration]) -> Vec<(String, String, f64)> {
        regs.iter()
            .map(|r| {
                let group: &RegistrationGroup = r.group.as_ref().unwrap_or_else(|| panic!("{} has no group", r.id));
                (r.id.clone(), group.key.clone(), group.number.unwrap_or(-1.0))
            })
            .collect()
    }

    fn entry(id: &str, key: &str, number: f64) -> (String, String, f64) {
        (id.to_string(), key.to_string(), number)
    }

    #[test]
    fn test_fractional_numbers_become_dense() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let mut regs: Vec<Registration> = vec![
            with_group(create_test_registration("a", &[d1]), "2024-06-01-ap", 1.0),
            with_group(create_test_registration("b", &[d1]), "2024-06-01-ap", 2.0),
            with_group(create_test_registration("moved", &[d1]), "2024-06-01-ap", 0.5),
        ];
        for reg in &mut regs {
            reg.group = Some(RegistrationGroup::in_group(&groups[0], reg.number().unwrap_or(0.0)));
        }

        renumber(&mut regs, &groups);

        assert_eq!(
            summary(&regs),
            vec![
                entry("moved", "2024-06-01-ap", 1.0),
                entry("a", "2024-06-01-ap", 2.0),
                entry("b", "2024-06-01-ap", 3.0),
            ]
        );
    }

    #[test]
    fn test_participants_number_across_groups() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let mut regs: Vec<Registration> = vec![
            {
                let mut r: Registration = create_test_registration("ip", &[d1]);
                r.group = Some(RegistrationGroup::in_group(&groups[1], 1.0));
                r
            },
            {
                let mut r: Registration = create_test_registration("ap", &[d1]);
                r.group = Some(RegistrationGroup::in_group(&groups[0], 7.0));
                r
            },
        ];

        renumber(&mut regs, &groups);

        assert_eq!(
            summary(&regs),
            vec![
                entry("ap", "2024-06-01-ap", 1.0),
                entry("ip", "2024-06-01-ip", 2.0),
            ]
        );
    }

    #[test]
    fn test_reserve_and_cancelled_number_separately() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let mut regs: Vec<Registration> = vec![
            with_group(create_test_registration("r1", &[d1]), GROUP_KEY_RESERVE, 5.0),
            with_group(create_test_registration("c1", &[d1]), GROUP_KEY_CANCELLED, 3.0),
            with_group(create_test_registration("r2", &[d1]), GROUP_KEY_RESERVE, 9.0),
        ];

        renumber(&mut regs, &groups);

        let by_id = |id: &str| regs.iter().find(|r| r.id == id).cloned().unwrap_or_else(|| panic!("{id} missing"));
        assert_eq!(by_id("r1").number(), Some(1.0));
        assert_eq!(by_id("r2").number(), Some(2.0));
        assert_eq!(by_id("c1").number(), Some(1.0));
        assert!(by_id("c1").cancelled);
        assert!(!by_id("r1").cancelled);
    }

    #[test]
    fn test_stale_keys_are_normalised() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let mut regs: Vec<Registration> = vec![
            with_group(create_test_registration("orphan", &[d1]), "2023-01-01-ap", 1.0),
            create_test_registration("ungrouped", &[d1]),
        ];

        renumber(&mut regs, &groups);

        assert!(regs.iter().all(|r| r.group.as_ref().is_some_and(|g| g.key == GROUP_KEY_RESERVE)));
        let mut numbers: Vec<f64> = regs.iter().filter_map(Registration::number).collect();
        numbers.sort_by(f64::total_cmp);
        assert_eq!(numbers, vec![1.0, 2.0]);
    }

    #[test]
    fn test_numbering_key_buckets() {
        let groups: Vec<EventGroup> = create_test_groups();
        let d1 = date!(2024 - 06 - 01);
        let mut cancelled: Registration = create_test_registration("c", &[d1]);
        cancelled.cancelled = true;
        let mut classless: Registration = create_test_registration("x", &[d1]);
        classless.class = None;

        assert_eq!(numbering_key(&cancelled, &groups), "cancelled-AVO");
        assert_eq!(numbering_key(&classless, &groups), "reserve-NOME-B");
        assert_eq!(
            numbering_key(&with_group(create_test_registration("p", &[d1]), "2024-06-01-ap", 1.0), &groups),
            "participants"
        );
    }
}
