// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derivation of the date-time groups of a class.

use crate::types::{ClassDate, EventGroup, Registration, RegistrationTime};

/// Builds the admission groups of a class.
///
/// Each trial day contributes one group per slot, using the day's own slots
/// or `default_times`. The all-day slot is dropped from a multi-slot day
/// unless a registration explicitly asked for it on that day. Groups are
/// numbered from 1 in day then slot order.
///
/// # Arguments
///
/// * `class_dates` - The trial days of the class
/// * `default_times` - The event type's slots
/// * `registrations` - Registrations of the class
#[must_use]
pub fn derive_event_groups(
    class_dates: &[ClassDate],
    default_times: &[RegistrationTime],
    registrations: &[Registration],
) -> Vec<EventGroup> {
    let mut days: Vec<&ClassDate> = class_dates.iter().collect();
    days.sort_by_key(|d| d.date);

    let mut groups: Vec<EventGroup> = Vec::new();
    let mut number: u32 = 0;

    for day in days {
        let mut times: Vec<RegistrationTime> = day
            .times
            .clone()
            .unwrap_or_else(|| default_times.to_vec());
        times.sort();
        times.dedup();

        if times.len() > 1 && !all_day_requested(registrations, day) {
            times.retain(|t| *t != RegistrationTime::Kp);
        }

        if times.is_empty() {
            number += 1;
            groups.push(EventGroup::new(number, day.date, None));
            continue;
        }

        for time in times {
            number += 1;
            groups.push(EventGroup::new(number, day.date, Some(time)));
        }
    }

    groups
}

fn all_day_requested(registrations: &[Registration], day: &ClassDate) -> bool {
    registrations.iter().any(|r| {
        r.dates
            .iter()
            .any(|d| d.date == day.date && d.time == Some(RegistrationTime::Kp))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegistrationDate;
    use crate::tests::helpers::create_test_registration;
    use time::macros::date;

    fn day(date: time::Date, times: Option<Vec<RegistrationTime>>) -> ClassDate {
        ClassDate { date, times }
    }

    #[test]
    fn test_all_day_slot_removed_when_other_slots_exist() {
        let groups: Vec<EventGroup> = derive_event_groups(
            &[day(date!(2024 - 06 - 01), None)],
            &[RegistrationTime::Ap, RegistrationTime::Ip, RegistrationTime::Kp],
            &[],
        );

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-06-01-ap", "2024-06-01-ip"]);
    }

    #[test]
    fn test_all_day_slot_kept_when_requested() {
        let mut reg: Registration = create_test_registration("r1", &[]);
        reg.dates = vec![RegistrationDate::new(
            date!(2024 - 06 - 01),
            Some(RegistrationTime::Kp),
        )];

        let groups: Vec<EventGroup> = derive_event_groups(
            &[day(date!(2024 - 06 - 01), None)],
            &[RegistrationTime::Ap, RegistrationTime::Ip, RegistrationTime::Kp],
            &[reg],
        );

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].key, "2024-06-01-kp");
    }

    #[test]
    fn test_single_all_day_slot_is_kept() {
        let groups: Vec<EventGroup> = derive_event_groups(
            &[day(date!(2024 - 06 - 01), Some(vec![RegistrationTime::Kp]))],
            &[RegistrationTime::Ap, RegistrationTime::Ip],
            &[],
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].time, Some(RegistrationTime::Kp));
    }

    #[test]
    fn test_groups_numbered_in_day_order() {
        let groups: Vec<EventGroup> = derive_event_groups(
            &[
                day(date!(2024 - 06 - 02), None),
                day(date!(2024 - 06 - 01), None),
            ],
            &[RegistrationTime::Ip, RegistrationTime::Ap],
            &[],
        );

        let summary: Vec<(u32, &str)> = groups.iter().map(|g| (g.number, g.key.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (1, "2024-06-01-ap"),
                (2, "2024-06-01-ip"),
                (3, "2024-06-02-ap"),
                (4, "2024-06-02-ip"),
            ]
        );
    }

    #[test]
    fn test_day_without_slots_keys_on_date() {
        let groups: Vec<EventGroup> =
            derive_event_groups(&[day(date!(2024 - 06 - 01), Some(vec![]))], &[], &[]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "2024-06-01");
        assert_eq!(groups[0].time, None);
    }
}
