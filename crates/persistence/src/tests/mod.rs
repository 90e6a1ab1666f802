// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod event_tests;
mod group_save_tests;
mod initialization_tests;

use crate::Persistence;
use koekalenteri_audit::{Actor, Cause};
use koekalenteri_domain::{
    ClassDate, Event, EventClass, EventGroup, EventState, Registration, RegistrationDate,
    RegistrationGroup, RegistrationTime,
};
use time::macros::date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// Two classes; AVO runs both days, VOI only the second with an all-day slot.
pub fn create_test_event() -> Event {
    Event {
        id: String::from("event-1"),
        event_type: String::from("NOME-B"),
        name: String::from("Summer Trial"),
        state: EventState::Confirmed,
        default_times: vec![RegistrationTime::Ap, RegistrationTime::Ip],
        dates: Vec::new(),
        classes: vec![
            EventClass {
                class: String::from("AVO"),
                state: Some(EventState::Picked),
                dates: vec![
                    ClassDate {
                        date: date!(2024 - 06 - 01),
                        times: None,
                    },
                    ClassDate {
                        date: date!(2024 - 06 - 02),
                        times: None,
                    },
                ],
                places: 10,
            },
            EventClass {
                class: String::from("VOI"),
                state: None,
                dates: vec![ClassDate {
                    date: date!(2024 - 06 - 02),
                    times: Some(vec![RegistrationTime::Kp]),
                }],
                places: 5,
            },
        ],
    }
}

pub fn create_test_registration(id: &str) -> Registration {
    Registration {
        id: id.to_string(),
        event_id: String::from("event-1"),
        event_type: String::from("NOME-B"),
        class: Some(String::from("AVO")),
        dog_name: format!("Dog {id}"),
        dates: vec![RegistrationDate::new(date!(2024 - 06 - 01), Some(RegistrationTime::Ap))],
        cancelled: false,
        cancel_reason: None,
        reserve_notified: false,
        confirmed: false,
        group: None,
    }
}

pub fn in_first_group(mut registration: Registration, number: f64) -> Registration {
    let group: EventGroup = EventGroup::new(1, date!(2024 - 06 - 01), Some(RegistrationTime::Ap));
    registration.group = Some(RegistrationGroup::in_group(&group, number));
    registration
}

/// A fresh database holding the test event.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.upsert_event(&create_test_event()).unwrap();
    persistence
}
