// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{CreateEventRequest, CreateRegistrationRequest, create_event, create_registration};
use koekalenteri_audit::{Actor, Cause};
use koekalenteri_domain::{
    ClassDate, EventClass, EventGroup, EventState, GROUP_KEY_RESERVE, RegistrationDate,
    RegistrationGroup, RegistrationTime,
};
use koekalenteri_persistence::Persistence;
use time::macros::date;

pub const EVENT_ID: &str = "event-1";
pub const FIRST_GROUP: &str = "2024-06-01-ap";

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

/// AVO is picked and runs two days; VOI runs the second day all day.
pub fn create_test_event_request() -> CreateEventRequest {
    CreateEventRequest {
        id: String::from(EVENT_ID),
        event_type: String::from("NOME-B"),
        name: String::from("Summer Trial"),
        state: String::from("confirmed"),
        default_times: vec![String::from("ap"), String::from("ip")],
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
                places: 2,
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

/// An AVO registration for the morning of the first day.
pub fn create_test_registration_request(id: &str) -> CreateRegistrationRequest {
    CreateRegistrationRequest {
        id: id.to_string(),
        class: Some(String::from("AVO")),
        dog_name: format!("Dog {id}"),
        dates: vec![RegistrationDate::new(
            date!(2024 - 06 - 01),
            Some(RegistrationTime::Ap),
        )],
        group: None,
        reserve_notified: false,
        confirmed: false,
    }
}

pub fn first_group(number: f64) -> RegistrationGroup {
    let group: EventGroup = EventGroup::new(1, date!(2024 - 06 - 01), Some(RegistrationTime::Ap));
    RegistrationGroup::in_group(&group, number)
}

pub fn reserve(number: f64) -> RegistrationGroup {
    RegistrationGroup::new(GROUP_KEY_RESERVE, number)
}

/// A database holding only the test event.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_event(&mut persistence, create_test_event_request()).unwrap();
    persistence
}

/// The test event with two participants (`p1`, `p2`) in the first group
/// and two reserve dogs. `r1` asked for the first group's day, `r2` only
/// for the second day's afternoon.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = create_test_persistence();

    let mut p1: CreateRegistrationRequest = create_test_registration_request("p1");
    p1.group = Some(first_group(1.0));
    let mut p2: CreateRegistrationRequest = create_test_registration_request("p2");
    p2.group = Some(first_group(2.0));
    let mut r1: CreateRegistrationRequest = create_test_registration_request("r1");
    r1.group = Some(reserve(1.0));
    let mut r2: CreateRegistrationRequest = create_test_registration_request("r2");
    r2.dates = vec![RegistrationDate::new(
        date!(2024 - 06 - 02),
        Some(RegistrationTime::Ip),
    )];
    r2.group = Some(reserve(2.0));

    for request in [p1, p2, r1, r2] {
        create_registration(&mut persistence, EVENT_ID, request).unwrap();
    }
    persistence
}
