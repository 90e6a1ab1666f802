// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::lifecycle::EventState;
use crate::types::{
    ClassDate, Event, EventClass, EventGroup, Registration, RegistrationDate, RegistrationGroup,
    RegistrationTime,
};
use time::Date;
use time::macros::date;

/// Morning and afternoon groups on 2024-06-01 and 2024-06-02, numbered 1..4.
pub fn create_test_groups() -> Vec<EventGroup> {
    vec![
        EventGroup::new(1, date!(2024 - 06 - 01), Some(RegistrationTime::Ap)),
        EventGroup::new(2, date!(2024 - 06 - 01), Some(RegistrationTime::Ip)),
        EventGroup::new(3, date!(2024 - 06 - 02), Some(RegistrationTime::Ap)),
        EventGroup::new(4, date!(2024 - 06 - 02), Some(RegistrationTime::Ip)),
    ]
}

/// An ungrouped registration of dog "Dog {id}" in class AVO of `event-1`.
pub fn create_test_registration(id: &str, dates: &[Date]) -> Registration {
    Registration {
        id: id.to_string(),
        event_id: String::from("event-1"),
        event_type: String::from("NOME-B"),
        class: Some(String::from("AVO")),
        dog_name: format!("Dog {id}"),
        dates: dates.iter().map(|d| RegistrationDate::new(*d, None)).collect(),
        cancelled: false,
        cancel_reason: None,
        reserve_notified: false,
        confirmed: false,
        group: None,
    }
}

/// Places a registration in a list without a date.
pub fn with_group(mut registration: Registration, key: &str, number: f64) -> Registration {
    registration.group = Some(RegistrationGroup::new(key, number));
    registration
}

/// A two day confirmed event with one AVO class.
pub fn create_test_event() -> Event {
    Event {
        id: String::from("event-1"),
        event_type: String::from("NOME-B"),
        name: String::from("Test Trial"),
        state: EventState::Confirmed,
        default_times: vec![RegistrationTime::Ap, RegistrationTime::Ip],
        dates: Vec::new(),
        classes: vec![EventClass {
            class: String::from("AVO"),
            state: None,
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
        }],
    }
}
