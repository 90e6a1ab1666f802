// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_event, create_test_persistence, create_test_registration};
use crate::{Persistence, PersistenceError};
use koekalenteri_domain::{Event, EventState};

#[test]
fn test_event_round_trip_keeps_class_order() {
    let mut persistence: Persistence = create_test_persistence();

    let event: Event = persistence.get_event("event-1").unwrap();

    assert_eq!(event, create_test_event());
    let classes: Vec<&str> = event.classes.iter().map(|c| c.class.as_str()).collect();
    assert_eq!(classes, vec!["AVO", "VOI"]);
}

#[test]
fn test_upsert_replaces_classes_and_keeps_registrations() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .insert_registration(&create_test_registration("r1"))
        .unwrap();

    let mut event: Event = create_test_event();
    event.state = EventState::Picked;
    event.classes.truncate(1);
    event.classes[0].state = Some(EventState::Invited);
    persistence.upsert_event(&event).unwrap();

    let stored: Event = persistence.get_event("event-1").unwrap();
    assert_eq!(stored.state, EventState::Picked);
    assert_eq!(stored.classes.len(), 1);
    assert_eq!(stored.class_state(Some("AVO")), EventState::Invited);
    assert_eq!(persistence.list_registrations("event-1").unwrap().len(), 1);
}

#[test]
fn test_missing_event_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<Event, PersistenceError> = persistence.get_event("nope");

    assert_eq!(
        result,
        Err(PersistenceError::EventNotFound(String::from("nope")))
    );
}
