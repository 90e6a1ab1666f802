// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_test_actor, create_test_cause, create_test_event, create_test_persistence,
    create_test_registration, in_first_group,
};
use crate::{AuditRecord, PersistGroupSaveResult, Persistence, PersistenceError};
use koekalenteri::{Command, TransitionResult, apply};
use koekalenteri_audit::AuditEvent;
use koekalenteri_domain::{GROUP_KEY_RESERVE, GroupChange, Registration, RegistrationGroup};

fn seed(persistence: &mut Persistence) -> Vec<Registration> {
    let registrations: Vec<Registration> = vec![
        in_first_group(create_test_registration("p1"), 1.0),
        in_first_group(create_test_registration("p2"), 2.0),
        in_first_group(create_test_registration("p3"), 3.0),
    ];
    for registration in &registrations {
        persistence.insert_registration(registration).unwrap();
    }
    registrations
}

fn save_to_reserve(registrations: &[Registration], id: &str) -> TransitionResult {
    apply(
        &create_test_event(),
        registrations,
        Command::SaveGroups {
            event_id: String::from("event-1"),
            changes: vec![GroupChange {
                event_id: String::from("event-1"),
                id: id.to_string(),
                group: RegistrationGroup::new(GROUP_KEY_RESERVE, 1.0),
                cancelled: Some(false),
            }],
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}

#[test]
fn test_group_save_writes_registrations_and_audit() {
    let mut persistence: Persistence = create_test_persistence();
    let registrations: Vec<Registration> = seed(&mut persistence);
    let result: TransitionResult = save_to_reserve(&registrations, "p1");

    let written: PersistGroupSaveResult = persistence.persist_group_save("event-1", &result).unwrap();

    // p1 moved, p2 and p3 renumbered
    assert_eq!(written.updated, 3);
    assert_eq!(written.audit_ids.len(), 3);
    let p1: Registration = persistence.get_registration("event-1", "p1").unwrap();
    assert_eq!(p1.group, Some(RegistrationGroup::new(GROUP_KEY_RESERVE, 1.0)));
    assert_eq!(
        persistence.get_registration("event-1", "p3").unwrap().number(),
        Some(2.0)
    );

    let trail: Vec<AuditRecord> = persistence.get_audit_trail("event-1", None).unwrap();
    assert_eq!(trail.len(), 3);
    assert!(trail.windows(2).all(|w| w[0].audit_id < w[1].audit_id));
    let events: Vec<AuditEvent> = trail.into_iter().map(|r| r.event).collect();
    assert_eq!(events, result.audit_events);
}

#[test]
fn test_audit_trail_filters_by_registration() {
    let mut persistence: Persistence = create_test_persistence();
    let registrations: Vec<Registration> = seed(&mut persistence);
    persistence
        .persist_group_save("event-1", &save_to_reserve(&registrations, "p1"))
        .unwrap();

    let trail: Vec<AuditRecord> = persistence.get_audit_trail("event-1", Some("p1")).unwrap();

    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].event.registration_id, "p1");
    assert!(
        trail[0]
            .event
            .action
            .details
            .as_deref()
            .is_some_and(|d| d.ends_with("move"))
    );
}

#[test]
fn test_failed_group_save_writes_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    let registrations: Vec<Registration> = seed(&mut persistence);
    let mut result: TransitionResult = save_to_reserve(&registrations, "p1");
    result.changed.push(create_test_registration("ghost"));

    let outcome: Result<PersistGroupSaveResult, PersistenceError> =
        persistence.persist_group_save("event-1", &result);

    assert_eq!(
        outcome,
        Err(PersistenceError::RegistrationNotFound(String::from("ghost")))
    );
    assert_eq!(
        persistence.get_registration("event-1", "p1").unwrap(),
        registrations[0]
    );
    assert!(persistence.get_audit_trail("event-1", None).unwrap().is_empty());
}
