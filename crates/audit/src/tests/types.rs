// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};

fn create_test_event(details: Option<String>) -> AuditEvent {
    AuditEvent::new(
        String::from("event-1"),
        String::from("r1"),
        Actor::new(String::from("admin@example.com"), String::from("admin")),
        Cause::new(String::from("req-456"), String::from("Group save")),
        Action::new(String::from("MoveRegistration"), details),
        StateSnapshot::new(String::from(r#"{"key":"reserve","number":2.0}"#)),
        StateSnapshot::new(String::from(r#"{"key":"2024-06-01-ap","number":4.0}"#)),
    )
}

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new(String::from("user-123"), String::from("admin"));

    assert_eq!(actor.id, "user-123");
    assert_eq!(actor.actor_type, "admin");
}

#[test]
fn test_cause_creation_requires_all_fields() {
    let cause: Cause = Cause::new(String::from("req-456"), String::from("Group save"));

    assert_eq!(cause.id, "req-456");
    assert_eq!(cause.description, "Group save");
}

#[test]
fn test_audit_event_carries_registration_identity() {
    let event: AuditEvent = create_test_event(None);

    assert_eq!(event.event_id, "event-1");
    assert_eq!(event.registration_id, "r1");
    assert_eq!(event.actor.actor_type, "admin");
}

#[test]
fn test_message_prefers_details() {
    let detailed: AuditEvent =
        create_test_event(Some(String::from("Group: reserve #2 -> 2024-06-01-ap #4 move")));
    let bare: AuditEvent = create_test_event(None);

    assert_eq!(detailed.message(), "Group: reserve #2 -> 2024-06-01-ap #4 move");
    assert_eq!(bare.message(), "MoveRegistration");
}

#[test]
fn test_empty_snapshot() {
    assert!(StateSnapshot::empty().data.is_empty());
}

#[test]
fn test_audit_event_json_round_trip() {
    let event: AuditEvent = create_test_event(Some(String::from("Group: -> reserve #1 consequence")));

    let json: String = serde_json::to_string(&event).unwrap();
    let back: AuditEvent = serde_json::from_str(&json).unwrap();

    assert_eq!(back, event);
}
