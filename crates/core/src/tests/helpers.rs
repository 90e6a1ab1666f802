// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Command, ConfirmDialog, Notice, Notifier, RegistrationStore, StateProvider, StoreError, apply,
};
use koekalenteri_audit::{Actor, Cause};
use koekalenteri_domain::{
    ClassDate, ConfirmationRequest, Event, EventClass, EventGroup, EventState, GROUP_KEY_RESERVE,
    GroupChange, Registration, RegistrationDate, RegistrationGroup, RegistrationTime,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use time::macros::date;

pub const GROUP_1: &str = "2024-06-01-ap";

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Group save"))
}

/// A confirmed two day event with class AVO and morning and afternoon slots.
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

pub fn create_test_event_in_state(state: EventState) -> Event {
    let mut event: Event = create_test_event();
    event.classes[0].state = Some(state);
    event
}

pub fn create_test_registration(id: &str, day: time::Date) -> Registration {
    Registration {
        id: id.to_string(),
        event_id: String::from("event-1"),
        event_type: String::from("NOME-B"),
        class: Some(String::from("AVO")),
        dog_name: format!("Dog {id}"),
        dates: vec![RegistrationDate::new(day, None)],
        cancelled: false,
        cancel_reason: None,
        reserve_notified: false,
        confirmed: false,
        group: None,
    }
}

pub fn in_group_1(mut registration: Registration, number: f64) -> Registration {
    let group: EventGroup = EventGroup::new(1, date!(2024 - 06 - 01), Some(RegistrationTime::Ap));
    registration.group = Some(RegistrationGroup::in_group(&group, number));
    registration
}

pub fn in_reserve(mut registration: Registration, number: f64) -> Registration {
    registration.group = Some(RegistrationGroup::new(GROUP_KEY_RESERVE, number));
    registration
}

/// `p1`, `p2` in the first group; `r1` (day one) and `r2` (day two) in reserve.
pub fn create_test_registrations() -> Vec<Registration> {
    let d1 = date!(2024 - 06 - 01);
    let d2 = date!(2024 - 06 - 02);
    vec![
        in_group_1(create_test_registration("p1", d1), 1.0),
        in_group_1(create_test_registration("p2", d1), 2.0),
        in_reserve(create_test_registration("r1", d1), 1.0),
        in_reserve(create_test_registration("r2", d2), 2.0),
    ]
}

pub fn create_test_change(id: &str, group: RegistrationGroup, cancelled: Option<bool>) -> GroupChange {
    GroupChange {
        event_id: String::from("event-1"),
        id: id.to_string(),
        group,
        cancelled,
    }
}

pub fn save(event: &Event, registrations: &[Registration], changes: Vec<GroupChange>) -> crate::TransitionResult {
    apply(
        event,
        registrations,
        Command::SaveGroups {
            event_id: event.id.clone(),
            changes,
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}

/// An in-memory registration store that saves through `apply`.
pub struct MemoryStore {
    pub event: Event,
    pub registrations: Mutex<Vec<Registration>>,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
    pub fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new(event: Event, registrations: Vec<Registration>) -> Arc<Self> {
        Arc::new(Self {
            event,
            registrations: Mutex::new(registrations),
            loads: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
        })
    }

    pub fn registration(&self, id: &str) -> Registration {
        self.registrations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .unwrap()
    }
}

impl RegistrationStore for Arc<MemoryStore> {
    async fn load(&self, _event_id: &str) -> Result<Vec<Registration>, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.registrations.lock().unwrap().clone())
    }

    async fn save_groups(
        &self,
        event_id: &str,
        changes: &[GroupChange],
    ) -> Result<Vec<Registration>, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::new("connection reset"));
        }
        let mut registrations = self.registrations.lock().unwrap();
        let result = apply(
            &self.event,
            &registrations,
            Command::SaveGroups {
                event_id: event_id.to_string(),
                changes: changes.to_vec(),
            },
            create_test_actor(),
            create_test_cause(),
        )
        .map_err(|e| StoreError::new(e.to_string()))?;
        registrations.clone_from(&result.registrations);
        Ok(result.registrations)
    }
}

pub struct FixedState(pub EventState);

impl StateProvider for FixedState {
    fn class_state(&self, _event_id: &str, _class: Option<&str>) -> EventState {
        self.0
    }
}

/// Answers every confirmation with a fixed choice and records the requests.
pub struct ScriptedConfirm {
    pub answer: bool,
    pub requests: Mutex<Vec<ConfirmationRequest>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            requests: Mutex::new(Vec::new()),
        })
    }
}

impl ConfirmDialog for Arc<ScriptedConfirm> {
    async fn confirm(&self, request: &ConfirmationRequest) -> bool {
        self.requests.lock().unwrap().push(request.clone());
        self.answer
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl Notifier for Arc<RecordingNotifier> {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
