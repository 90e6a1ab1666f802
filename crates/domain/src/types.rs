// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::{format_date, iso_date, option_iso_date};
use crate::error::DomainError;
use crate::lifecycle::EventState;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// List key of withdrawn registrations.
pub const GROUP_KEY_CANCELLED: &str = "cancelled";

/// List key of registrations without a firm place.
pub const GROUP_KEY_RESERVE: &str = "reserve";

/// Time slot of a trial day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationTime {
    /// Morning.
    Ap,
    /// Afternoon.
    Ip,
    /// All day. Never offered together with the morning and afternoon slots.
    Kp,
}

impl RegistrationTime {
    /// Returns the string representation of the slot.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ap => "ap",
            Self::Ip => "ip",
            Self::Kp => "kp",
        }
    }
}

impl FromStr for RegistrationTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ap" => Ok(Self::Ap),
            "ip" => Ok(Self::Ip),
            "kp" => Ok(Self::Kp),
            _ => Err(DomainError::InvalidTimeSlot(s.to_string())),
        }
    }
}

impl std::fmt::Display for RegistrationTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One day and slot a handler is available for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDate {
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<RegistrationTime>,
}

impl RegistrationDate {
    #[must_use]
    pub const fn new(date: Date, time: Option<RegistrationTime>) -> Self {
        Self { date, time }
    }

    /// The group key this date would be placed in.
    #[must_use]
    pub fn key(&self) -> String {
        date_key(self.date, self.time)
    }
}

/// Builds the key of a date-time group, e.g. `2024-06-01-ap`.
///
/// A date without a slot keys on the date alone.
#[must_use]
pub fn date_key(date: Date, time: Option<RegistrationTime>) -> String {
    match time {
        Some(time) => format!("{}-{}", format_date(date), time.as_str()),
        None => format_date(date),
    }
}

/// Returns true for keys that name a date-time group rather than reserve or cancelled.
#[must_use]
pub fn is_participant_group(key: &str) -> bool {
    key != GROUP_KEY_CANCELLED && key != GROUP_KEY_RESERVE
}

/// The list a registration occupies and its position within that list.
///
/// `number` is fractional while a client is reordering and is normalised to
/// consecutive integers by the authoritative save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationGroup {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
    #[serde(
        default,
        with = "option_iso_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<RegistrationTime>,
}

impl RegistrationGroup {
    /// Creates an assignment to a list that has no date, such as reserve.
    #[must_use]
    pub fn new(key: &str, number: f64) -> Self {
        Self {
            key: key.to_string(),
            number: Some(number),
            date: None,
            time: None,
        }
    }

    /// Creates an assignment to a date-time group.
    #[must_use]
    pub fn in_group(group: &EventGroup, number: f64) -> Self {
        Self {
            key: group.key.clone(),
            number: Some(number),
            date: group.date,
            time: group.time,
        }
    }

    /// The key derived from the stored date and slot, if both are present.
    #[must_use]
    pub fn derived_key(&self) -> Option<String> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Some(date_key(date, Some(time))),
            _ => None,
        }
    }
}

/// One dog's entry into an event, and possibly one class within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub event_id: String,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub dog_name: String,
    #[serde(default)]
    pub dates: Vec<RegistrationDate>,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(default)]
    pub reserve_notified: bool,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<RegistrationGroup>,
}

impl Registration {
    /// The stored order number, if any.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        self.group.as_ref().and_then(|g| g.number)
    }

    /// The class, falling back to the event type for events without classes.
    #[must_use]
    pub fn class_or_type(&self) -> &str {
        self.class.as_deref().unwrap_or(&self.event_type)
    }
}

/// One selectable admission slot of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventGroup {
    pub key: String,
    pub number: u32,
    #[serde(
        default,
        with = "option_iso_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<RegistrationTime>,
}

impl EventGroup {
    #[must_use]
    pub fn new(number: u32, date: Date, time: Option<RegistrationTime>) -> Self {
        Self {
            key: date_key(date, time),
            number,
            date: Some(date),
            time,
        }
    }
}

/// A trial day of a class and its configured slots.
///
/// When `times` is `None` the event type's default slots apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDate {
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<RegistrationTime>>,
}

/// A competition class within an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventClass {
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EventState>,
    #[serde(default)]
    pub dates: Vec<ClassDate>,
    #[serde(default)]
    pub places: u32,
}

/// A dog-show event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub event_type: String,
    pub name: String,
    pub state: EventState,
    /// Slots offered on each trial day unless a class date overrides them.
    #[serde(default)]
    pub default_times: Vec<RegistrationTime>,
    /// Trial days of events that have no classes.
    #[serde(default)]
    pub dates: Vec<ClassDate>,
    #[serde(default)]
    pub classes: Vec<EventClass>,
}

impl Event {
    /// Finds a class by name.
    #[must_use]
    pub fn class(&self, class: &str) -> Option<&EventClass> {
        self.classes.iter().find(|c| c.class == class)
    }

    /// The lifecycle state governing a class.
    ///
    /// A class without its own state follows the event.
    #[must_use]
    pub fn class_state(&self, class: Option<&str>) -> EventState {
        class
            .and_then(|name| self.class(name))
            .and_then(|c| c.state)
            .unwrap_or(self.state)
    }

    /// Trial days of a class, or of the whole event when `class` is `None`.
    #[must_use]
    pub fn class_dates(&self, class: Option<&str>) -> &[ClassDate] {
        match class.and_then(|name| self.class(name)) {
            Some(c) if !c.dates.is_empty() => &c.dates,
            _ => &self.dates,
        }
    }
}
