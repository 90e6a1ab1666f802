// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

pub mod dates;
mod error;
mod event_groups;
mod group_key;
mod lifecycle;
mod moves;
mod order;
mod partition;
mod patch;
mod renumber;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use event_groups::derive_event_groups;
pub use group_key::resolve_group_key;
pub use lifecycle::EventState;
pub use moves::{
    ConfirmationRequest, MoveContext, MoveDecision, MoveIntent, RejectReason, Rejection,
    evaluate_move, move_to_group, move_to_position, move_to_reserve,
};
pub use order::{HoverPosition, hover_position, reorder_number};
pub use partition::{
    ClassEntryCounts, GroupedEntry, GroupedRegistrations, MISSING_NUMBER_SENTINEL,
    class_entry_counts, drop_groups, partition,
};
pub use patch::{GroupChange, RegistrationPatch, apply_patch};
pub use renumber::{normalized_key, numbering_key, renumber};
pub use types::{
    ClassDate, Event, EventClass, EventGroup, GROUP_KEY_CANCELLED, GROUP_KEY_RESERVE,
    Registration, RegistrationDate, RegistrationGroup, RegistrationTime, date_key,
    is_participant_group,
};
pub use validation::{validate_group_change, validate_registration};
