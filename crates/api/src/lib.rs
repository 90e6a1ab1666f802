// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for registration group management.
//!
//! Handlers are synchronous, take the persistence layer explicitly and
//! translate every lower-level error into an [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
pub use handlers::{
    create_event, create_registration, evaluate_move, get_audit_trail, get_event, get_selection,
    list_registrations, save_groups,
};
pub use request_response::{
    AuditEntryInfo, CreateEventRequest, CreateEventResponse, CreateRegistrationRequest,
    CreateRegistrationResponse, EvaluateMoveRequest, EvaluateMoveResponse, GetAuditTrailResponse,
    GetEventResponse, GetSelectionResponse, ListRegistrationsResponse, NoticeInfo,
    PlannedMessageInfo, SaveGroupsRequest, SaveGroupsResponse, SelectionRequest,
};
