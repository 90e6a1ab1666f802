// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
use koekalenteri::{CoreError, StoreError};
use koekalenteri_domain::DomainError;
use koekalenteri_persistence::PersistenceError;

#[test]
fn test_position_error_is_invalid_input() {
    let err: ApiError = translate_domain_error(DomainError::InvalidPosition {
        position: 9,
        max: 2,
    });

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "position"));
}

#[test]
fn test_missing_registration_is_not_found() {
    let err: ApiError = translate_domain_error(DomainError::RegistrationNotFound {
        event_id: String::from("event-1"),
        registration_id: String::from("x"),
    });

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_store_failure_is_internal() {
    let err: ApiError = translate_core_error(CoreError::Store(StoreError::new("offline")));

    assert!(matches!(err, ApiError::Internal { ref message } if message.contains("offline")));
}

#[test]
fn test_core_domain_violation_is_unwrapped() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(DomainError::NoGroupChanges));

    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
}

#[test]
fn test_persistence_errors() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::EventNotFound(String::from("e"))),
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Event"
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::QueryFailed(String::from("boom"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_display() {
    let err: ApiError = ApiError::InvalidInput {
        field: String::from("class"),
        message: String::from("unknown"),
    };

    assert_eq!(err.to_string(), "Invalid input for field 'class': unknown");
}
