// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use koekalenteri::CoreError;
use koekalenteri_domain::DomainError;
use koekalenteri_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidLifecycleState(_) => invalid("state", message),
        DomainError::InvalidTimeSlot(_) => invalid("time", message),
        DomainError::RegistrationNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Registration"),
            message,
        },
        DomainError::UnknownGroup { .. } => invalid("group", message),
        DomainError::InvalidPosition { .. } => invalid("position", message),
        DomainError::EventMismatch { .. } => invalid("event_id", message),
        DomainError::NoGroupChanges => ApiError::DomainRuleViolation {
            rule: String::from("no_groups"),
            message,
        },
        DomainError::InvalidRegistration { .. } => invalid("registration", message),
        DomainError::DateParseError { .. } => invalid("date", message),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Store(store_err) => ApiError::Internal {
            message: store_err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows become `ResourceNotFound`; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event '{id}' does not exist"),
        },
        PersistenceError::RegistrationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Registration"),
            message: format!("Registration '{id}' does not exist"),
        },
        PersistenceError::AlreadyExists(msg) => ApiError::DomainRuleViolation {
            rule: String::from("unique_id"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
