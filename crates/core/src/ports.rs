// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborators of the selection session.

use crate::reject::Notice;
use koekalenteri_domain::{ConfirmationRequest, EventState, GroupChange, Registration};
use std::future::Future;
use thiserror::Error;

/// A failure reported by the registration store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Registration store error: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Loads registrations and persists group changes.
pub trait RegistrationStore: Send + Sync {
    /// Loads every registration of an event.
    fn load(&self, event_id: &str) -> impl Future<Output = Result<Vec<Registration>, StoreError>> + Send;

    /// Saves group changes, returning the event's registrations as stored.
    fn save_groups(
        &self,
        event_id: &str,
        changes: &[GroupChange],
    ) -> impl Future<Output = Result<Vec<Registration>, StoreError>> + Send;
}

/// Supplies the lifecycle state of an event class.
pub trait StateProvider: Send + Sync {
    fn class_state(&self, event_id: &str, class: Option<&str>) -> EventState;
}

/// Asks the operator to confirm a move.
pub trait ConfirmDialog: Send + Sync {
    /// Resolves to `true` when confirmed and `false` when dismissed.
    fn confirm(&self, request: &ConfirmationRequest) -> impl Future<Output = bool> + Send;
}

/// Shows notices to the operator.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
