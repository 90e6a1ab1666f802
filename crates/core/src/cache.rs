// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ports::{RegistrationStore, StoreError};
use crate::store::Store;
use koekalenteri_domain::{GroupChange, Registration, apply_patch};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// The registrations of one event, loaded on demand.
///
/// The cache starts empty. `invalidate` forces the next read to reload.
pub struct RegistrationCache {
    event_id: String,
    registrations: Store<Vec<Registration>>,
    loaded: AtomicBool,
}

impl RegistrationCache {
    #[must_use]
    pub fn new(event_id: &str) -> Self {
        Self {
            event_id: event_id.to_string(),
            registrations: Store::default(),
            loaded: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// The underlying store, for subscribing to changes.
    #[must_use]
    pub const fn store(&self) -> &Store<Vec<Registration>> {
        &self.registrations
    }

    /// The cached registrations, or `None` if nothing is loaded.
    #[must_use]
    pub fn get(&self) -> Option<Vec<Registration>> {
        self.is_loaded().then(|| self.registrations.get())
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Marks the cached registrations stale.
    pub fn invalidate(&self) {
        debug!(event_id = %self.event_id, "Registration cache invalidated");
        self.loaded.store(false, Ordering::Release);
    }

    /// Reloads the registrations from the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the cache keeps its previous contents.
    pub async fn refresh<S: RegistrationStore>(
        &self,
        store: &S,
    ) -> Result<Vec<Registration>, StoreError> {
        let registrations: Vec<Registration> = store.load(&self.event_id).await?;
        debug!(event_id = %self.event_id, count = registrations.len(), "Registration cache refreshed");
        self.replace(registrations.clone());
        Ok(registrations)
    }

    /// Returns the cached registrations, loading them first if needed.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a load was needed and failed.
    pub async fn get_or_load<S: RegistrationStore>(
        &self,
        store: &S,
    ) -> Result<Vec<Registration>, StoreError> {
        match self.get() {
            Some(registrations) => Ok(registrations),
            None => self.refresh(store).await,
        }
    }

    /// Replaces the cached registrations and marks them loaded.
    pub fn replace(&self, registrations: Vec<Registration>) {
        self.registrations.set(registrations);
        self.loaded.store(true, Ordering::Release);
    }

    /// Applies group changes to the cached registrations, returning the
    /// previous contents for rollback.
    pub fn apply_changes(&self, changes: &[GroupChange]) -> Vec<Registration> {
        let previous: Vec<Registration> = self.registrations.get();
        self.registrations.update(|registrations| {
            for change in changes {
                if let Some(reg) = registrations.iter_mut().find(|r| r.id == change.id) {
                    *reg = apply_patch(reg, &change.to_patch());
                }
            }
        });
        previous
    }
}
