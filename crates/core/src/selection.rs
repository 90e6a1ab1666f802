// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The operator session that arranges one class's registrations.

use crate::cache::RegistrationCache;
use crate::error::CoreError;
use crate::ports::{ConfirmDialog, Notifier, RegistrationStore, StateProvider};
use crate::reject::{Notice, report_rejection};
use crate::state::ClassSelection;
use crate::store::Store;
use koekalenteri_domain::{
    DomainError, Event, EventState, GroupChange, MoveContext, MoveDecision, MoveIntent,
    Registration, Rejection, evaluate_move, move_to_group, move_to_position, move_to_reserve,
};
use tracing::{error, info};

/// What became of a move.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    NoOp,
    Rejected(Rejection),
    /// The operator dismissed the confirmation.
    Dismissed,
    /// The changes were saved.
    Saved(Vec<GroupChange>),
}

/// Arranges the registrations of one class of an event.
///
/// Accepted moves are applied to the cached registrations before they are
/// saved and rolled back if the save fails.
pub struct EntrySelection<S, P, C, N> {
    event: Event,
    class: Option<String>,
    store: S,
    states: P,
    confirm: C,
    notifier: N,
    cache: RegistrationCache,
    selected: Store<Option<String>>,
    unlock_arrange: Store<bool>,
}

impl<S, P, C, N> EntrySelection<S, P, C, N>
where
    S: RegistrationStore,
    P: StateProvider,
    C: ConfirmDialog,
    N: Notifier,
{
    /// Creates a session for a class, or for the whole event when `class` is `None`.
    #[must_use]
    pub fn new(
        event: Event,
        class: Option<&str>,
        store: S,
        states: P,
        confirm: C,
        notifier: N,
    ) -> Self {
        let cache: RegistrationCache = RegistrationCache::new(&event.id);
        Self {
            event,
            class: class.map(str::to_string),
            store,
            states,
            confirm,
            notifier,
            cache,
            selected: Store::default(),
            unlock_arrange: Store::new(false),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &RegistrationCache {
        &self.cache
    }

    /// The id of the most recently moved registration.
    #[must_use]
    pub const fn selected(&self) -> &Store<Option<String>> {
        &self.selected
    }

    /// Lets the operator rearrange reserve after reserve notifications.
    pub fn set_unlock_arrange(&self, unlock: bool) {
        info!(event_id = %self.event.id, unlock, "Reserve arrange override changed");
        self.unlock_arrange.set(unlock);
    }

    fn state(&self) -> EventState {
        self.states
            .class_state(&self.event.id, self.class.as_deref())
    }

    /// The current view of the class.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the registrations could not be loaded.
    pub async fn view(&self) -> Result<ClassSelection, CoreError> {
        let registrations: Vec<Registration> = self.cache.get_or_load(&self.store).await?;
        Ok(ClassSelection::build(
            &self.event,
            self.class.as_deref(),
            self.state(),
            &registrations,
            self.unlock_arrange.get(),
        ))
    }

    /// Handles a drag-and-drop of a registration onto a list.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if loading or saving failed. A failed save
    /// is rolled back in the cache and reported to the operator.
    pub async fn handle_drop(&self, intent: &MoveIntent) -> Result<DropOutcome, CoreError> {
        let view: ClassSelection = self.view().await?;
        let decision: MoveDecision = evaluate_move(&context(&self.event.id, &view), intent);
        self.resolve(decision, view.state, None).await
    }

    /// Appends a registration to a participant group.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DomainViolation` for unknown registrations or
    /// groups, and `CoreError::Store` if loading or saving failed.
    pub async fn move_to_group(
        &self,
        registration_id: &str,
        group_key: &str,
    ) -> Result<DropOutcome, CoreError> {
        let view: ClassSelection = self.view().await?;
        let decision: MoveDecision = self.menu_decision(move_to_group(
            &context(&self.event.id, &view),
            registration_id,
            group_key,
        ))?;
        self.resolve(decision, view.state, Some(group_key)).await
    }

    /// Places a registration at a 1-based position of its participant group.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DomainViolation` for unknown registrations or
    /// positions out of range, and `CoreError::Store` if loading or saving failed.
    pub async fn move_to_position(
        &self,
        registration_id: &str,
        position: usize,
    ) -> Result<DropOutcome, CoreError> {
        let view: ClassSelection = self.view().await?;
        let decision: MoveDecision = self.menu_decision(move_to_position(
            &context(&self.event.id, &view),
            registration_id,
            position,
        ))?;
        let label: String = format!("position {position}");
        self.resolve(decision, view.state, Some(&label)).await
    }

    /// Moves a registration to the end of reserve.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DomainViolation` for unknown registrations and
    /// `CoreError::Store` if loading or saving failed.
    pub async fn move_to_reserve(&self, registration_id: &str) -> Result<DropOutcome, CoreError> {
        let view: ClassSelection = self.view().await?;
        let decision: MoveDecision =
            self.menu_decision(move_to_reserve(&context(&self.event.id, &view), registration_id))?;
        self.resolve(decision, view.state, Some("reserve")).await
    }

    fn menu_decision(
        &self,
        result: Result<MoveDecision, DomainError>,
    ) -> Result<MoveDecision, CoreError> {
        result.map_err(|err| {
            self.notifier.notify(Notice::error(err.to_string()));
            CoreError::DomainViolation(err)
        })
    }

    async fn resolve(
        &self,
        decision: MoveDecision,
        state: EventState,
        destination: Option<&str>,
    ) -> Result<DropOutcome, CoreError> {
        let changes: Vec<GroupChange> = match decision {
            MoveDecision::NoOp => return Ok(DropOutcome::NoOp),
            MoveDecision::Rejected(rejection) => {
                if let Some(notice) = report_rejection(&rejection, state) {
                    self.notifier.notify(notice);
                }
                return Ok(DropOutcome::Rejected(rejection));
            }
            MoveDecision::NeedsConfirmation { request, changes } => {
                if !self.confirm.confirm(&request).await {
                    info!(event_id = %self.event.id, "Move dismissed by operator");
                    return Ok(DropOutcome::Dismissed);
                }
                changes
            }
            MoveDecision::Accepted { changes } => changes,
        };

        self.commit(changes, destination).await
    }

    async fn commit(
        &self,
        changes: Vec<GroupChange>,
        destination: Option<&str>,
    ) -> Result<DropOutcome, CoreError> {
        let moved: Option<Registration> = changes.first().and_then(|c| {
            self.cache
                .store()
                .get()
                .into_iter()
                .find(|r| r.id == c.id)
        });
        self.selected.set(changes.first().map(|c| c.id.clone()));

        let previous: Vec<Registration> = self.cache.apply_changes(&changes);
        match self.store.save_groups(&self.event.id, &changes).await {
            Ok(saved) => {
                info!(
                    event_id = %self.event.id,
                    changes = changes.len(),
                    "Group changes saved"
                );
                self.cache.replace(saved);
                if let (Some(reg), Some(destination)) = (moved, destination) {
                    self.notifier.notify(Notice::success(format!(
                        "Dog {} moved to {destination}",
                        reg.dog_name
                    )));
                }
                Ok(DropOutcome::Saved(changes))
            }
            Err(err) => {
                error!(event_id = %self.event.id, error = %err, "Saving group changes failed");
                self.cache.replace(previous);
                self.notifier.notify(Notice::error(err.to_string()));
                Err(CoreError::Store(err))
            }
        }
    }
}

fn context<'a>(event_id: &'a str, view: &'a ClassSelection) -> MoveContext<'a> {
    MoveContext {
        event_id,
        lists: &view.lists,
        event_groups: &view.event_groups,
        state: view.state,
        can_arrange_reserve: view.can_arrange_reserve,
    }
}
