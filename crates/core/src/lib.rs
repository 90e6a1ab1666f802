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

mod apply;
mod cache;
mod command;
mod error;
mod messages;
mod ports;
mod reject;
mod selection;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, format_group};
pub use cache::RegistrationCache;
pub use command::Command;
pub use error::CoreError;
pub use messages::{MessageKind, PlannedMessage, plan_messages};
pub use ports::{ConfirmDialog, Notifier, RegistrationStore, StateProvider, StoreError};
pub use reject::{Notice, Severity, report_rejection};
pub use selection::{DropOutcome, EntrySelection};
pub use state::{ClassSelection, TransitionResult, all_event_groups, class_event_groups};
pub use store::{Store, Subscription};
