// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.

pub mod audit;
pub mod events;
pub mod groups;
pub mod registrations;

pub use audit::insert_audit_event;
pub use events::upsert_event;
pub use groups::{PersistGroupSaveResult, persist_group_save};
pub use registrations::{insert_registration, update_registration};
