// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.

pub mod audit;
pub mod events;
pub mod registrations;

pub use audit::get_audit_trail;
pub use events::{event_exists, get_event};
pub use registrations::{get_registration, list_registrations};
