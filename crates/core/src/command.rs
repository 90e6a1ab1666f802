// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use koekalenteri_domain::GroupChange;

/// A command represents operator intent as data only.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Save group reassignments of an event's registrations.
    SaveGroups {
        /// The event being modified.
        event_id: String,
        /// The reassignments; changes for other events are ignored.
        changes: Vec<GroupChange>,
    },
}
