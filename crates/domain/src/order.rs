// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fractional order numbers for drag-and-drop reordering.
//!
//! A moved registration receives a number half way between its new
//! neighbours, so a reorder touches exactly one row. The authoritative save
//! later renumbers every list to consecutive integers.

use crate::types::Registration;
use serde::{Deserialize, Serialize};

/// Which half of the hovered row the dragged row is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverPosition {
    Before,
    #[default]
    After,
}

impl HoverPosition {
    const fn offset(self) -> f64 {
        match self {
            Self::Before => -0.5,
            Self::After => 0.5,
        }
    }
}

/// Resolves the hover position of a dragged row.
///
/// Within one list, hovering the row directly below the dragged row always
/// means "after" and the row directly above always means "before", so the
/// drop never lands back in the dragged row's own slot. Elsewhere the half of
/// the row under the pointer decides.
#[must_use]
pub const fn hover_position(
    same_list: bool,
    drag_index: usize,
    hover_index: usize,
    pointer_in_upper_half: bool,
) -> HoverPosition {
    if same_list && drag_index + 1 == hover_index {
        return HoverPosition::After;
    }
    if same_list && hover_index + 1 == drag_index {
        return HoverPosition::Before;
    }
    if pointer_in_upper_half {
        HoverPosition::Before
    } else {
        HoverPosition::After
    }
}

/// Computes the order number of a registration dropped within its own list.
///
/// # Arguments
///
/// * `regs` - The destination list without the moving registration
/// * `target_index` - Index of the hovered row in the full list
/// * `moving_from_index` - Index of the moving registration in the full list
/// * `hover` - Whether the drop is before or after the hovered row
#[must_use]
pub fn reorder_number(
    regs: &[&Registration],
    target_index: usize,
    moving_from_index: usize,
    hover: HoverPosition,
) -> f64 {
    // Removing the moving row shifts every later index down by one.
    let pos: Option<usize> = if moving_from_index < target_index {
        target_index.checked_sub(1)
    } else {
        Some(target_index)
    };

    let base: f64 = match pos.and_then(|p| regs.get(p)).and_then(|r| r.number()) {
        Some(number) => number,
        // Dropped past the last row.
        None if hover == HoverPosition::After => regs
            .last()
            .map_or(0.0, |last| last.number().unwrap_or(0.0) + 1.0),
        None => 0.0,
    };

    base + hover.offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{create_test_registration, with_group};

    fn numbered(count: usize) -> Vec<Registration> {
        (1..=count)
            .map(|n| {
                let number: f64 = f64::from(u32::try_from(n).unwrap_or(u32::MAX));
                with_group(create_test_registration(&format!("r{n}"), &[]), "g", number)
            })
            .collect()
    }

    fn others(regs: &[Registration], moving: usize) -> Vec<&Registration> {
        regs.iter()
            .enumerate()
            .filter(|(i, _)| *i != moving)
            .map(|(_, r)| r)
            .collect()
    }

    /// Index the moved row ends up at after re-sorting with the new number.
    fn landing_index(regs: &[Registration], moving: usize, number: f64) -> usize {
        let mut numbers: Vec<(f64, bool)> = regs
            .iter()
            .enumerate()
            .map(|(i, r)| {
                if i == moving {
                    (number, true)
                } else {
                    (r.number().unwrap_or(0.0), false)
                }
            })
            .collect();
        numbers.sort_by(|a, b| a.0.total_cmp(&b.0));
        numbers.iter().position(|(_, moved)| *moved).unwrap_or(usize::MAX)
    }

    fn assert_number(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < f64::EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_moving_up() {
        let regs: Vec<Registration> = numbered(3);
        assert_number(reorder_number(&others(&regs, 1), 0, 1, HoverPosition::Before), 0.5);
        assert_number(reorder_number(&others(&regs, 1), 0, 1, HoverPosition::After), 1.5);
        assert_number(reorder_number(&others(&regs, 2), 0, 2, HoverPosition::Before), 0.5);
        assert_number(reorder_number(&others(&regs, 2), 0, 2, HoverPosition::After), 1.5);
        assert_number(reorder_number(&others(&regs, 2), 1, 2, HoverPosition::Before), 1.5);
        assert_number(reorder_number(&others(&regs, 2), 1, 2, HoverPosition::After), 2.5);
    }

    #[test]
    fn test_moving_down() {
        let regs: Vec<Registration> = numbered(3);
        assert_number(reorder_number(&others(&regs, 0), 1, 0, HoverPosition::Before), 1.5);
        assert_number(reorder_number(&others(&regs, 0), 1, 0, HoverPosition::After), 2.5);
        assert_number(reorder_number(&others(&regs, 0), 2, 0, HoverPosition::Before), 2.5);
        assert_number(reorder_number(&others(&regs, 0), 2, 0, HoverPosition::After), 3.5);
        assert_number(reorder_number(&others(&regs, 1), 2, 1, HoverPosition::Before), 2.5);
        assert_number(reorder_number(&others(&regs, 1), 2, 1, HoverPosition::After), 3.5);
    }

    #[test]
    fn test_after_last_row_uses_last_number_plus_one() {
        let regs: Vec<Registration> = numbered(3);
        assert_number(reorder_number(&others(&regs, 1), 3, 1, HoverPosition::After), 4.5);
    }

    #[test]
    fn test_empty_destination() {
        assert_number(reorder_number(&[], 0, 0, HoverPosition::Before), -0.5);
        assert_number(reorder_number(&[], 0, 0, HoverPosition::After), 0.5);
    }

    #[test]
    fn test_drop_lands_next_to_hovered_row() {
        let regs: Vec<Registration> = numbered(5);
        for from in 0..regs.len() {
            for target in 0..regs.len() {
                if from == target {
                    continue;
                }
                for upper_half in [true, false] {
                    let hover: HoverPosition = hover_position(true, from, target, upper_half);
                    let number: f64 = reorder_number(&others(&regs, from), target, from, hover);
                    let landed: usize = landing_index(&regs, from, number);

                    // The hovered row keeps its relative place; the moved row
                    // sits directly before or after it.
                    let hovered_after_removal: usize = if from < target { target - 1 } else { target };
                    let expected: usize = match hover {
                        HoverPosition::Before => hovered_after_removal,
                        HoverPosition::After => hovered_after_removal + 1,
                    };
                    assert_eq!(landed, expected, "from {from} to {target} {hover:?}");
                }
            }
        }
    }

    #[test]
    fn test_adjacent_rows_force_hover_position() {
        assert_eq!(hover_position(true, 2, 3, true), HoverPosition::After);
        assert_eq!(hover_position(true, 3, 2, false), HoverPosition::Before);
        assert_eq!(hover_position(false, 2, 3, true), HoverPosition::Before);
        assert_eq!(hover_position(true, 0, 3, false), HoverPosition::After);
    }
}
