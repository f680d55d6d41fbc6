#![forbid(unsafe_code)]

//! Per-slot highlight roles for the current replay position.
//!
//! Each slot gets at most one [`Role`]. Settled slots are marked first and
//! the current action's roles are laid over them. Highlights name both the
//! slot and the element identity sitting in it, so a renderer can animate
//! boxes by identity rather than by value.

use serde::{Deserialize, Serialize};
use sortviz_core::{
    Action, ElementId, InsertionAction, MergeAction, QuickAction, SelectionAction, Snapshot, Step,
};

/// What a highlighted slot is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Raised for comparison (insertion sort).
    Lifted,
    Comparing,
    Swapping,
    Shifting,
    Placed,
    Pivot,
    /// Smallest value seen so far in the current scan.
    MinSoFar,
    /// Final for the rest of the run.
    Settled,
    /// Part of a range being split.
    Splitting,
    /// Part of a freshly merged run.
    Merged,
    /// The whole array once sorting has finished.
    Sorted,
}

/// One highlighted slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub slot: usize,
    pub element: ElementId,
    pub role: Role,
}

/// Highlights after `revealed` steps, displayed over `snapshot`.
#[must_use]
pub fn annotate(snapshot: &Snapshot, revealed: &[Step]) -> Vec<Highlight> {
    let mut roles: Vec<Option<Role>> = vec![None; snapshot.len()];

    for step in revealed {
        match step.action {
            Action::Selection(SelectionAction::Settle { i }) => {
                fill(&mut roles, 0..=i, Role::Settled);
            }
            Action::Quick(QuickAction::Settle { pivot }) => {
                set(&mut roles, pivot, Role::Settled);
            }
            _ => {}
        }
    }

    if let Some(current) = revealed.last() {
        apply_action(&mut roles, current.action);
    }

    collect(snapshot, &roles)
}

/// Every slot marked [`Role::Sorted`].
#[must_use]
pub fn annotate_finished(snapshot: &Snapshot) -> Vec<Highlight> {
    let roles = vec![Some(Role::Sorted); snapshot.len()];
    collect(snapshot, &roles)
}

fn apply_action(roles: &mut [Option<Role>], action: Action) {
    match action {
        Action::Insertion(a) => match a {
            InsertionAction::MoveUp { j, i } => {
                set(roles, j, Role::Lifted);
                set(roles, i, Role::Lifted);
            }
            InsertionAction::Compare { j, key } => {
                set(roles, j, Role::Comparing);
                set(roles, key, Role::Comparing);
            }
            InsertionAction::SwapHorizontal { j, key } => {
                set(roles, j, Role::Swapping);
                set(roles, key, Role::Swapping);
            }
            InsertionAction::Shift { j, key } => {
                set(roles, j, Role::Shifting);
                set(roles, key, Role::Shifting);
            }
            InsertionAction::Place { slot, .. } => set(roles, slot, Role::Placed),
        },
        Action::Selection(a) => match a {
            SelectionAction::Compare { i, j, min } => {
                set(roles, i, Role::Comparing);
                set(roles, j, Role::Comparing);
                set(roles, min, Role::MinSoFar);
            }
            SelectionAction::Swap { i, min } => {
                set(roles, i, Role::Swapping);
                set(roles, min, Role::Swapping);
            }
            SelectionAction::Settle { .. } => {}
        },
        Action::Quick(a) => match a {
            QuickAction::Pivot { high } => set(roles, high, Role::Pivot),
            QuickAction::Compare { j, high } => {
                set(roles, j, Role::Comparing);
                set(roles, high, Role::Pivot);
            }
            QuickAction::Swap { i, j } => {
                set(roles, i, Role::Swapping);
                set(roles, j, Role::Swapping);
            }
            QuickAction::Settle { .. } => {}
        },
        Action::Merge(a) => match a {
            MergeAction::Split { low, high, .. } => fill(roles, low..=high, Role::Splitting),
            MergeAction::Compare { left, right } => {
                set(roles, left, Role::Comparing);
                set(roles, right, Role::Comparing);
            }
            MergeAction::Insert { to, .. } => set(roles, to, Role::Placed),
            MergeAction::Merged { low, high } => fill(roles, low..=high, Role::Merged),
        },
    }
}

fn set(roles: &mut [Option<Role>], slot: usize, role: Role) {
    if let Some(r) = roles.get_mut(slot) {
        *r = Some(role);
    }
}

fn fill(roles: &mut [Option<Role>], slots: std::ops::RangeInclusive<usize>, role: Role) {
    for slot in slots {
        set(roles, slot, role);
    }
}

fn collect(snapshot: &Snapshot, roles: &[Option<Role>]) -> Vec<Highlight> {
    snapshot
        .elements()
        .iter()
        .zip(roles)
        .enumerate()
        .filter_map(|(slot, (element, role))| {
            role.map(|role| Highlight {
                slot,
                element: element.id,
                role,
            })
        })
        .collect()
}
