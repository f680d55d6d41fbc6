#![forbid(unsafe_code)]

//! Step and trace types.
//!
//! Each algorithm has its own closed action vocabulary. [`Action`] unions
//! them so a replay layer can hold any trace while the presentation boundary
//! still matches exhaustively.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::array::Snapshot;

/// Up to three slot positions an action concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indices {
    buf: [usize; 3],
    len: u8,
}

impl Indices {
    pub const EMPTY: Self = Self {
        buf: [0; 3],
        len: 0,
    };

    #[must_use]
    pub fn one(a: usize) -> Self {
        Self {
            buf: [a, 0, 0],
            len: 1,
        }
    }

    #[must_use]
    pub fn two(a: usize, b: usize) -> Self {
        Self {
            buf: [a, b, 0],
            len: 2,
        }
    }

    #[must_use]
    pub fn three(a: usize, b: usize, c: usize) -> Self {
        Self {
            buf: [a, b, c],
            len: 3,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.buf[..self.len as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn contains(&self, slot: usize) -> bool {
        self.as_slice().contains(&slot)
    }
}

/// Insertion sort vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum InsertionAction {
    /// Lift the key (slot `i`) and its left neighbor (slot `j`).
    MoveUp { j: usize, i: usize },
    /// Pause on the raised pair while comparing.
    Compare { j: usize, key: usize },
    /// The key is smaller than its neighbor; the pair will exchange.
    SwapHorizontal { j: usize, key: usize },
    /// The neighbor has moved one slot right.
    Shift { j: usize, key: usize },
    /// The key is committed to `slot` for outer pass `i`.
    Place { slot: usize, i: usize },
}

/// Selection sort vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SelectionAction {
    /// Outer slot `i` scanning `j`; `min` is the smallest slot seen before `j`.
    Compare { i: usize, j: usize, min: usize },
    Swap { i: usize, min: usize },
    /// Slots `0..=i` are final.
    Settle { i: usize },
}

/// Quick sort (Lomuto) vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum QuickAction {
    Pivot { high: usize },
    Compare { j: usize, high: usize },
    Swap { i: usize, j: usize },
    Settle { pivot: usize },
}

/// Merge sort vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum MergeAction {
    /// Range `low..=high` splits into `low..=mid` and `mid+1..=high`.
    Split { low: usize, mid: usize, high: usize },
    /// Heads of the left and right runs are compared.
    Compare { left: usize, right: usize },
    /// The right head moved from `from` into `to`; slots `to..from` shifted right.
    Insert { from: usize, to: usize },
    Merged { low: usize, high: usize },
}

/// Any algorithm's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    Insertion(InsertionAction),
    Selection(SelectionAction),
    Quick(QuickAction),
    Merge(MergeAction),
}

impl Action {
    /// Slot positions this action concerns, in vocabulary order.
    #[must_use]
    pub fn indices(&self) -> Indices {
        match *self {
            Self::Insertion(a) => match a {
                InsertionAction::MoveUp { j, i } => Indices::two(j, i),
                InsertionAction::Compare { j, key }
                | InsertionAction::SwapHorizontal { j, key }
                | InsertionAction::Shift { j, key } => Indices::two(j, key),
                InsertionAction::Place { slot, i } => Indices::two(slot, i),
            },
            Self::Selection(a) => match a {
                SelectionAction::Compare { i, j, min } => Indices::three(i, j, min),
                SelectionAction::Swap { i, min } => Indices::two(i, min),
                SelectionAction::Settle { i } => Indices::one(i),
            },
            Self::Quick(a) => match a {
                QuickAction::Pivot { high } => Indices::one(high),
                QuickAction::Compare { j, high } => Indices::two(j, high),
                QuickAction::Swap { i, j } => Indices::two(i, j),
                QuickAction::Settle { pivot } => Indices::one(pivot),
            },
            Self::Merge(a) => match a {
                MergeAction::Split { low, mid, high } => Indices::three(low, mid, high),
                MergeAction::Compare { left, right } => Indices::two(left, right),
                MergeAction::Insert { from, to } => Indices::two(from, to),
                MergeAction::Merged { low, high } => Indices::two(low, high),
            },
        }
    }

    /// Stable snake_case name of the action variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insertion(a) => match a {
                InsertionAction::MoveUp { .. } => "move_up",
                InsertionAction::Compare { .. } => "compare",
                InsertionAction::SwapHorizontal { .. } => "swap_horizontal",
                InsertionAction::Shift { .. } => "shift",
                InsertionAction::Place { .. } => "place",
            },
            Self::Selection(a) => match a {
                SelectionAction::Compare { .. } => "compare",
                SelectionAction::Swap { .. } => "swap",
                SelectionAction::Settle { .. } => "settle",
            },
            Self::Quick(a) => match a {
                QuickAction::Pivot { .. } => "pivot",
                QuickAction::Compare { .. } => "compare",
                QuickAction::Swap { .. } => "swap",
                QuickAction::Settle { .. } => "settle",
            },
            Self::Merge(a) => match a {
                MergeAction::Split { .. } => "split",
                MergeAction::Compare { .. } => "compare",
                MergeAction::Insert { .. } => "insert",
                MergeAction::Merged { .. } => "merged",
            },
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Insertion(_) => Algorithm::Insertion,
            Self::Selection(_) => Algorithm::Selection,
            Self::Quick(_) => Algorithm::Quick,
            Self::Merge(_) => Algorithm::Merge,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.kind(), self.indices().as_slice())
    }
}

/// One recorded primitive operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// Array ordering after this step's mutation (if any).
    pub snapshot: Snapshot,
    pub action: Action,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub narration: Option<String>,
}

impl Step {
    #[must_use]
    pub fn indices(&self) -> Indices {
        self.action.indices()
    }
}

/// Fully materialized step sequence for one algorithm run.
///
/// # Invariants
///
/// 1. `steps` is finite and never extended after generation.
/// 2. Every step's snapshot is a permutation of `initial`.
/// 3. `final_snapshot()` is sorted in non-decreasing order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trace {
    pub algorithm: Algorithm,
    pub initial: Snapshot,
    pub steps: Vec<Step>,
}

impl Trace {
    /// A trace with no steps over `initial`.
    #[must_use]
    pub fn empty(algorithm: Algorithm, initial: Snapshot) -> Self {
        Self {
            algorithm,
            initial,
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Array state once `cursor` steps have been revealed.
    ///
    /// `cursor == 0` is the initial array; cursors past the end clamp to the
    /// final snapshot.
    #[must_use]
    pub fn snapshot_at(&self, cursor: usize) -> &Snapshot {
        match cursor.min(self.steps.len()) {
            0 => &self.initial,
            n => &self.steps[n - 1].snapshot,
        }
    }

    #[must_use]
    pub fn final_snapshot(&self) -> &Snapshot {
        self.snapshot_at(self.steps.len())
    }

    /// Drop narration from every step.
    #[must_use]
    pub fn strip_narration(mut self) -> Self {
        for step in &mut self.steps {
            step.narration = None;
        }
        self
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
