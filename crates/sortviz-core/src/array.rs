#![forbid(unsafe_code)]

//! Array model with stable per-element identity.
//!
//! A [`Snapshot`] is the full ordering of an array at one point in a trace.
//! Slot index (array position) and element identity are kept apart: an
//! [`ElementId`] is handed out once when the array is built and then travels
//! with its value through every swap, shift and rotation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity token for one array element.
///
/// Assigned from the element's slot at build time and never reused within a
/// trace, independent of the element's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A value paired with its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    pub id: ElementId,
    pub value: i32,
}

/// Full copy of array state at one point in a trace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Snapshot {
    elements: Vec<Element>,
}

impl Snapshot {
    /// Build a snapshot from raw values, assigning ids `0..len`.
    #[must_use]
    pub fn from_values(values: &[i32]) -> Self {
        let elements = values
            .iter()
            .enumerate()
            .map(|(slot, &value)| Element {
                id: ElementId(slot as u32),
                value,
            })
            .collect();
        Self { elements }
    }

    /// Wrap an existing element ordering.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Element> {
        self.elements.get(slot)
    }

    /// Value at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of bounds. Generators only call this with
    /// indices they derived from the snapshot length.
    #[must_use]
    pub fn value(&self, slot: usize) -> i32 {
        self.elements[slot].value
    }

    /// Values in slot order.
    #[must_use]
    pub fn values(&self) -> Vec<i32> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Identities in slot order.
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id).collect()
    }

    /// Current slot of the element with identity `id`.
    #[must_use]
    pub fn position_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Whether values are in non-decreasing order.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.elements.windows(2).all(|w| w[0].value <= w[1].value)
    }

    /// Whether `other` holds exactly the same elements (ids and values),
    /// possibly in a different order.
    #[must_use]
    pub fn is_permutation_of(&self, other: &Snapshot) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut a = self.elements.clone();
        let mut b = other.elements.clone();
        a.sort_by_key(|e| e.id);
        b.sort_by_key(|e| e.id);
        a == b
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b);
    }

    /// Move the element at `from` to `to` (where `to <= from`), shifting the
    /// elements in between one slot to the right.
    pub(crate) fn rotate_into(&mut self, from: usize, to: usize) {
        self.elements[to..=from].rotate_right(1);
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e.value)?;
        }
        f.write_str("]")
    }
}
