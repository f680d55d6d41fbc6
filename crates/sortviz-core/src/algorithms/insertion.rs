#![forbid(unsafe_code)]

//! Insertion sort trace generator.
//!
//! For each outer slot `i` the key is lifted together with its left
//! neighbor, then walked left one exchange at a time while the neighbor is
//! larger. Every exchange is recorded as Compare, SwapHorizontal, Shift; the
//! array is mutated on Shift. The key's element travels with each exchange,
//! so its identity stays trackable.

use crate::algorithms::{Algorithm, Recorder};
use crate::array::Snapshot;
use crate::step::{Action, InsertionAction, Trace};

/// Generate the insertion sort trace for `values`.
#[must_use]
pub fn generate(values: &[i32]) -> Trace {
    trace(Snapshot::from_values(values))
}

/// Generate the insertion sort trace starting from `initial`.
#[must_use]
pub fn trace(initial: Snapshot) -> Trace {
    let mut rec = Recorder::new(&initial);

    for i in 1..initial.len() {
        let key = rec.value(i);
        let left = rec.value(i - 1);
        rec.emit(
            Action::Insertion(InsertionAction::MoveUp { j: i - 1, i }),
            format!("Compare {left} and {key}"),
        );

        // Slot currently holding the key.
        let mut slot = i;
        while slot > 0 && key < rec.value(slot - 1) {
            let j = slot - 1;
            let neighbor = rec.value(j);
            rec.emit(
                Action::Insertion(InsertionAction::Compare { j, key: slot }),
                format!("Comparing {neighbor} and {key}"),
            );
            rec.emit(
                Action::Insertion(InsertionAction::SwapHorizontal { j, key: slot }),
                format!("Swapping {neighbor} and {key}"),
            );
            rec.work.swap(j, slot);
            rec.emit(
                Action::Insertion(InsertionAction::Shift { j, key: slot }),
                format!("Shifting {neighbor} to the right"),
            );
            slot = j;
        }

        rec.emit(
            Action::Insertion(InsertionAction::Place { slot, i }),
            format!("Placing {key} in its correct position"),
        );
    }

    rec.finish(Algorithm::Insertion, initial)
}
