#![forbid(unsafe_code)]

//! Selection sort trace generator.

use crate::algorithms::{Algorithm, Recorder};
use crate::array::Snapshot;
use crate::step::{Action, SelectionAction, Trace};

/// Generate the selection sort trace for `values`.
#[must_use]
pub fn generate(values: &[i32]) -> Trace {
    trace(Snapshot::from_values(values))
}

/// Generate the selection sort trace starting from `initial`.
///
/// Every scanned slot gets a Compare step carrying the running minimum as it
/// stood before that slot was examined. After `Settle { i }` slots `0..=i`
/// hold the `i + 1` smallest values in order.
#[must_use]
pub fn trace(initial: Snapshot) -> Trace {
    let n = initial.len();
    if n < 2 {
        return Trace::empty(Algorithm::Selection, initial);
    }

    let mut rec = Recorder::new(&initial);
    for i in 0..n {
        let mut min = i;
        for j in (i + 1)..n {
            let (a, b, smallest) = (rec.value(i), rec.value(j), rec.value(min));
            rec.emit(
                Action::Selection(SelectionAction::Compare { i, j, min }),
                format!("Comparing {a} and {b}. Current smallest: {smallest}"),
            );
            if b < smallest {
                min = j;
            }
        }

        if min != i {
            rec.work.swap(i, min);
            let (a, b) = (rec.value(i), rec.value(min));
            rec.emit(
                Action::Selection(SelectionAction::Swap { i, min }),
                format!("Swapping {b} and {a}"),
            );
        }

        let settled = rec.value(i);
        rec.emit(
            Action::Selection(SelectionAction::Settle { i }),
            format!("{settled} is now in its correct position."),
        );
    }

    rec.finish(Algorithm::Selection, initial)
}
