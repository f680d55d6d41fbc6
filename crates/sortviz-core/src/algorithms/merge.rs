#![forbid(unsafe_code)]

//! Merge sort trace generator.
//!
//! Top-down and stable. Runs are merged in place: when the head of the right
//! run is smaller, it is rotated into the head of the left run, so every
//! snapshot stays a permutation of the input and no element is ever copied.

use crate::algorithms::{Algorithm, Recorder};
use crate::array::Snapshot;
use crate::step::{Action, MergeAction, Trace};

/// Generate the merge sort trace for `values`.
#[must_use]
pub fn generate(values: &[i32]) -> Trace {
    trace(Snapshot::from_values(values))
}

/// Generate the merge sort trace starting from `initial`.
#[must_use]
pub fn trace(initial: Snapshot) -> Trace {
    let mut rec = Recorder::new(&initial);
    if initial.len() > 1 {
        sort_range(&mut rec, 0, initial.len() - 1);
    }
    rec.finish(Algorithm::Merge, initial)
}

fn sort_range(rec: &mut Recorder, low: usize, high: usize) {
    if high <= low {
        return;
    }
    let mid = low + (high - low) / 2;
    rec.emit(
        Action::Merge(MergeAction::Split { low, mid, high }),
        format!("Splitting slots {low}..{high} at {mid}"),
    );
    sort_range(rec, low, mid);
    sort_range(rec, mid + 1, high);
    merge(rec, low, mid, high);
}

fn merge(rec: &mut Recorder, low: usize, mid: usize, high: usize) {
    // The left run occupies `left..right`, the right run `right..=high`.
    let mut left = low;
    let mut right = mid + 1;
    while left < right && right <= high {
        let (a, b) = (rec.value(left), rec.value(right));
        rec.emit(
            Action::Merge(MergeAction::Compare { left, right }),
            format!("Comparing {a} and {b}"),
        );
        if b < a {
            rec.work.rotate_into(right, left);
            rec.emit(
                Action::Merge(MergeAction::Insert {
                    from: right,
                    to: left,
                }),
                format!("Moving {b} before {a}"),
            );
            right += 1;
        }
        left += 1;
    }
    rec.emit(
        Action::Merge(MergeAction::Merged { low, high }),
        format!("Merged slots {low}..{high}"),
    );
}
