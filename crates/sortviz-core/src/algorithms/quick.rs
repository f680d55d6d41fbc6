#![forbid(unsafe_code)]

//! Quick sort trace generator (Lomuto partition, last element as pivot).
//!
//! Partitions are visited depth-first, low side before high side, so the
//! trace interleaves nested partitions in recursive call order. Ranges of
//! length one or zero emit nothing.

use std::ops::Range;

use crate::algorithms::{Algorithm, Recorder};
use crate::array::Snapshot;
use crate::step::{Action, QuickAction, Trace};

/// Generate the quick sort trace for `values`.
#[must_use]
pub fn generate(values: &[i32]) -> Trace {
    trace(Snapshot::from_values(values))
}

/// Generate the quick sort trace starting from `initial`.
#[must_use]
pub fn trace(initial: Snapshot) -> Trace {
    let mut rec = Recorder::new(&initial);
    sort_range(&mut rec, 0..initial.len());
    rec.finish(Algorithm::Quick, initial)
}

fn sort_range(rec: &mut Recorder, range: Range<usize>) {
    if range.len() <= 1 {
        return;
    }
    let pivot = partition(rec, range.start, range.end - 1);
    sort_range(rec, range.start..pivot);
    sort_range(rec, pivot + 1..range.end);
}

/// Partition `low..=high` around the value at `high`; returns the pivot's
/// final slot.
fn partition(rec: &mut Recorder, low: usize, high: usize) -> usize {
    let pivot = rec.value(high);
    rec.emit(
        Action::Quick(QuickAction::Pivot { high }),
        format!("Choosing {pivot} as the pivot"),
    );

    // Next slot for an element smaller than the pivot.
    let mut boundary = low;
    for j in low..high {
        let value = rec.value(j);
        rec.emit(
            Action::Quick(QuickAction::Compare { j, high }),
            format!("Comparing {value} with pivot {pivot}"),
        );
        if value < pivot {
            if boundary != j {
                let displaced = rec.value(boundary);
                rec.work.swap(boundary, j);
                rec.emit(
                    Action::Quick(QuickAction::Swap { i: boundary, j }),
                    format!("Swapping {displaced} and {value}"),
                );
            }
            boundary += 1;
        }
    }

    if boundary != high {
        let displaced = rec.value(boundary);
        rec.work.swap(boundary, high);
        rec.emit(
            Action::Quick(QuickAction::Swap {
                i: boundary,
                j: high,
            }),
            format!("Swapping {displaced} and {pivot}"),
        );
    }
    rec.emit(
        Action::Quick(QuickAction::Settle { pivot: boundary }),
        format!("{pivot} is now in its correct position."),
    );
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_partition_for_two_elements() {
        let trace = generate(&[2, 1]);
        let actions: Vec<_> = trace.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                Action::Quick(QuickAction::Pivot { high: 1 }),
                Action::Quick(QuickAction::Compare { j: 0, high: 1 }),
                Action::Quick(QuickAction::Swap { i: 0, j: 1 }),
                Action::Quick(QuickAction::Settle { pivot: 0 }),
            ]
        );
        assert_eq!(trace.final_snapshot().values(), vec![1, 2]);
    }

    #[test]
    fn pivot_already_in_place_skips_final_swap() {
        let trace = generate(&[1, 2]);
        let kinds: Vec<_> = trace.iter().map(|s| s.action.kind()).collect();
        assert_eq!(kinds, vec!["pivot", "compare", "settle"]);
    }

    #[test]
    fn low_partition_is_visited_first() {
        // Pivot 4 lands in slot 3; [3, 1, 2] is sorted before [6, 5].
        let trace = generate(&[3, 6, 1, 5, 2, 4]);
        let pivots: Vec<_> = trace
            .iter()
            .filter_map(|s| match s.action {
                Action::Quick(QuickAction::Pivot { high }) => Some(high),
                _ => None,
            })
            .collect();
        assert_eq!(pivots[0], 5);
        assert_eq!(pivots[1], 2);
        assert_eq!(*pivots.last().unwrap(), 5);
        assert_eq!(trace.final_snapshot().values(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn settle_partitions_the_array() {
        let trace = generate(&[8, 3, 9, 1, 7, 7, 2]);
        for step in &trace {
            if let Action::Quick(QuickAction::Settle { pivot }) = step.action {
                let snap = step.snapshot.values();
                assert!(snap[..pivot].iter().all(|v| *v <= snap[pivot]));
                assert!(snap[pivot + 1..].iter().all(|v| *v >= snap[pivot]));
            }
        }
    }

    #[test]
    fn no_swap_for_element_already_at_boundary() {
        let trace = generate(&[1, 2, 3]);
        assert!(trace.iter().all(|s| s.action.kind() != "swap"));
    }
}
