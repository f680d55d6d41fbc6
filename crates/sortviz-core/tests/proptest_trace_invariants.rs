#![forbid(unsafe_code)]

//! Property tests for trace generator invariants.
//!
//! Validates:
//! - The final snapshot is a sorted permutation of the input.
//! - Every snapshot is a permutation of the initial elements (identity is
//!   never duplicated or lost).
//! - Replaying each step's mutation from the initial array reproduces the
//!   recorded snapshot sequence.
//! - Selection sort settles a minimal, ordered prefix.
//! - Quick sort settles pivots that partition the array.
//! - Generation is deterministic.

use proptest::prelude::*;

use sortviz_core::algorithms::{self, Algorithm};
use sortviz_core::{Action, InsertionAction, MergeAction, QuickAction, SelectionAction, Snapshot, Trace};

// ============================================================================
// Strategy helpers
// ============================================================================

fn array_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1i32..100, 0..=20)
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Insertion),
        Just(Algorithm::Selection),
        Just(Algorithm::Quick),
        Just(Algorithm::Merge),
    ]
}

/// Re-apply the mutation implied by `action` to `state`, independently of
/// the generators.
fn apply(state: &mut Vec<i32>, action: Action) {
    match action {
        Action::Insertion(InsertionAction::Shift { j, key }) => state.swap(j, key),
        Action::Insertion(_) => {}
        Action::Selection(SelectionAction::Swap { i, min }) => state.swap(i, min),
        Action::Selection(_) => {}
        Action::Quick(QuickAction::Swap { i, j }) => state.swap(i, j),
        Action::Quick(_) => {}
        Action::Merge(MergeAction::Insert { from, to }) => state[to..=from].rotate_right(1),
        Action::Merge(_) => {}
    }
}

fn sorted(values: &[i32]) -> Vec<i32> {
    let mut v = values.to_vec();
    v.sort_unstable();
    v
}

// ============================================================================
// Invariant 1: Final snapshot is a sorted permutation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn final_snapshot_is_sorted_permutation(
        algorithm in algorithm_strategy(),
        values in array_strategy()
    ) {
        let trace = algorithms::generate(algorithm, &values);
        let last = trace.final_snapshot();
        prop_assert!(last.is_sorted());
        prop_assert_eq!(last.values(), sorted(&values));
        prop_assert!(last.is_permutation_of(&Snapshot::from_values(&values)));
    }
}

// ============================================================================
// Invariant 2: Every snapshot preserves element identity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_snapshot_is_identity_permutation(
        algorithm in algorithm_strategy(),
        values in array_strategy()
    ) {
        let trace = algorithms::generate(algorithm, &values);
        for step in &trace {
            prop_assert!(step.snapshot.is_permutation_of(&trace.initial));
            prop_assert!(step.indices().len() <= 3);
            prop_assert!(step.indices().as_slice().iter().all(|&i| i < values.len()));
        }
    }
}

// ============================================================================
// Invariant 3: Replay reconstructs the recorded snapshots
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn replay_reconstructs_snapshots(
        algorithm in algorithm_strategy(),
        values in array_strategy()
    ) {
        let trace = algorithms::generate(algorithm, &values);
        let mut state = values.clone();
        for step in &trace {
            apply(&mut state, step.action);
            prop_assert_eq!(&state, &step.snapshot.values());
        }
    }

    #[test]
    fn generation_is_deterministic(
        algorithm in algorithm_strategy(),
        values in array_strategy()
    ) {
        let a: Trace = algorithms::generate(algorithm, &values);
        let b: Trace = algorithms::generate(algorithm, &values);
        prop_assert_eq!(a, b);
    }
}

// ============================================================================
// Invariant 4: Selection sort settles a minimal prefix
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn selection_settle_finalizes_prefix(values in array_strategy()) {
        let trace = algorithms::generate(Algorithm::Selection, &values);
        for step in &trace {
            if let Action::Selection(SelectionAction::Settle { i }) = step.action {
                let snap = step.snapshot.values();
                prop_assert!(snap[..=i].windows(2).all(|w| w[0] <= w[1]));
                for k in 0..=i {
                    for m in (i + 1)..snap.len() {
                        prop_assert!(snap[k] <= snap[m]);
                    }
                }
            }
        }
    }
}

// ============================================================================
// Invariant 5: Quick sort settles partitioning pivots
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn quick_settle_partitions(values in array_strategy()) {
        let trace = algorithms::generate(Algorithm::Quick, &values);
        // Everything left of an active range is already <= it, so the
        // partition holds across the whole array.
        for step in &trace {
            if let Action::Quick(QuickAction::Settle { pivot }) = step.action {
                let snap = step.snapshot.values();
                prop_assert!(snap[..pivot].iter().all(|v| *v <= snap[pivot]));
                prop_assert!(snap[pivot + 1..].iter().all(|v| *v >= snap[pivot]));
            }
        }
    }
}

// ============================================================================
// Invariant 6: Trivial arrays yield empty traces
// ============================================================================

proptest! {
    #[test]
    fn trivial_arrays_are_empty(
        algorithm in algorithm_strategy(),
        values in prop::collection::vec(any::<i32>(), 0..=1)
    ) {
        prop_assert!(algorithms::generate(algorithm, &values).is_empty());
    }
}
