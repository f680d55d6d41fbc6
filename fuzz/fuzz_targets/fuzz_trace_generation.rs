#![no_main]

use libfuzzer_sys::fuzz_target;
use sortviz_core::algorithms::{Algorithm, generate};

fuzz_target!(|values: Vec<i32>| {
    // Cap length to keep fuzzing fast.
    if values.len() > 64 {
        return;
    }

    for algorithm in Algorithm::ALL {
        let trace = generate(algorithm, &values);

        let mut expected = values.clone();
        expected.sort();
        assert_eq!(trace.final_snapshot().values(), expected, "{algorithm} left array unsorted");

        for step in &trace {
            assert!(
                step.snapshot.is_permutation_of(&trace.initial),
                "{algorithm} lost element identity at {}",
                step.action
            );
            for &slot in step.indices().as_slice() {
                assert!(slot < values.len(), "{algorithm} indexed slot {slot} out of range");
            }
        }

        if values.len() < 2 {
            assert!(trace.is_empty());
        }
    }
});
