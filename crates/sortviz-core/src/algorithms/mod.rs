#![forbid(unsafe_code)]

//! Trace generators.
//!
//! Each generator takes its own copy of the input, runs the algorithm to
//! completion and returns the recorded [`Trace`]. Generators are pure and
//! deterministic; empty and single-element inputs produce empty traces.

pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::array::Snapshot;
use crate::step::{Action, Step, Trace};

/// Supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    Insertion,
    Selection,
    Quick,
    Merge,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Quick,
        Algorithm::Merge,
    ];

    /// Short machine name (`insertion`, `selection`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Selection => "selection",
            Self::Quick => "quick",
            Self::Merge => "merge",
        }
    }

    /// Page title for the visualization.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Insertion => "Insertion Sort Visualization",
            Self::Selection => "Selection Sort Visualization",
            Self::Quick => "Quick Sort Visualization",
            Self::Merge => "Merge Sort Visualization",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sorting algorithm `{0}` (expected insertion, selection, quick or merge)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts `quick`, `quick-sort`, `quick_sort` and `quicksort` forms,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        let stem = normalized.strip_suffix("sort").unwrap_or(&normalized);
        match stem {
            "insertion" => Ok(Self::Insertion),
            "selection" => Ok(Self::Selection),
            "quick" => Ok(Self::Quick),
            "merge" => Ok(Self::Merge),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Generate the trace for `algorithm` over `values`.
#[must_use]
pub fn generate(algorithm: Algorithm, values: &[i32]) -> Trace {
    generate_snapshot(algorithm, Snapshot::from_values(values))
}

/// Generate the trace for `algorithm` starting from an existing snapshot.
#[must_use]
pub fn generate_snapshot(algorithm: Algorithm, initial: Snapshot) -> Trace {
    let len = initial.len();
    let trace = match algorithm {
        Algorithm::Insertion => insertion::trace(initial),
        Algorithm::Selection => selection::trace(initial),
        Algorithm::Quick => quick::trace(initial),
        Algorithm::Merge => merge::trace(initial),
    };
    tracing::debug!(
        algorithm = algorithm.name(),
        len,
        steps = trace.len(),
        "trace generated"
    );
    trace
}

/// Working copy plus the steps recorded against it.
pub(crate) struct Recorder {
    pub(crate) work: Snapshot,
    steps: Vec<Step>,
}

impl Recorder {
    pub(crate) fn new(initial: &Snapshot) -> Self {
        Self {
            work: initial.clone(),
            steps: Vec::new(),
        }
    }

    /// Record `action` against the current working state.
    pub(crate) fn emit(&mut self, action: Action, narration: String) {
        self.steps.push(Step {
            snapshot: self.work.clone(),
            action,
            narration: Some(narration),
        });
    }

    pub(crate) fn value(&self, slot: usize) -> i32 {
        self.work.value(slot)
    }

    pub(crate) fn finish(self, algorithm: Algorithm, initial: Snapshot) -> Trace {
        Trace {
            algorithm,
            initial,
            steps: self.steps,
        }
    }
}
