#![forbid(unsafe_code)]

//! Step generation for the SortViz replay engine.
//!
//! A sorting algorithm is run once, eagerly, over a private copy of the input
//! while every primitive operation is recorded as a [`Step`]. The resulting
//! [`Trace`] is finite and indexable, so a replay layer can reveal it one
//! step at a time, jump anywhere, or start over without re-running anything.
//!
//! # Element identity
//!
//! Every value is wrapped in an [`Element`] carrying a stable [`ElementId`]
//! assigned when the array is built. Snapshots are permutations of the same
//! elements, so two equal values are never confused when boxes move.
//!
//! # Example
//!
//! ```
//! use sortviz_core::{Algorithm, algorithms};
//!
//! let trace = algorithms::generate(Algorithm::Selection, &[5, 3, 8, 1]);
//! assert_eq!(trace.final_snapshot().values(), vec![1, 3, 5, 8]);
//! ```

pub mod algorithms;
pub mod array;
pub mod input;
pub mod step;

pub use algorithms::Algorithm;
pub use array::{Element, ElementId, Snapshot};
pub use input::{ArrayLimits, InputError, RandomArraySpec};
pub use step::{
    Action, Indices, InsertionAction, MergeAction, QuickAction, SelectionAction, Step, Trace,
};
