#![forbid(unsafe_code)]

//! Terminal front end for SortViz.
//!
//! `sortviz run` replays one session and prints a read model per transition,
//! `sortviz trace` dumps a whole trace as JSONL and `sortviz list` names the
//! algorithms.

pub mod cli;
pub mod error;
pub mod render;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{CliError, Result};
