#![forbid(unsafe_code)]

//! Replay runtime for SortViz.
//!
//! A [`ReplaySession`] holds one algorithm page's working array, its fully
//! materialized trace and a cursor into it. An external timer ticks the
//! session one step at a time; every transition produces a [`ReadModel`]
//! that a presentation layer renders.
//!
//! # Pieces
//!
//! - [`session`]: the Idle / Running / Paused / Finished state machine
//! - [`annotation`]: per-slot highlight roles derived from the current step
//! - [`store`]: session storage keyed by (browsing session, algorithm)
//! - [`timer`]: manual and interval tick sources
//! - [`controller`]: glues store, timer and session together per control event
//! - [`config`]: TOML/JSON loadable replay settings
//! - [`diagnostics`]: bounded JSONL transition log

pub mod annotation;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod read_model;
pub mod session;
pub mod store;
pub mod timer;

pub use annotation::{Highlight, Role};
pub use config::{ConfigError, ReplayConfig};
pub use controller::{Control, ReplayController};
pub use diagnostics::{DiagnosticEntry, DiagnosticLog};
pub use read_model::ReadModel;
pub use session::{ReplaySession, RestartPolicy, Status, Transition};
pub use store::{MemorySessionStore, SessionKey, SessionStore};
pub use timer::{IntervalTimer, ManualTimer, Tick, TimerSource};
