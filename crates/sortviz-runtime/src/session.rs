#![forbid(unsafe_code)]

//! Replay session state machine.
//!
//! ```text
//!            start / restart (non-empty trace)
//!   ┌──────┐ ─────────────────────────────────► ┌─────────┐  stop   ┌────────┐
//!   │ Idle │                                    │ Running │ ──────► │ Paused │
//!   └──────┘ ◄───── back (from any state) ───── └─────────┘ ◄────── └────────┘
//!      │                                          │  tick past end     resume
//!      │ start (empty trace)                      ▼
//!      └──────────────────────────────────► ┌──────────┐
//!                                           │ Finished │ ── start / restart ──► Running
//!                                           └──────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `cursor <= trace.len()` after every transition.
//! 2. The visible array is always `trace.snapshot_at(cursor)`: the pre-sort
//!    array before any reveal, otherwise the last revealed step's snapshot.
//! 3. Start and restart replace the trace and cursor wholesale and bump
//!    `generation`; a stale cursor is never reused against a new trace.
//! 4. Ticks outside `Running` change nothing.
//! 5. Every step is revealed by a tick of its own; only the following tick
//!    moves the session to Finished.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sortviz_core::algorithms::{self, Algorithm};
use sortviz_core::{Snapshot, Step, Trace};

/// Narration shown before the first start.
pub const IDLE_NARRATION: &str = "Press start to begin the sorting visualization";
/// Narration shown once the trace is exhausted.
pub const FINISHED_NARRATION: &str = "Sorting completed!";

/// Replay status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    Running,
    Paused,
    Finished,
}

impl Status {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the working array comes from on restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Draw a fresh random array.
    #[default]
    Randomize,
    /// Re-sort the last submitted (or generated) array from scratch.
    ReuseSubmitted,
}

/// Unrecognized restart policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown restart policy `{0}` (expected randomize or reuse)")]
pub struct ParseRestartPolicyError(pub String);

impl FromStr for RestartPolicy {
    type Err = ParseRestartPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "randomize" | "random" => Ok(Self::Randomize),
            "reuse" | "reuse_submitted" | "reuse-submitted" => Ok(Self::ReuseSubmitted),
            _ => Err(ParseRestartPolicyError(s.to_string())),
        }
    }
}

/// Result of applying one control to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied { from: Status, to: Status },
    /// The control is not valid in the current status; nothing changed.
    Ignored {
        status: Status,
        reason: &'static str,
    },
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Per-(page, browsing session) replay state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySession {
    algorithm: Algorithm,
    /// Last submitted or generated array; `None` until one exists.
    original: Option<Vec<i32>>,
    trace: Trace,
    cursor: usize,
    status: Status,
    generation: u64,
    narration: bool,
}

impl ReplaySession {
    /// A fresh idle session with no array yet.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            original: None,
            trace: Trace::empty(algorithm, Snapshot::default()),
            cursor: 0,
            status: Status::Idle,
            generation: 0,
            narration: true,
        }
    }

    /// A fresh idle session over `values`.
    #[must_use]
    pub fn with_array(algorithm: Algorithm, values: Vec<i32>) -> Self {
        let mut session = Self::new(algorithm);
        session.trace = Trace::empty(algorithm, Snapshot::from_values(&values));
        session.original = Some(values);
        session
    }

    /// Keep or drop per-step narration in generated traces.
    #[must_use]
    pub fn with_narration(mut self, enabled: bool) -> Self {
        self.narration = enabled;
        self
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    #[must_use]
    pub fn original(&self) -> Option<&[i32]> {
        self.original.as_deref()
    }

    /// The array as currently displayed.
    #[must_use]
    pub fn current_snapshot(&self) -> &Snapshot {
        self.trace.snapshot_at(self.cursor)
    }

    /// The most recently revealed step, if any.
    #[must_use]
    pub fn last_revealed(&self) -> Option<&Step> {
        self.cursor.checked_sub(1).and_then(|i| self.trace.get(i))
    }

    /// Whether the external timer should be delivering ticks.
    #[must_use]
    pub fn wants_ticks(&self) -> bool {
        self.status == Status::Running
    }

    /// Narration text for the current state.
    #[must_use]
    pub fn narration(&self) -> String {
        match self.status {
            Status::Idle => IDLE_NARRATION.to_string(),
            Status::Finished => FINISHED_NARRATION.to_string(),
            Status::Running | Status::Paused => match self.last_revealed() {
                Some(step) => step
                    .narration
                    .clone()
                    .unwrap_or_else(|| step.action.to_string()),
                None => format!(
                    "Starting {} sort on {} elements",
                    self.algorithm,
                    self.trace.initial.len()
                ),
            },
        }
    }

    // ====================================================================
    // Transitions
    // ====================================================================

    /// Generate a trace from the working array and begin replaying it.
    ///
    /// Valid from Idle or Finished. When no array has been established yet,
    /// `fresh` supplies one.
    pub fn start(&mut self, fresh: impl FnOnce() -> Vec<i32>) -> Transition {
        if !matches!(self.status, Status::Idle | Status::Finished) {
            return self.ignore("start is only valid from idle or finished");
        }
        let values = match self.original.take() {
            Some(values) => values,
            None => {
                tracing::debug!(algorithm = %self.algorithm, "no array established, drawing one");
                fresh()
            }
        };
        self.load(values)
    }

    /// Replace the working array according to `policy` and replay from the
    /// beginning. Valid from any status.
    pub fn restart(
        &mut self,
        policy: RestartPolicy,
        fresh: impl FnOnce() -> Vec<i32>,
    ) -> Transition {
        let values = match (policy, self.original.take()) {
            (RestartPolicy::ReuseSubmitted, Some(values)) => values,
            _ => fresh(),
        };
        self.load(values)
    }

    /// Reveal the next step. Only advances while Running.
    ///
    /// The last step stays on display for one full tick; the tick after it
    /// finishes the replay.
    pub fn tick(&mut self) -> Transition {
        if self.status != Status::Running {
            return self.ignore("tick outside running");
        }
        if self.cursor < self.trace.len() {
            self.cursor += 1;
            return Transition::Applied {
                from: Status::Running,
                to: Status::Running,
            };
        }
        self.set_status(Status::Finished)
    }

    /// Pause without losing the cursor.
    pub fn stop(&mut self) -> Transition {
        if self.status != Status::Running {
            return self.ignore("stop is only valid while running");
        }
        self.set_status(Status::Paused)
    }

    /// Continue a paused replay.
    pub fn resume(&mut self) -> Transition {
        if self.status != Status::Paused {
            return self.ignore("resume is only valid while paused");
        }
        self.set_status(Status::Running)
    }

    /// Leave the page: clear the trace and return to Idle, keeping the array.
    pub fn back(&mut self) -> Transition {
        let initial = self
            .original
            .as_deref()
            .map(Snapshot::from_values)
            .unwrap_or_default();
        self.trace = Trace::empty(self.algorithm, initial);
        self.cursor = 0;
        self.set_status(Status::Idle)
    }

    /// Move the cursor to `cursor` (clamped) and pause there.
    ///
    /// Jumping to the end finishes the replay. Ignored while Idle.
    pub fn jump_to(&mut self, cursor: usize) -> Transition {
        if self.status == Status::Idle {
            return self.ignore("nothing to jump within before start");
        }
        self.cursor = cursor.min(self.trace.len());
        let to = if self.cursor == self.trace.len() {
            Status::Finished
        } else {
            Status::Paused
        };
        self.set_status(to)
    }

    /// Replace the working array with `values` and return to Idle.
    pub fn submit(&mut self, values: Vec<i32>) -> Transition {
        self.trace = Trace::empty(self.algorithm, Snapshot::from_values(&values));
        self.original = Some(values);
        self.cursor = 0;
        self.set_status(Status::Idle)
    }

    fn load(&mut self, values: Vec<i32>) -> Transition {
        let from = self.status;
        let mut trace = algorithms::generate(self.algorithm, &values);
        if !self.narration {
            trace = trace.strip_narration();
        }
        self.trace = trace;
        self.original = Some(values);
        self.cursor = 0;
        self.generation += 1;
        self.status = if self.trace.is_empty() {
            Status::Finished
        } else {
            Status::Running
        };
        Transition::Applied {
            from,
            to: self.status,
        }
    }

    fn set_status(&mut self, to: Status) -> Transition {
        let from = self.status;
        self.status = to;
        Transition::Applied { from, to }
    }

    fn ignore(&self, reason: &'static str) -> Transition {
        tracing::debug!(status = %self.status, reason, "control ignored");
        Transition::Ignored {
            status: self.status,
            reason,
        }
    }
}
