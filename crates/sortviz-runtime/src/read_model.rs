#![forbid(unsafe_code)]

//! Presentation-facing view of a replay session.

use serde::Serialize;
use sortviz_core::{Action, Algorithm, Snapshot};

use crate::annotation::{self, Highlight};
use crate::session::{ReplaySession, Status};

/// Everything a renderer needs for one transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadModel {
    pub algorithm: Algorithm,
    pub status: Status,
    pub snapshot: Snapshot,
    /// Slots the current action concerns.
    pub indices: Vec<usize>,
    pub highlights: Vec<Highlight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    pub narration: String,
    pub timer_active: bool,
    pub cursor: usize,
    pub total_steps: usize,
    pub generation: u64,
}

impl ReadModel {
    /// Project `session` into a read model.
    ///
    /// Idle and finished sessions carry no current action.
    #[must_use]
    pub fn from_session(session: &ReplaySession) -> Self {
        let snapshot = session.current_snapshot().clone();
        let status = session.status();
        let (action, highlights) = match status {
            Status::Idle => (None, Vec::new()),
            Status::Finished => (None, annotation::annotate_finished(&snapshot)),
            Status::Running | Status::Paused => {
                let revealed = &session.trace().steps[..session.cursor()];
                (
                    session.last_revealed().map(|s| s.action),
                    annotation::annotate(&snapshot, revealed),
                )
            }
        };
        let indices = action
            .map(|a| a.indices().as_slice().to_vec())
            .unwrap_or_default();

        Self {
            algorithm: session.algorithm(),
            status,
            snapshot,
            indices,
            highlights,
            action,
            narration: session.narration(),
            timer_active: session.wants_ticks(),
            cursor: session.cursor(),
            total_steps: session.trace().len(),
            generation: session.generation(),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// Serialize as a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
