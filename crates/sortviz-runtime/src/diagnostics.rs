#![forbid(unsafe_code)]

//! Bounded diagnostic log of replay events, exportable as JSONL.

use std::collections::VecDeque;

use serde::Serialize;

use crate::session::Status;

/// A diagnostic log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEntry {
    /// A control changed the session status.
    Transition {
        seq: u64,
        key: String,
        control: &'static str,
        from: Status,
        to: Status,
        cursor: usize,
    },
    /// A tick revealed one step.
    StepRevealed {
        seq: u64,
        key: String,
        cursor: usize,
        total: usize,
        kind: &'static str,
    },
    /// Start or restart produced a new trace.
    TraceGenerated {
        seq: u64,
        key: String,
        generation: u64,
        len: usize,
        steps: usize,
    },
    /// A control was not valid in the current status.
    Ignored {
        seq: u64,
        key: String,
        control: &'static str,
        status: Status,
        reason: &'static str,
    },
}

impl DiagnosticEntry {
    #[must_use]
    pub fn seq(&self) -> u64 {
        match self {
            Self::Transition { seq, .. }
            | Self::StepRevealed { seq, .. }
            | Self::TraceGenerated { seq, .. }
            | Self::Ignored { seq, .. } => *seq,
        }
    }

    /// Serialize to one JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Diagnostic log buffer with bounded capacity.
#[derive(Debug)]
pub struct DiagnosticLog {
    entries: VecDeque<DiagnosticEntry>,
    max_entries: usize,
    seq: u64,
}

impl DiagnosticLog {
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1000)),
            max_entries,
            seq: 0,
        }
    }

    /// Get and increment the sequence number.
    pub fn next_seq(&mut self) -> u64 {
        let s = self.seq;
        self.seq = self.seq.wrapping_add(1);
        s
    }

    /// Push an entry, evicting the oldest when full.
    pub fn push(&mut self, entry: DiagnosticEntry) {
        if self.max_entries == 0 {
            return;
        }
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &VecDeque<DiagnosticEntry> {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export to JSONL, one entry per line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let lines = self
            .entries
            .iter()
            .map(DiagnosticEntry::to_jsonl)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }

    /// Clear entries (keeps seq).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignored(log: &mut DiagnosticLog) -> DiagnosticEntry {
        DiagnosticEntry::Ignored {
            seq: log.next_seq(),
            key: "tab/quick".into(),
            control: "tick",
            status: Status::Idle,
            reason: "tick outside running",
        }
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = DiagnosticLog::new(2);
        for _ in 0..3 {
            let e = ignored(&mut log);
            log.push(e);
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].seq(), 1);
        assert_eq!(log.entries()[1].seq(), 2);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut log = DiagnosticLog::new(0);
        let e = ignored(&mut log);
        log.push(e);
        assert!(log.is_empty());
    }

    #[test]
    fn clear_keeps_sequence() {
        let mut log = DiagnosticLog::new(8);
        let e = ignored(&mut log);
        log.push(e);
        log.clear();
        assert_eq!(log.next_seq(), 1);
    }

    #[test]
    fn jsonl_tags_events() {
        let mut log = DiagnosticLog::new(8);
        let e = ignored(&mut log);
        log.push(e);
        let seq = log.next_seq();
        log.push(DiagnosticEntry::Transition {
            seq,
            key: "tab/quick".into(),
            control: "start",
            from: Status::Idle,
            to: Status::Running,
            cursor: 0,
        });
        let jsonl = log.to_jsonl().unwrap();
        let lines: Vec<serde_json::Value> = jsonl
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "ignored");
        assert_eq!(lines[0]["status"], "idle");
        assert_eq!(lines[1]["event"], "transition");
        assert_eq!(lines[1]["to"], "running");
        assert_eq!(lines[1]["seq"], 1);
    }
}
