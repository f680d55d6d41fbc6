#![forbid(unsafe_code)]

//! Plain-text rendering of read models.
//!
//! One line per transition: progress, status, the array with a role marker
//! after each highlighted value, then the narration.
//!
//! ```text
//! [  1/26] running  | 40^ 20^ 10  30  25  | Compare 40 and 20
//! ```

use std::fmt::Write as _;

use sortviz_core::{Algorithm, Trace};
use sortviz_runtime::{ReadModel, Role};

/// Marker appended to a highlighted value.
#[must_use]
pub fn marker(role: Role) -> char {
    match role {
        Role::Lifted => '^',
        Role::Comparing => '?',
        Role::Swapping => '~',
        Role::Shifting => '>',
        Role::Placed => '=',
        Role::Pivot => 'P',
        Role::MinSoFar => 'm',
        Role::Settled | Role::Sorted => '*',
        Role::Splitting => '|',
        Role::Merged => '+',
    }
}

/// Render one read model as a single line.
#[must_use]
pub fn render_text(model: &ReadModel) -> String {
    let width = model.total_steps.to_string().len();
    let mut line = format!(
        "[{:>width$}/{}] {:<8} | ",
        model.cursor,
        model.total_steps,
        model.status.label(),
    );
    for (slot, element) in model.snapshot.elements().iter().enumerate() {
        let mark = model
            .highlights
            .iter()
            .find(|h| h.slot == slot)
            .map_or(' ', |h| marker(h.role));
        let _ = write!(line, "{}{} ", element.value, mark);
    }
    let _ = write!(line, "| {}", model.narration);
    line
}

/// Header printed once before a text replay.
#[must_use]
pub fn header(algorithm: Algorithm) -> String {
    let title = algorithm.title();
    format!("{title}\n{}", "=".repeat(title.len()))
}

/// Every step of `trace` as JSONL.
pub fn trace_jsonl(trace: &Trace) -> Result<Vec<String>, serde_json::Error> {
    trace.iter().map(serde_json::to_string).collect()
}

/// `name  title` rows for every algorithm.
#[must_use]
pub fn algorithm_list() -> Vec<String> {
    Algorithm::ALL
        .iter()
        .map(|a| format!("{:<10} {}", a.name(), a.title()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_runtime::ReplaySession;

    #[test]
    fn idle_line_has_no_markers() {
        let s = ReplaySession::with_array(Algorithm::Insertion, vec![40, 20, 10]);
        let line = render_text(&ReadModel::from_session(&s));
        assert_eq!(
            line,
            "[0/0] idle     | 40  20  10  | Press start to begin the sorting visualization"
        );
    }

    #[test]
    fn running_line_marks_lifted_pair() {
        let mut s = ReplaySession::with_array(Algorithm::Insertion, vec![40, 20, 10, 30, 25]);
        s.start(Vec::new);
        s.tick();
        let line = render_text(&ReadModel::from_session(&s));
        assert_eq!(
            line,
            "[ 1/26] running  | 40^ 20^ 10  30  25  | Compare 40 and 20"
        );
    }

    #[test]
    fn header_underlines_title() {
        assert_eq!(
            header(Algorithm::Quick),
            "Quick Sort Visualization\n========================"
        );
    }

    #[test]
    fn lists_every_algorithm() {
        let rows = algorithm_list();
        assert_eq!(rows.len(), Algorithm::ALL.len());
        assert!(rows[0].starts_with("insertion"));
    }

    #[test]
    fn trace_lines_parse_as_json() {
        let trace = sortviz_core::algorithms::generate(Algorithm::Selection, &[2, 1]);
        let lines = trace_jsonl(&trace).unwrap();
        assert_eq!(lines.len(), trace.len());
        for line in lines {
            let v: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert!(v["action"]["selection"]["kind"].is_string());
        }
    }
}
