//! Shared fixtures for the end-to-end tests.

use std::io::Cursor;

use txgraph_core::{Event, MedianEngine, Timestamp};
use txgraph_stream::{generate_rolling_medians, RunSummary};

/// Base instant for synthetic streams (2016-04-07T03:33:20Z).
pub const BASE_SECS: i64 = 1_460_000_000;

/// Event `offset` seconds after [`BASE_SECS`].
pub fn event(offset: i64, actor: &str, target: &str) -> Event {
    Event::new(Timestamp::from_secs(BASE_SECS + offset), actor, target)
}

/// One JSON transaction record line.
pub fn record(created_time: &str, actor: &str, target: &str) -> String {
    format!(
        r#"{{"created_time": "{}", "target": "{}", "actor": "{}"}}"#,
        created_time, target, actor
    )
}

/// Run events straight through an engine, rendering each emitted median.
pub fn engine_medians(events: impl IntoIterator<Item = Event>) -> Vec<String> {
    let mut engine = MedianEngine::new();
    events
        .into_iter()
        .filter_map(|e| engine.process(e))
        .map(|m| m.to_string())
        .collect()
}

/// Run record lines through the full decode/engine/sink pipeline.
pub fn stream_medians<S: AsRef<str>>(lines: &[S]) -> (Vec<String>, RunSummary) {
    let input = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    let mut output = Vec::new();
    let summary = match generate_rolling_medians(Cursor::new(input), &mut output) {
        Ok(summary) => summary,
        Err(e) => panic!("in-memory run failed: {}", e),
    };
    let text = String::from_utf8_lossy(&output).into_owned();
    (text.lines().map(str::to_string).collect(), summary)
}
