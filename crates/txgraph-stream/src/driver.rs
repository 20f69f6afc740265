//! Stream driver: lines in, medians out.

use std::io::BufRead;

use tracing::{debug, info, warn, Level};
use txgraph_core::{EngineStats, MedianEngine};

use crate::decode::decode_line;
use crate::error::{DecodeError, Result};
use crate::sink::MedianSink;

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Input lines read.
    pub lines: u64,
    /// Medians written.
    pub emitted: u64,
    /// Lines that produced no median (undecodable or invalid).
    pub skipped: u64,
    /// Engine counters at the end of the run.
    pub stats: EngineStats,
}

/// Feeds a line-delimited record stream through a [`MedianEngine`].
#[derive(Debug, Default)]
pub struct RollingMedians {
    engine: MedianEngine,
    dump_state: bool,
}

impl RollingMedians {
    /// Create a driver with a fresh engine.
    pub fn new() -> Self {
        Self {
            engine: MedianEngine::new(),
            dump_state: false,
        }
    }

    /// Log a JSON snapshot of the window at `debug` after every event.
    pub fn with_state_dump(mut self, enabled: bool) -> Self {
        self.dump_state = enabled;
        self
    }

    /// The engine, as left by the last run.
    pub fn engine(&self) -> &MedianEngine {
        &self.engine
    }

    /// Process every line of `reader`, writing one median per valid event.
    ///
    /// Engine state is cleared first, so each run starts from an empty
    /// window. Undecodable lines are logged and skipped; only I/O failures
    /// end the run early.
    pub fn run<R, S>(&mut self, mut reader: R, sink: &mut S) -> Result<RunSummary>
    where
        R: BufRead,
        S: MedianSink + ?Sized,
    {
        self.engine.reset();
        let mut summary = RunSummary::default();

        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            summary.lines += 1;
            let line_no = summary.lines;

            let decoded = std::str::from_utf8(trim_line_end(&buf))
                .map_err(DecodeError::from)
                .and_then(decode_line);
            let event = match decoded {
                Ok(event) => event,
                Err(error) => {
                    warn!(line = line_no, %error, "Skipping undecodable record");
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.engine.process(event) {
                Some(median) => {
                    sink.emit(median)?;
                    summary.emitted += 1;
                }
                None => {
                    summary.skipped += 1;
                    continue;
                }
            }

            if self.dump_state && tracing::enabled!(Level::DEBUG) {
                let snapshot = serde_json::to_string(&self.engine.snapshot())?;
                debug!(line = line_no, %snapshot, "Window state");
            }
        }

        sink.flush()?;
        summary.stats = self.engine.stats();

        info!(
            lines = summary.lines,
            emitted = summary.emitted,
            skipped = summary.skipped,
            stale = summary.stats.stale,
            duplicates = summary.stats.duplicates,
            evicted = summary.stats.evicted,
            "Rolling median run complete"
        );
        Ok(summary)
    }
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
