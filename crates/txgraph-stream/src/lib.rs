//! Transaction stream I/O for the rolling median engine.
//!
//! Decodes line-delimited JSON transaction records, pushes them through a
//! [`txgraph_core::MedianEngine`], and writes one fixed-point median per
//! valid record. Lines that cannot be decoded are logged and produce no
//! output.

mod decode;
mod driver;
mod error;
mod sink;

pub use decode::{decode_line, parse_timestamp};
pub use driver::{RollingMedians, RunSummary};
pub use error::{DecodeError, Error, Result};
pub use sink::{LineSink, MedianSink};

use std::io::{BufRead, Write};

/// Run a whole stream from `reader` to `writer` with a fresh engine.
pub fn generate_rolling_medians<R: BufRead, W: Write>(reader: R, writer: W) -> Result<RunSummary> {
    let mut sink = LineSink::new(writer);
    RollingMedians::new().run(reader, &mut sink)
}
