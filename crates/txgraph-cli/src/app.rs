//! File plumbing around the stream driver.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};

use tracing::info;
use txgraph_stream::{LineSink, RollingMedians, RunSummary};

use crate::config::Config;
use crate::error::Error;

/// Read `config.input`, write medians to `config.output`.
///
/// The output file is truncated, and its parent directory created if
/// needed.
pub fn run(config: &Config) -> Result<RunSummary, Error> {
    let input = File::open(&config.input).map_err(|source| Error::File {
        path: config.input.clone(),
        source,
    })?;

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::File {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let output = File::create(&config.output).map_err(|source| Error::File {
        path: config.output.clone(),
        source,
    })?;

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        dump_state = config.dump_state,
        "Generating rolling medians"
    );

    let mut sink = LineSink::new(BufWriter::new(output));
    let summary = RollingMedians::new()
        .with_state_dump(config.dump_state)
        .run(BufReader::new(input), &mut sink)?;
    Ok(summary)
}
