//! rolling-median binary
//!
//! Reads a line-delimited JSON transaction log and writes the rolling median
//! vertex degree after each transaction.
//!
//! Usage:
//!   rolling-median [INPUT] [OUTPUT] [--dump-state]

mod app;
mod config;
mod error;

use config::{Command, Config};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "rolling_median=info,txgraph=info";

/// Snapshots are logged by the driver at debug.
const STATE_DUMP_DIRECTIVE: &str = "txgraph_stream=debug";

fn print_usage() {
    eprintln!("rolling-median - Rolling median degree of a transaction graph");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  rolling-median [INPUT] [OUTPUT] [--dump-state]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dump-state   Log the window state after every event");
    eprintln!("  -h, --help     Show this message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {}      Input path (default: {})", config::ENV_INPUT, config::DEFAULT_INPUT);
    eprintln!("  {}     Output path (default: {})", config::ENV_OUTPUT, config::DEFAULT_OUTPUT);
    eprintln!("  {} Same as --dump-state when set to 1/true/yes/on", config::ENV_DUMP_STATE);
    eprintln!("  RUST_LOG           Log filter (default: {})", DEFAULT_LOG_FILTER);
}

fn log_filter(base: EnvFilter, dump_state: bool) -> Result<EnvFilter, ParseError> {
    if !dump_state {
        return Ok(base);
    }
    Ok(base.add_directive(STATE_DUMP_DIRECTIVE.parse()?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::from_env() {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    // Logs go to stderr; medians go to the output file.
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(log_filter(base, config.dump_state)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let summary = app::run(&config)?;
    tracing::info!(
        emitted = summary.emitted,
        skipped = summary.skipped,
        "Wrote {}",
        config.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn under(filter: EnvFilter, check: impl FnOnce() -> bool) -> bool {
        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, check)
    }

    fn driver_debug() -> bool {
        tracing::enabled!(target: "txgraph_stream::driver", Level::DEBUG)
    }

    #[test]
    fn default_filter_hides_state_dump() {
        let filter = log_filter(EnvFilter::new(DEFAULT_LOG_FILTER), false).unwrap();
        assert!(!under(filter, driver_debug));
    }

    #[test]
    fn dump_state_enables_driver_debug_only() {
        let filter = log_filter(EnvFilter::new(DEFAULT_LOG_FILTER), true).unwrap();
        assert!(under(filter, driver_debug));

        let filter = log_filter(EnvFilter::new(DEFAULT_LOG_FILTER), true).unwrap();
        assert!(!under(filter, || {
            tracing::enabled!(target: "txgraph_core::window", Level::DEBUG)
        }));
        let filter = log_filter(EnvFilter::new(DEFAULT_LOG_FILTER), true).unwrap();
        assert!(under(filter, || {
            tracing::enabled!(target: "txgraph_core::window", Level::INFO)
        }));
    }
}
