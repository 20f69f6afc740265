//! Runtime configuration from arguments and environment.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Input path used when neither an argument nor `TXGRAPH_INPUT` is given.
pub const DEFAULT_INPUT: &str = "./venmo_input/venmo-trans.txt";

/// Output path used when neither an argument nor `TXGRAPH_OUTPUT` is given.
pub const DEFAULT_OUTPUT: &str = "./venmo_output/output.txt";

pub const ENV_INPUT: &str = "TXGRAPH_INPUT";
pub const ENV_OUTPUT: &str = "TXGRAPH_OUTPUT";
pub const ENV_DUMP_STATE: &str = "TXGRAPH_DUMP_STATE";

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
}

/// Configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Line-delimited JSON transaction log.
    pub input: PathBuf,

    /// File receiving one median per line.
    pub output: PathBuf,

    /// Log the window state after each event.
    pub dump_state: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            dump_state: false,
        }
    }
}

impl Config {
    /// Read the process arguments and environment.
    pub fn from_env() -> Result<Command, ConfigError> {
        Self::from_sources(std::env::args().skip(1), |name| std::env::var(name).ok())
    }

    /// Build from explicit sources. Arguments win over the environment,
    /// which wins over the defaults.
    pub fn from_sources<I, F>(args: I, env: F) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(input) = env(ENV_INPUT).filter(|v| !v.is_empty()) {
            config.input = PathBuf::from(input);
        }
        if let Some(output) = env(ENV_OUTPUT).filter(|v| !v.is_empty()) {
            config.output = PathBuf::from(output);
        }
        if let Some(value) = env(ENV_DUMP_STATE) {
            config.dump_state = parse_flag(&value).ok_or(ConfigError::InvalidEnv {
                name: ENV_DUMP_STATE,
                value,
            })?;
        }

        let mut positional = 0;
        for arg in args {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--dump-state" => config.dump_state = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(ConfigError::UnknownOption(flag.to_string()));
                }
                _ => {
                    match positional {
                        0 => config.input = PathBuf::from(&arg),
                        1 => config.output = PathBuf::from(&arg),
                        _ => return Err(ConfigError::UnexpectedArgument(arg.clone())),
                    }
                    positional += 1;
                }
            }
        }

        Ok(Command::Run(config))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
