//! Command-line arguments

use super::file::delay_from_secs;
use super::Config;
use crate::logging::LogFormat;
use crate::types::StageError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Copy a file or directory into a folder, retrying on flaky filesystems
#[derive(Debug, Parser)]
#[command(name = "stagecopy", version, about)]
pub struct Cli {
    /// File or directory to copy
    pub source: PathBuf,

    /// Folder the source is copied into (created if missing)
    pub destination_folder: PathBuf,

    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Existence checks before giving up on the source
    #[arg(long, value_name = "N")]
    pub probe_attempts: Option<u32>,

    /// Seconds between existence checks
    #[arg(long, value_name = "SECS")]
    pub probe_delay: Option<f64>,

    /// Copy attempts before giving up
    #[arg(long, value_name = "N")]
    pub transfer_attempts: Option<u32>,

    /// Seconds between copy attempts
    #[arg(long, value_name = "SECS")]
    pub transfer_delay: Option<f64>,

    /// Recreate symlinks found in directory trees instead of following them
    #[arg(long)]
    pub preserve_symlinks: bool,

    /// Abort pending retries after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Parsed `--timeout`, if any
    pub fn timeout(&self) -> Result<Option<Duration>, StageError> {
        self.timeout
            .map(|secs| delay_from_secs(secs, "timeout"))
            .transpose()
    }
}

impl TryFrom<&Cli> for Config {
    type Error = StageError;

    /// Layer defaults, then the config file, then explicit flags
    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let mut config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(attempts) = cli.probe_attempts {
            config.probe.attempts = attempts;
        }
        if let Some(secs) = cli.probe_delay {
            config.probe.delay = delay_from_secs(secs, "probe")?;
        }
        if let Some(attempts) = cli.transfer_attempts {
            config.transfer.attempts = attempts;
        }
        if let Some(secs) = cli.transfer_delay {
            config.transfer.delay = delay_from_secs(secs, "transfer")?;
        }
        if cli.preserve_symlinks {
            config.preserve_symlinks = true;
        }

        config.validate()?;
        Ok(config)
    }
}
