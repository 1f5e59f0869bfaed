//! Configuration management

mod cli;
mod file;

pub use cli::Cli;
pub use file::{ConfigFile, RetrySection};

use super::types::StageError;
use std::path::Path;
use std::time::Duration;

/// Default number of attempts for both the probe and the transfer.
pub const DEFAULT_ATTEMPTS: u32 = 5;

/// Default wait between attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

/// How many times to try something and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub attempts: u32,

    /// Wait between two consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Policy with no wait between attempts
    pub fn immediate(attempts: u32) -> Self {
        Self::new(attempts, Duration::ZERO)
    }

    fn validate(&self, label: &str) -> Result<(), StageError> {
        if self.attempts == 0 {
            return Err(StageError::Config(format!(
                "{label} attempts must be at least 1"
            )));
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS, DEFAULT_DELAY)
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Retry budget for the source existence check
    pub probe: RetryPolicy,

    /// Retry budget for the copy itself
    pub transfer: RetryPolicy,

    /// Recreate symlinks inside directory trees instead of following them
    pub preserve_symlinks: bool,
}

impl Config {
    /// Zero-delay configuration with the same attempt budget for both steps
    pub fn immediate(attempts: u32) -> Self {
        Self {
            probe: RetryPolicy::immediate(attempts),
            transfer: RetryPolicy::immediate(attempts),
            preserve_symlinks: false,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), StageError> {
        self.probe.validate("probe")?;
        self.transfer.validate("transfer")?;
        Ok(())
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(text: &str) -> Result<Self, StageError> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|e| StageError::Config(format!("Invalid config file: {}", e)))?;
        let mut config = Self::default();
        file.apply(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file from disk
    pub fn load(path: &Path) -> Result<Self, StageError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StageError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }
}
