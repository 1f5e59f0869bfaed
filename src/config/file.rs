//! TOML config file model

use super::{Config, RetryPolicy};
use crate::types::StageError;
use serde::Deserialize;
use std::time::Duration;

/// On-disk shape of a config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub probe: Option<RetrySection>,
    pub transfer: Option<RetrySection>,
    pub preserve_symlinks: Option<bool>,
}

/// `[probe]` / `[transfer]` table
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    pub attempts: Option<u32>,
    pub delay_secs: Option<f64>,
}

impl ConfigFile {
    /// Overlay the keys present in the file onto `config`
    pub fn apply(&self, config: &mut Config) -> Result<(), StageError> {
        if let Some(section) = &self.probe {
            section.apply(&mut config.probe, "probe")?;
        }
        if let Some(section) = &self.transfer {
            section.apply(&mut config.transfer, "transfer")?;
        }
        if let Some(preserve) = self.preserve_symlinks {
            config.preserve_symlinks = preserve;
        }
        Ok(())
    }
}

impl RetrySection {
    fn apply(&self, policy: &mut RetryPolicy, label: &str) -> Result<(), StageError> {
        if let Some(attempts) = self.attempts {
            policy.attempts = attempts;
        }
        if let Some(secs) = self.delay_secs {
            policy.delay = delay_from_secs(secs, label)?;
        }
        Ok(())
    }
}

/// Convert fractional seconds into a `Duration`, rejecting negative or non-finite values
pub(crate) fn delay_from_secs(secs: f64, label: &str) -> Result<Duration, StageError> {
    Duration::try_from_secs_f64(secs).map_err(|_| {
        StageError::Config(format!(
            "{label} delay must be a non-negative number of seconds, got {secs}"
        ))
    })
}
