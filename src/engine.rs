//! Transfer engine: probe, resolve, skip-check, execute

use crate::cancel::CancelToken;
use crate::config::Config;
use crate::executor::execute;
use crate::probe::probe_with;
use crate::resolve::resolve;
use crate::types::{Outcome, StageError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Copies one source into a destination folder, tolerating a flaky filesystem.
///
/// Holds no state between calls apart from its configuration and cancel
/// token. Concurrent calls targeting the same destination are not
/// coordinated.
#[derive(Debug, Clone, Default)]
pub struct TransferEngine {
    config: Config,
    cancel: CancelToken,
}

impl TransferEngine {
    pub fn new(config: Config) -> Self {
        Self::with_cancel(config, CancelToken::new())
    }

    /// Engine whose retry waits are interrupted by `cancel`
    pub fn with_cancel(config: Config, cancel: CancelToken) -> Self {
        Self { config, cancel }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Copy `source` into `destination_folder` and return the absolute
    /// destination path, whether or not anything was written.
    pub fn copy(
        &self,
        source: impl AsRef<Path>,
        destination_folder: impl AsRef<Path>,
    ) -> Result<PathBuf, StageError> {
        self.stage(source, destination_folder)
            .map(|outcome| outcome.destination)
    }

    /// Same as [`copy`](Self::copy), reporting what actually happened.
    pub fn stage(
        &self,
        source: impl AsRef<Path>,
        destination_folder: impl AsRef<Path>,
    ) -> Result<Outcome, StageError> {
        let source = source.as_ref();
        let destination_folder = destination_folder.as_ref();
        self.config.validate()?;

        let probe = probe_with(source, &self.config.probe, &self.cancel, |p| p.exists());
        if !probe.found {
            if self.cancel.is_cancelled() {
                return Err(StageError::Cancelled {
                    stage: "probing source",
                });
            }
            return Err(StageError::SourceNotFound {
                path: source.to_path_buf(),
                attempts: probe.attempts,
            });
        }

        let destination = resolve(source, destination_folder)?;

        // Only a confirmed absence lets the copy go ahead
        match fs::symlink_metadata(&destination) {
            Ok(_) => {
                info!(
                    "Destination '{}' already exists, skipping copy of '{}'",
                    destination.display(),
                    source.display()
                );
                return Ok(Outcome::skipped(destination, probe.attempts));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StageError::Io(e)),
        }

        let report = execute(
            source,
            &destination,
            &self.config.transfer,
            self.config.preserve_symlinks,
            &self.cancel,
        )?;

        Ok(Outcome {
            destination,
            transferred: true,
            probe_attempts: probe.attempts,
            transfer_attempts: report.attempts,
            bytes_copied: report.bytes_copied,
        })
    }
}

/// Copy with the default configuration (5 attempts, 5 s apart, for both
/// the probe and the transfer).
///
/// # Example
/// ```no_run
/// let staged = stagecopy::copy("/data/report.csv", "/tmp/out")?;
/// assert!(staged.ends_with("report.csv"));
/// # Ok::<(), stagecopy::StageError>(())
/// ```
pub fn copy(
    source: impl AsRef<Path>,
    destination_folder: impl AsRef<Path>,
) -> Result<PathBuf, StageError> {
    TransferEngine::default().copy(source, destination_folder)
}
