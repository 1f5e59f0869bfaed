//! Transfer executor: one copy, retried per policy

pub mod copy;
pub mod tree;

use crate::cancel::CancelToken;
use crate::config::RetryPolicy;
use crate::types::StageError;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

pub use copy::copy_file_atomic;
pub use tree::copy_tree;

/// Result of a successful transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReport {
    /// Attempt number that succeeded (1-based)
    pub attempts: u32,
    /// Bytes written by that attempt
    pub bytes_copied: u64,
}

/// Copy `source` to `destination`, which must not exist yet.
///
/// Directories are copied recursively, anything else is copied as a single
/// file with its permissions and timestamps. A failed directory attempt
/// removes the destination root it created before the next attempt, so
/// every attempt starts from scratch.
pub fn execute(
    source: &Path,
    destination: &Path,
    policy: &RetryPolicy,
    preserve_symlinks: bool,
    cancel: &CancelToken,
) -> Result<TransferReport, StageError> {
    let is_dir = source.is_dir();
    let report = execute_with(source, destination, policy, cancel, |_| {
        if is_dir {
            transfer_tree_attempt(source, destination, preserve_symlinks)
        } else {
            copy_file_atomic(source, destination)
        }
    })?;

    info!(
        "Copied '{}' to '{}'",
        source.display(),
        destination.display()
    );
    Ok(report)
}

/// Retry loop around an arbitrary transfer attempt.
///
/// `attempt` receives the 1-based attempt number. It is called at most
/// `policy.attempts` times with `policy.delay` between failures.
pub fn execute_with<F>(
    source: &Path,
    destination: &Path,
    policy: &RetryPolicy,
    cancel: &CancelToken,
    mut attempt: F,
) -> Result<TransferReport, StageError>
where
    F: FnMut(u32) -> io::Result<u64>,
{
    let mut number = 0;

    loop {
        number += 1;
        debug!(
            "Transfer attempt {}/{}: {} -> {}",
            number,
            policy.attempts,
            source.display(),
            destination.display()
        );

        let err = match attempt(number) {
            Ok(bytes_copied) => {
                return Ok(TransferReport {
                    attempts: number,
                    bytes_copied,
                })
            }
            Err(err) => err,
        };
        warn!("Attempt {} failed: {}", number, err);

        if number >= policy.attempts {
            return Err(StageError::TransferExhausted {
                source_path: source.to_path_buf(),
                destination: destination.to_path_buf(),
                attempts: number,
                last: err,
            });
        }

        warn!("Retrying in {:?}...", policy.delay);
        if !cancel.sleep(policy.delay) {
            return Err(StageError::Cancelled {
                stage: "retrying transfer",
            });
        }
    }
}

/// One directory attempt, undoing a half-written destination on failure.
fn transfer_tree_attempt(
    source: &Path,
    destination: &Path,
    preserve_symlinks: bool,
) -> io::Result<u64> {
    let existed = fs::symlink_metadata(destination).is_ok();

    match copy_tree(source, destination, preserve_symlinks) {
        Ok(bytes) => Ok(bytes),
        Err(err) => {
            if !existed && fs::symlink_metadata(destination).is_ok() {
                if let Err(cleanup) = fs::remove_dir_all(destination) {
                    warn!(
                        "Could not remove partial copy {}: {}",
                        destination.display(),
                        cleanup
                    );
                }
            }
            Err(err)
        }
    }
}
