//! Report of a single staging call

use std::path::PathBuf;

/// What one staging call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Absolute path of the staged entry (copied or already present).
    pub destination: PathBuf,
    /// Whether bytes were actually written on this call.
    pub transferred: bool,
    /// Existence checks made by the probe.
    pub probe_attempts: u32,
    /// Copy attempts made (0 when skipped).
    pub transfer_attempts: u32,
    /// Bytes written by the successful attempt.
    pub bytes_copied: u64,
}

impl Outcome {
    /// Outcome for a destination that was already in place.
    pub fn skipped(destination: PathBuf, probe_attempts: u32) -> Self {
        Self {
            destination,
            transferred: false,
            probe_attempts,
            transfer_attempts: 0,
            bytes_copied: 0,
        }
    }

    /// Whether the transfer was skipped because the destination existed.
    pub fn is_skip(&self) -> bool {
        !self.transferred
    }
}
