//! Existence probe
//!
//! A retrying, non-failing existence check. A missing source is reported as
//! `false`; deciding whether that is fatal is the caller's business.

use crate::cancel::CancelToken;
use crate::config::RetryPolicy;
use std::path::Path;
use tracing::{debug, warn};

/// Result of a probe run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    /// Whether the path was seen on some attempt
    pub found: bool,
    /// Number of checks actually performed
    pub attempts: u32,
}

/// Check that `path` exists, retrying per `policy`.
pub fn probe(path: &Path, policy: &RetryPolicy, cancel: &CancelToken) -> bool {
    probe_with(path, policy, cancel, |p| p.exists()).found
}

/// Probe loop over an arbitrary existence check.
///
/// At most `policy.attempts` checks are made, with `policy.delay` between
/// two consecutive checks and no wait after the last one.
pub fn probe_with<F>(
    path: &Path,
    policy: &RetryPolicy,
    cancel: &CancelToken,
    mut check: F,
) -> ProbeReport
where
    F: FnMut(&Path) -> bool,
{
    let mut attempts = 0;

    while attempts < policy.attempts {
        attempts += 1;
        if check(path) {
            return ProbeReport {
                found: true,
                attempts,
            };
        }
        debug!(
            "Source {} not visible (check {}/{})",
            path.display(),
            attempts,
            policy.attempts
        );

        if attempts < policy.attempts && !cancel.sleep(policy.delay) {
            warn!("Probe for {} cancelled after {} checks", path.display(), attempts);
            return ProbeReport {
                found: false,
                attempts,
            };
        }
    }

    warn!(
        "File {} does not exist, checked {} times",
        path.display(),
        attempts
    );
    ProbeReport {
        found: false,
        attempts,
    }
}
