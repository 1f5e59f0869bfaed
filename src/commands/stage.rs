//! Stage command: one copy from the command line

use crate::engine::TransferEngine;
use crate::types::{Outcome, StageError};
use std::io::ErrorKind;
use std::path::Path;

/// Run one staging copy and print the destination path on stdout.
///
/// On failure a human-readable summary goes to stderr and the original error
/// is returned for the exit status.
pub fn run(
    engine: &TransferEngine,
    source: &Path,
    destination_folder: &Path,
) -> Result<Outcome, StageError> {
    match engine.stage(source, destination_folder) {
        Ok(outcome) => {
            println!("{}", outcome.destination.display());
            Ok(outcome)
        }
        Err(err) => {
            eprintln!("{}", format_error(&err));
            Err(err)
        }
    }
}

fn format_error(error: &StageError) -> String {
    let (message, suggestion) = humanize_error(error);
    match suggestion {
        Some(hint) => format!("{}: {}\n  hint: {}", error_kind_label(error), message, hint),
        None => format!("{}: {}", error_kind_label(error), message),
    }
}

fn humanize_error(error: &StageError) -> (String, Option<String>) {
    match error {
        StageError::SourceNotFound { path, attempts } => (
            format!(
                "'{}' was not found after {} check(s)",
                path.display(),
                attempts
            ),
            Some(
                "Verify the path, or raise --probe-attempts / --probe-delay if the mount is slow."
                    .to_string(),
            ),
        ),
        StageError::TransferExhausted {
            source_path,
            destination,
            attempts,
            last,
        } => (
            format!(
                "copying '{}' to '{}' failed {} time(s), last error: {}",
                source_path.display(),
                destination.display(),
                attempts,
                last
            ),
            Some(io_suggestion(last.kind()).to_string()),
        ),
        StageError::Io(io) => (
            format!("I/O operation failed: {}", io),
            Some(io_suggestion(io.kind()).to_string()),
        ),
        StageError::InvalidSource(path) => (
            format!("'{}' has no name to copy under", path.display()),
            Some("Pass the directory itself rather than a filesystem root.".to_string()),
        ),
        StageError::Cancelled { stage } => (
            format!("gave up while {}", stage),
            Some("Increase --timeout or lower the retry delays.".to_string()),
        ),
        StageError::Config(msg) => (msg.clone(), None),
    }
}

fn io_suggestion(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotFound => "Verify the path still exists and retry.",
        ErrorKind::PermissionDenied => "Check file permissions or run with a user that has access.",
        ErrorKind::AlreadyExists => "Remove or rename the conflicting path, then retry.",
        _ => "Retry. If this keeps happening, check disk health and mount stability.",
    }
}

fn error_kind_label(error: &StageError) -> &'static str {
    match error {
        StageError::Io(_) => "I/O error",
        StageError::Config(_) => "Configuration error",
        StageError::SourceNotFound { .. } => "Source not found",
        StageError::TransferExhausted { .. } => "Copy failed",
        StageError::InvalidSource(_) => "Invalid source",
        StageError::Cancelled { .. } => "Cancelled",
    }
}
