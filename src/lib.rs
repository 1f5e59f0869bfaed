//! # stagecopy - Retrying staging copy
//!
//! Copies a single file or a whole directory tree into a destination folder,
//! retrying both the source existence check and the copy itself so that
//! short filesystem hiccups (slow mounts, files still landing) do not fail a
//! pipeline step. A destination that already exists is left untouched.

// Module declarations
pub mod cancel;
pub mod commands;
pub mod config;
pub mod engine;
pub mod executor;
pub mod logging;
pub mod probe;
pub mod resolve;
pub mod types;

// Re-export commonly used types
pub use cancel::CancelToken;
pub use config::{Config, RetryPolicy};
pub use engine::{copy, TransferEngine};
pub use types::{Outcome, StageError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
