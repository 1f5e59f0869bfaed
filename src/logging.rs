//! Tracing integration for structured logging.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or to whoever embeds the engine).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::types::StageError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// Structured JSON output.
    Json,
}

/// Map a `-v` count to a level name. Zero keeps warnings visible so failed
/// attempts always show up.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the logging system on stderr.
///
/// `RUST_LOG` takes precedence over `verbosity` when set.
///
/// ```ignore
/// use stagecopy::logging::{init_logging, LogFormat};
///
/// init_logging(1, LogFormat::Text).unwrap();
/// ```
pub fn init_logging(verbosity: u8, format: LogFormat) -> Result<(), StageError> {
    let level = level_for(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stagecopy={}", level)));

    let result = match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbosity >= 2)
                    .with_file(verbosity >= 3)
                    .with_line_number(verbosity >= 3),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| StageError::Io(std::io::Error::other(e.to_string())))
}
