//! Logging setup for the cardz binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the client. Logs go to stderr so they never mix with command output.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only.
    #[default]
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    /// Map a repeated `-v` count to a verbosity.
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Self::Quiet,
            1 => Self::Normal,
            2 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    #[must_use]
    pub fn to_level(&self) -> Level {
        match self {
            Self::Quiet => Level::WARN,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `verbosity`. Calling this twice is harmless.
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("cardz={}", verbosity.to_level());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}
