//! Logging for vindec.
//!
//! Library code emits `tracing` events; the binary installs a subscriber
//! through [`init_logging`]. Everything goes to stderr so decoded results on
//! stdout stay machine-readable.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crate name used as the default filter target.
const LOG_TARGET: &str = "vindec";

/// How much the CLI logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and errors, e.g. malformed VINs skipped during auto-fill.
    #[default]
    Normal,
    /// Per-truck and per-file detail.
    Verbose,
    /// Every decode.
    Trace,
}

impl Verbosity {
    /// Verbosity for a `-q` flag and a count of `-v` flags. Quiet wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most verbose level emitted.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(self) -> String {
        format!("{LOG_TARGET}={}", self.level())
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity`. Event targets are shown
/// only at [`Verbosity::Verbose`] and above. Calling this twice is harmless.
///
/// # Examples
///
/// ```no_run
/// use vindec::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbosity >= Verbosity::Verbose)
            .without_time(),
    );

    // A subscriber may already be installed
    let _ = subscriber.try_init();
}

/// Test subscriber capturing everything this crate logs.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vindec=trace")
        .with_test_writer()
        .try_init();
}
