//! Diagnostics for connector processes.
//!
//! Stdout belongs to the protocol, so every event emitted through `tracing`
//! lands on stderr. The orchestrator captures that stream separately from the
//! message lines.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, time::UtcTime};

use crate::config::{LogFormat, RuntimeConfig};

/// Boxed subscriber ready to be installed globally.
pub type StderrSubscriber = Box<dyn Subscriber + Send + Sync>;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Reasons diagnostics could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `--log-filter` is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Some other subscriber already owns the global slot.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Builds the stderr subscriber described by `config` without installing it.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the filter does not parse.
pub fn subscriber(config: &RuntimeConfig) -> Result<StderrSubscriber, TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let base = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(base.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(base.compact().finish()),
    })
}

/// Installs the stderr subscriber once per process.
///
/// After a successful install, further calls do nothing and ignore their
/// configuration.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for a bad filter and
/// [`TelemetryError::Subscriber`] when another subscriber got there first.
///
/// # Examples
///
/// ```rust
/// use tributary_runtime::{RuntimeConfig, telemetry};
///
/// # fn main() -> Result<(), tributary_runtime::telemetry::TelemetryError> {
/// let config = RuntimeConfig::default();
/// telemetry::initialise(&config)?;
/// telemetry::initialise(&config)?;
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &RuntimeConfig) -> Result<(), TelemetryError> {
    INSTALLED
        .get_or_try_init(|| {
            tracing::subscriber::set_global_default(subscriber(config)?)
                .map_err(TelemetryError::Subscriber)
        })
        .copied()
}
