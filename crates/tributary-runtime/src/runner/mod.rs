//! Verb dispatch for source and destination connectors.
//!
//! A runner binds one connector to one output sink. [`SourceRunner::start`]
//! and [`DestinationRunner::start`] are the usual entry points from `main`:
//! they parse the command line, install stderr telemetry, run exactly one
//! verb and map the result to a process exit status.
//!
//! | Verb | Success | Connector failure |
//! |------|---------|-------------------|
//! | `spec` | one `SPEC` line | ERROR log line, exit 1 |
//! | `check` | `SUCCEEDED` status | `FAILED` status, exit 0 |
//! | `discover` | one `CATALOG` line | no output, exit 1 |
//! | `read` | records and state as emitted | lines emitted so far, exit 1 |
//! | `write` | `SUCCEEDED` status | `FAILED` status, exit 0 |

mod verbs;

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, info_span, warn};
use tributary_protocol::ConfiguredCatalog;

use crate::cli::{DestinationCli, DestinationCommand, SourceCli, SourceCommand, Verb};
use crate::config::RuntimeConfig;
use crate::connector::{Destination, Source};
use crate::emitter::Emitter;
use crate::error::{EXIT_FAILURE, RunError};
use crate::input::load_json;
use crate::telemetry::{self, TelemetryError};
use crate::writer::SafeWriter;

/// Tracing target for verb dispatch.
const RUNNER_TARGET: &str = "tributary_runtime::runner";

/// Clean completion of a verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerbOutcome {
    /// The verb completed and emitted its success output.
    Succeeded,
    /// A health-signal verb reported a FAILED connection status. The process
    /// still exits with status 0.
    StatusFailure {
        /// Text of the FAILED status.
        message: String,
    },
}

/// Runs a [`Source`] connector.
///
/// # Example
///
/// ```no_run
/// use std::process::ExitCode;
/// use tributary_runtime::{Source, SourceRunner};
///
/// fn run<S: Source>(source: S) -> ExitCode {
///     SourceRunner::stdout(source).start()
/// }
/// ```
#[derive(Debug)]
pub struct SourceRunner<S> {
    connector: S,
    emitter: Emitter,
}

impl<S: Source> SourceRunner<S> {
    /// Binds `connector` to `writer`.
    #[must_use]
    pub const fn new(connector: S, writer: SafeWriter) -> Self {
        Self {
            connector,
            emitter: Emitter::new(writer),
        }
    }

    /// Binds `connector` to standard output.
    #[must_use]
    pub fn stdout(connector: S) -> Self {
        Self::new(connector, SafeWriter::stdout())
    }

    /// Runs the verb named by the process arguments.
    #[must_use]
    pub fn start(&self) -> ExitCode {
        self.start_from(env::args_os(), &mut io::stderr())
    }

    /// Runs the verb named by `args`, writing usage and startup errors to
    /// `stderr`.
    pub fn start_from<I, T, E>(&self, args: I, stderr: &mut E) -> ExitCode
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        E: Write,
    {
        match SourceCli::try_parse_from(args) {
            Ok(cli) => launch(&cli.runtime, cli.command.verb(), stderr, || {
                self.dispatch(&cli.command)
            }),
            Err(error) => usage(error, stderr),
        }
    }

    /// Parses `args` and runs the verb without installing telemetry.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Usage`] for a malformed command line and any error
    /// from [`Self::dispatch`].
    pub fn run<I, T>(&self, args: I) -> Result<VerbOutcome, RunError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = SourceCli::try_parse_from(args).map_err(RunError::Usage)?;
        self.dispatch(&cli.command)
    }

    /// Runs one parsed verb.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Structural`] when `spec`, `discover` or `read`
    /// fails inside the connector, [`RunError::Input`] when the configured
    /// catalog cannot be loaded, and [`RunError::Write`] when the sink fails.
    pub fn dispatch(&self, command: &SourceCommand) -> Result<VerbOutcome, RunError> {
        let verb = command.verb();
        let _span = info_span!(target: RUNNER_TARGET, "verb", verb = %verb).entered();
        match command {
            SourceCommand::Spec => verbs::spec(&self.emitter, |logger| self.connector.spec(logger)),
            SourceCommand::Check { config } => {
                let result = self.connector.check(config, &self.emitter.logger());
                verbs::status(&self.emitter, verb, result)
            }
            SourceCommand::Discover { config } => verbs::discover(&self.emitter, |logger| {
                self.connector.discover(config, logger)
            }),
            SourceCommand::Read {
                config,
                catalog,
                state,
            } => {
                let configured = load_catalog(catalog)?;
                verbs::read(&self.emitter, |emitter| {
                    self.connector.read(config, state, &configured, emitter)
                })
            }
        }
    }
}

/// Runs a [`Destination`] connector.
#[derive(Debug)]
pub struct DestinationRunner<D> {
    connector: D,
    emitter: Emitter,
}

impl<D: Destination> DestinationRunner<D> {
    /// Binds `connector` to `writer`.
    #[must_use]
    pub const fn new(connector: D, writer: SafeWriter) -> Self {
        Self {
            connector,
            emitter: Emitter::new(writer),
        }
    }

    /// Binds `connector` to standard output.
    #[must_use]
    pub fn stdout(connector: D) -> Self {
        Self::new(connector, SafeWriter::stdout())
    }

    /// Runs the verb named by the process arguments.
    #[must_use]
    pub fn start(&self) -> ExitCode {
        self.start_from(env::args_os(), &mut io::stderr())
    }

    /// Runs the verb named by `args`, writing usage and startup errors to
    /// `stderr`.
    pub fn start_from<I, T, E>(&self, args: I, stderr: &mut E) -> ExitCode
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        E: Write,
    {
        match DestinationCli::try_parse_from(args) {
            Ok(cli) => launch(&cli.runtime, cli.command.verb(), stderr, || {
                self.dispatch(&cli.command)
            }),
            Err(error) => usage(error, stderr),
        }
    }

    /// Parses `args` and runs the verb without installing telemetry.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Usage`] for a malformed command line and any error
    /// from [`Self::dispatch`].
    pub fn run<I, T>(&self, args: I) -> Result<VerbOutcome, RunError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = DestinationCli::try_parse_from(args).map_err(RunError::Usage)?;
        self.dispatch(&cli.command)
    }

    /// Runs one parsed verb.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Structural`] when `spec` fails inside the
    /// connector, [`RunError::Input`] when the configured catalog cannot be
    /// loaded, and [`RunError::Write`] when the sink fails.
    pub fn dispatch(&self, command: &DestinationCommand) -> Result<VerbOutcome, RunError> {
        let verb = command.verb();
        let _span = info_span!(target: RUNNER_TARGET, "verb", verb = %verb).entered();
        match command {
            DestinationCommand::Spec => {
                verbs::spec(&self.emitter, |logger| self.connector.spec(logger))
            }
            DestinationCommand::Check { config } => {
                let result = self.connector.check(config, &self.emitter.logger());
                verbs::status(&self.emitter, verb, result)
            }
            DestinationCommand::Write { config, catalog } => {
                let configured = load_catalog(catalog)?;
                let result = self.connector.write(config, &configured, &self.emitter);
                verbs::status(&self.emitter, verb, result)
            }
        }
    }
}

fn load_catalog(path: &Path) -> Result<ConfiguredCatalog, RunError> {
    Ok(load_json(path)?)
}

fn launch<E, F>(runtime: &RuntimeConfig, verb: Verb, stderr: &mut E, run: F) -> ExitCode
where
    E: Write,
    F: FnOnce() -> Result<VerbOutcome, RunError>,
{
    match telemetry::initialise(runtime) {
        Ok(()) => {}
        Err(error @ TelemetryError::Filter(_)) => {
            writeln!(stderr, "{error}").ok();
            return ExitCode::from(EXIT_FAILURE);
        }
        Err(error @ TelemetryError::Subscriber(_)) => {
            warn!(target: RUNNER_TARGET, %error, "using the existing subscriber");
        }
    }

    match run() {
        Ok(outcome) => {
            info!(target: RUNNER_TARGET, verb = %verb, ?outcome, "verb completed");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            error!(target: RUNNER_TARGET, verb = %verb, error = %failure, "verb failed");
            ExitCode::from(failure.exit_status())
        }
    }
}

fn usage<E: Write>(error: clap::Error, stderr: &mut E) -> ExitCode {
    writeln!(stderr, "{}", error.render()).ok();
    ExitCode::from(RunError::Usage(error).exit_status())
}
