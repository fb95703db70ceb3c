//! Runtime for Tributary connector binaries.
//!
//! A connector implements [`Source`] or [`Destination`] and hands itself to a
//! runner from `main`:
//!
//! ```no_run
//! use std::path::Path;
//! use std::process::ExitCode;
//!
//! use tributary_protocol::{
//!     Catalog, ConfiguredCatalog, ConnectionSpecification, ConnectorSpecification,
//! };
//! use tributary_runtime::{ConnectorError, Emitter, LogEmitter, Source, SourceRunner};
//!
//! struct Empty;
//!
//! impl Source for Empty {
//!     fn spec(&self, _: &LogEmitter) -> Result<ConnectorSpecification, ConnectorError> {
//!         Ok(ConnectorSpecification::new(ConnectionSpecification::new("Empty", "")))
//!     }
//!     fn check(&self, _: &Path, _: &LogEmitter) -> Result<(), ConnectorError> {
//!         Ok(())
//!     }
//!     fn discover(&self, _: &Path, _: &LogEmitter) -> Result<Catalog, ConnectorError> {
//!         Ok(Catalog::default())
//!     }
//!     fn read(
//!         &self,
//!         _: &Path,
//!         _: &Path,
//!         _: &ConfiguredCatalog,
//!         _: &Emitter,
//!     ) -> Result<(), ConnectorError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> ExitCode {
//!     SourceRunner::stdout(Empty).start()
//! }
//! ```
//!
//! Stdout carries protocol messages only. Diagnostics go to stderr through
//! `tracing`, configured by the global `--log-filter` and `--log-format`
//! flags.

pub mod cli;
pub mod config;
pub mod connector;
pub mod emitter;
pub mod error;
pub mod input;
pub mod runner;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::cli::{DestinationCli, DestinationCommand, SourceCli, SourceCommand, Verb};
pub use self::config::{LogFormat, RuntimeConfig};
pub use self::connector::{ConnectorError, Destination, Source};
pub use self::emitter::{Emitter, LogEmitter};
pub use self::error::{InputError, RunError, WriteError};
pub use self::input::{load_json, load_json_or_default};
pub use self::runner::{DestinationRunner, SourceRunner, VerbOutcome};
pub use self::writer::SafeWriter;
