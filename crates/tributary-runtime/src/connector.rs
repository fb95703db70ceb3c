//! Traits implemented by connector authors.
//!
//! A runner owns exactly one connector and calls one of its methods per
//! process. Methods receive file paths rather than parsed values for config
//! and state so each connector decides its own structure; [`crate::load_json`]
//! covers the common case. The configured catalog is parsed by the runner
//! before the connector sees it.

use std::error::Error;
use std::path::Path;

use tributary_protocol::{Catalog, ConfiguredCatalog, ConnectorSpecification};

use crate::emitter::{Emitter, LogEmitter};

/// Error type returned by connector methods.
///
/// Its `Display` text becomes the message of a FAILED connection status.
pub type ConnectorError = Box<dyn Error + Send + Sync>;

/// A connector that extracts data and emits it as records.
pub trait Source {
    /// Describes the configuration the connector accepts.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the run.
    fn spec(&self, logger: &LogEmitter) -> Result<ConnectorSpecification, ConnectorError>;

    /// Verifies that the configuration at `config` can reach the upstream
    /// system.
    ///
    /// # Errors
    ///
    /// An error is reported as a FAILED connection status, not as a fatal
    /// failure.
    fn check(&self, config: &Path, logger: &LogEmitter) -> Result<(), ConnectorError>;

    /// Lists the streams available under the configuration at `config`.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the run.
    fn discover(&self, config: &Path, logger: &LogEmitter) -> Result<Catalog, ConnectorError>;

    /// Emits records and state checkpoints for every stream in `catalog`.
    ///
    /// `state` points at the checkpoint left by the previous run. Records and
    /// state are streamed through `emitter` while the call runs.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the run. Lines already emitted stay emitted.
    fn read(
        &self,
        config: &Path,
        state: &Path,
        catalog: &ConfiguredCatalog,
        emitter: &Emitter,
    ) -> Result<(), ConnectorError>;
}

/// A connector that loads records into a downstream system.
pub trait Destination {
    /// Describes the configuration the connector accepts.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the run.
    fn spec(&self, logger: &LogEmitter) -> Result<ConnectorSpecification, ConnectorError>;

    /// Verifies that the configuration at `config` can reach the downstream
    /// system.
    ///
    /// # Errors
    ///
    /// An error is reported as a FAILED connection status.
    fn check(&self, config: &Path, logger: &LogEmitter) -> Result<(), ConnectorError>;

    /// Loads data for the streams in `catalog`.
    ///
    /// # Errors
    ///
    /// An error is reported as a FAILED connection status.
    fn write(
        &self,
        config: &Path,
        catalog: &ConfiguredCatalog,
        emitter: &Emitter,
    ) -> Result<(), ConnectorError>;
}
