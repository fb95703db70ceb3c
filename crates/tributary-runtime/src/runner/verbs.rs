//! Per-verb outcome mapping shared by source and destination runners.
//!
//! Each function invokes one connector capability and translates its result
//! into protocol output and a [`VerbOutcome`] or [`RunError`].

use tracing::{debug, warn};
use tributary_protocol::{
    Catalog, ConnectionStatus, ConnectorSpecification, LogLevel, Message,
};

use super::{RUNNER_TARGET, VerbOutcome};
use crate::cli::Verb;
use crate::connector::ConnectorError;
use crate::emitter::{Emitter, LogEmitter};
use crate::error::RunError;

/// Emits the specification, or an ERROR log followed by a fatal error.
pub(super) fn spec<F>(emitter: &Emitter, call: F) -> Result<VerbOutcome, RunError>
where
    F: FnOnce(&LogEmitter) -> Result<ConnectorSpecification, ConnectorError>,
{
    let logger = emitter.logger();
    match call(&logger) {
        Ok(specification) => {
            emitter.writer().write_message(&Message::spec(specification))?;
            Ok(VerbOutcome::Succeeded)
        }
        Err(source) => {
            logger.log(LogLevel::Error, format!("failed: {source}"))?;
            Err(RunError::Structural {
                verb: Verb::Spec,
                source,
            })
        }
    }
}

/// Emits the discovered catalog. Failures are fatal and emit nothing.
pub(super) fn discover<F>(emitter: &Emitter, call: F) -> Result<VerbOutcome, RunError>
where
    F: FnOnce(&LogEmitter) -> Result<Catalog, ConnectorError>,
{
    let catalog = call(&emitter.logger()).map_err(|source| RunError::Structural {
        verb: Verb::Discover,
        source,
    })?;
    debug!(
        target: RUNNER_TARGET,
        streams = catalog.streams.len(),
        "discovered catalog"
    );
    emitter.writer().write_message(&Message::catalog(catalog))?;
    Ok(VerbOutcome::Succeeded)
}

/// Streams records through the connector. A failure is fatal and leaves the
/// lines already emitted as the only output.
pub(super) fn read<F>(emitter: &Emitter, call: F) -> Result<VerbOutcome, RunError>
where
    F: FnOnce(&Emitter) -> Result<(), ConnectorError>,
{
    call(emitter).map_err(|source| RunError::Structural {
        verb: Verb::Read,
        source,
    })?;
    Ok(VerbOutcome::Succeeded)
}

/// Reports a health-signal verb (`check`, `write`) as a connection status.
///
/// A connector error becomes a FAILED status on stdout and a clean
/// [`VerbOutcome::StatusFailure`].
pub(super) fn status(
    emitter: &Emitter,
    verb: Verb,
    result: Result<(), ConnectorError>,
) -> Result<VerbOutcome, RunError> {
    match result {
        Ok(()) => {
            emitter
                .writer()
                .write_message(&Message::connection_status(ConnectionStatus::succeeded()))?;
            Ok(VerbOutcome::Succeeded)
        }
        Err(error) => {
            let message = error.to_string();
            warn!(
                target: RUNNER_TARGET,
                verb = %verb,
                error = %message,
                "connector reported failure status"
            );
            emitter
                .writer()
                .write_message(&Message::connection_status(ConnectionStatus::failed(
                    message.clone(),
                )))?;
            Ok(VerbOutcome::StatusFailure { message })
        }
    }
}
