//! Runtime error taxonomy.
//!
//! Failures split into two channels. Verbs that report a health signal
//! (`check`, `write`) turn connector errors into a FAILED status message and
//! exit cleanly; those never become a [`RunError`]. Everything else that goes
//! wrong is a [`RunError`] and ends the process with a non-zero status. I/O
//! errors are wrapped in `Arc` to keep the enums small.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tributary_protocol::MessageError;

use crate::cli::Verb;
use crate::connector::ConnectorError;

/// Exit status for fatal verb failures.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status for malformed command lines, matching clap's convention.
pub const EXIT_USAGE: u8 = 2;

/// The output sink rejected a message.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Writing or flushing the sink failed.
    #[error("failed to write protocol message: {0}")]
    Io(#[source] Arc<io::Error>),

    /// The message could not be encoded; nothing was written.
    #[error("failed to encode protocol message: {0}")]
    Encode(#[source] MessageError),
}

/// A required input file could not be loaded.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The file contents did not match the expected structure.
    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Fatal outcome of a connector run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A verb that must produce a structural artefact (`spec`, `discover`)
    /// or a record stream (`read`) failed inside the connector.
    #[error("{verb} failed: {source}")]
    Structural {
        /// Verb that was executing.
        verb: Verb,
        /// Error returned by the connector.
        #[source]
        source: ConnectorError,
    },

    /// A required input file could not be loaded.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The output sink failed.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// The command line was malformed, or help/version output was requested.
    #[error("{0}")]
    Usage(clap::Error),
}

impl RunError {
    /// Returns the process exit status for this failure.
    ///
    /// Usage errors defer to clap, which reports `0` for `--help` and
    /// `--version` and [`EXIT_USAGE`] otherwise.
    #[must_use]
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Usage(error) => u8::try_from(error.exit_code()).unwrap_or(EXIT_USAGE),
            Self::Structural { .. } | Self::Input(_) | Self::Write(_) => EXIT_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests;
