//! Errors raised while scanning the stream directory.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures specific to the file source.
#[derive(Debug, Error)]
pub enum FileSourceError {
    /// The configured directory is missing or is not a directory.
    #[error("'{path}' is not a readable directory")]
    NotADirectory {
        /// Configured directory.
        path: Utf8PathBuf,
    },

    /// The directory could not be listed.
    #[error("failed to list '{path}': {source}")]
    ListDirectory {
        /// Configured directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// A stream file could not be read.
    #[error("failed to read stream '{stream}' from '{path}': {source}")]
    ReadStream {
        /// Stream name.
        stream: String,
        /// File backing the stream.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The catalog names a stream the directory does not contain.
    #[error("stream '{stream}' is not a file in '{directory}'")]
    UnknownStream {
        /// Stream name from the configured catalog.
        stream: String,
        /// Configured directory.
        directory: Utf8PathBuf,
    },

    /// A stream file does not hold a JSON array of objects.
    #[error("stream '{stream}' is not a JSON array of objects: {source}")]
    ParseStream {
        /// Stream name.
        stream: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
