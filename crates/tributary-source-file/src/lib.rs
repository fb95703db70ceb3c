//! Reference source connector reading JSON files from a directory.
//!
//! Every `<name>.json` file in the configured directory is one stream. A file
//! holds a JSON array of objects, and each object becomes one record. The
//! checkpoint counts the objects seen per stream, so an incremental read only
//! emits objects appended since the previous sync.

pub mod config;
pub mod error;
pub mod infer;

#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use tracing::{debug, info};
use tributary_protocol::{
    Catalog, ConfiguredCatalog, ConfiguredStream, ConnectionSpecification, ConnectorSpecification, LogLevel,
    PropType, Properties, PropertySpec, Stream, SyncMode,
};
use tributary_runtime::{
    ConnectorError, Emitter, LogEmitter, Source, load_json, load_json_or_default,
};

pub use self::config::{FileSourceConfig, FileState};
pub use self::error::FileSourceError;

const SOURCE_TARGET: &str = "tributary_source_file";

/// Extension of stream files.
pub const STREAM_EXTENSION: &str = "json";

/// One parsed stream file.
pub type Records = Vec<Map<String, Value>>;

/// Source connector over a directory of JSON array files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSource;

impl FileSource {
    /// Creates the connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Source for FileSource {
    fn spec(&self, _logger: &LogEmitter) -> Result<ConnectorSpecification, ConnectorError> {
        Ok(specification())
    }

    fn check(&self, config: &Path, logger: &LogEmitter) -> Result<(), ConnectorError> {
        let config: FileSourceConfig = load_json(config)?;
        logger.log(
            LogLevel::Debug,
            format!("checking directory {}", config.directory),
        )?;
        ensure_directory(&config.directory)?;
        Ok(())
    }

    fn discover(&self, config: &Path, logger: &LogEmitter) -> Result<Catalog, ConnectorError> {
        let config: FileSourceConfig = load_json(config)?;
        ensure_directory(&config.directory)?;
        let mut streams = Vec::new();
        for name in stream_names(&config.directory)? {
            let records = load_records(&config.directory, &name)?;
            let schema = records
                .first()
                .map_or_else(Properties::new, infer::infer_properties);
            if records.is_empty() {
                logger.log(
                    LogLevel::Warn,
                    format!("stream {name} is empty; its schema is unknown"),
                )?;
            }
            streams.push(
                Stream::new(name, config.namespace.as_str(), schema)
                    .with_sync_modes([SyncMode::FullRefresh, SyncMode::Incremental]),
            );
        }
        debug!(target: SOURCE_TARGET, streams = streams.len(), "discovered streams");
        Ok(Catalog::new(streams))
    }

    fn read(
        &self,
        config: &Path,
        state: &Path,
        catalog: &ConfiguredCatalog,
        emitter: &Emitter,
    ) -> Result<(), ConnectorError> {
        let config: FileSourceConfig = load_json(config)?;
        let mut checkpoint: FileState = load_json_or_default(state)?;
        ensure_known_streams(&config.directory, catalog)?;
        for configured in &catalog.streams {
            let name = configured.name();
            let records = load_records(&config.directory, name)?;
            let skip = match configured.sync_mode {
                SyncMode::Incremental => checkpoint.position(name),
                SyncMode::FullRefresh => 0,
            };
            let namespace = if configured.stream.namespace.is_empty() {
                config.namespace.as_str()
            } else {
                configured.stream.namespace.as_str()
            };
            for record in records.iter().skip(skip) {
                emitter.record(record, name, namespace)?;
            }
            checkpoint.advance(name, records.len());
            emitter.state(&checkpoint)?;
            info!(
                target: SOURCE_TARGET,
                stream = name,
                emitted = records.len().saturating_sub(skip),
                skipped = skip,
                "stream synced"
            );
        }
        Ok(())
    }
}

/// Builds the connector specification.
#[must_use]
pub fn specification() -> ConnectorSpecification {
    ConnectorSpecification::new(
        ConnectionSpecification::new(
            "File Source",
            "Reads each <stream>.json array in a directory as one stream",
        )
        .with_required(
            "directory",
            PropertySpec::new(PropType::String)
                .with_title("Directory")
                .with_description("Directory containing one JSON array file per stream")
                .with_example("/var/lib/exports"),
        )
        .with_optional(
            "namespace",
            PropertySpec::new(PropType::String)
                .with_title("Namespace")
                .with_description("Namespace assigned to discovered streams"),
        ),
    )
    .with_incremental()
}

/// Fails unless `directory` exists and is a directory.
///
/// # Errors
///
/// Returns [`FileSourceError::NotADirectory`].
pub fn ensure_directory(directory: &Utf8Path) -> Result<(), FileSourceError> {
    if directory.is_dir() {
        Ok(())
    } else {
        Err(FileSourceError::NotADirectory {
            path: directory.to_path_buf(),
        })
    }
}

/// Lists stream names in `directory`, sorted.
///
/// # Errors
///
/// Returns [`FileSourceError::ListDirectory`] if the directory cannot be
/// listed or holds a name that is not valid UTF-8.
pub fn stream_names(directory: &Utf8Path) -> Result<Vec<String>, FileSourceError> {
    let list_error = |source: io::Error| FileSourceError::ListDirectory {
        path: directory.to_path_buf(),
        source: Arc::new(source),
    };
    let mut names = Vec::new();
    for entry in directory.read_dir_utf8().map_err(list_error)? {
        let path = entry.map_err(list_error)?.into_path();
        if path.extension() != Some(STREAM_EXTENSION) || !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            names.push(stem.to_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Fails unless every configured stream is a file listed by [`stream_names`].
///
/// Catalog names are untrusted, so a name such as `../secret` never reaches
/// the filesystem.
///
/// # Errors
///
/// Returns [`FileSourceError::UnknownStream`] for the first unlisted name and
/// [`FileSourceError::ListDirectory`] if the directory cannot be listed.
pub fn ensure_known_streams(
    directory: &Utf8Path,
    catalog: &ConfiguredCatalog,
) -> Result<(), FileSourceError> {
    let known = stream_names(directory)?;
    match catalog
        .streams
        .iter()
        .map(ConfiguredStream::name)
        .find(|name| known.iter().all(|listed| listed.as_str() != *name))
    {
        Some(unknown) => Err(FileSourceError::UnknownStream {
            stream: unknown.to_owned(),
            directory: directory.to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// Reads and parses the file backing `stream`.
///
/// # Errors
///
/// Returns [`FileSourceError::ReadStream`] if the file cannot be read and
/// [`FileSourceError::ParseStream`] if it is not an array of objects.
pub fn load_records(directory: &Utf8Path, stream: &str) -> Result<Records, FileSourceError> {
    let path = stream_path(directory, stream);
    let contents = fs::read_to_string(&path).map_err(|source| FileSourceError::ReadStream {
        stream: stream.to_owned(),
        path: path.clone(),
        source: Arc::new(source),
    })?;
    serde_json::from_str(&contents).map_err(|source| FileSourceError::ParseStream {
        stream: stream.to_owned(),
        source,
    })
}

fn stream_path(directory: &Utf8Path, stream: &str) -> Utf8PathBuf {
    directory.join(format!("{stream}.{STREAM_EXTENSION}"))
}
