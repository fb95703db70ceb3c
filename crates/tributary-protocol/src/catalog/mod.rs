//! Stream catalogs.
//!
//! A [`Catalog`] is everything a source can expose, returned by `discover`.
//! A [`ConfiguredCatalog`] is the subset the orchestrator selected, annotated
//! with sync parameters, and is the authoritative plan handed to `read` and
//! `write`.

use serde::{Deserialize, Serialize};

use crate::schema::Properties;

/// How a stream is read from the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Re-read everything on each run.
    #[default]
    FullRefresh,
    /// Resume from the last emitted state.
    Incremental,
}

/// How a destination applies incoming records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationSyncMode {
    /// Add records to existing data.
    #[default]
    Append,
    /// Replace existing data with the synced records.
    Overwrite,
}

/// The full set of streams a source exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Streams in the order the connector reported them.
    pub streams: Vec<Stream>,
}

impl Catalog {
    /// Creates a catalog from streams.
    #[must_use]
    pub const fn new(streams: Vec<Stream>) -> Self {
        Self { streams }
    }

    /// Returns the stream names in catalog order.
    pub fn stream_names(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|stream| stream.name.as_str())
    }
}

/// A named, schema-typed collection of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    /// Stream name, unique within its namespace.
    pub name: String,
    /// Schema of each record's `data`.
    pub json_schema: Properties,
    /// Sync modes the source can honour for this stream.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_sync_modes: Vec<SyncMode>,
    /// True when the source decides the cursor itself.
    #[serde(default, skip_serializing_if = "is_false")]
    pub source_defined_cursor: bool,
    /// Field path used as the cursor when the operator picks none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_cursor_field: Vec<String>,
    /// Field paths forming the primary key, as chosen by the source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_defined_primary_key: Vec<Vec<String>>,
    /// Namespace (schema, database, bucket) the stream lives in.
    #[serde(default)]
    pub namespace: String,
}

impl Stream {
    /// Creates a stream with the given name, namespace and schema.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        json_schema: Properties,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            json_schema,
            ..Self::default()
        }
    }

    /// Sets the supported sync modes.
    #[must_use]
    pub fn with_sync_modes(mut self, modes: impl IntoIterator<Item = SyncMode>) -> Self {
        self.supported_sync_modes = modes.into_iter().collect();
        self
    }

    /// Declares a source-defined cursor on the given field path.
    #[must_use]
    pub fn with_source_cursor(mut self, field: impl IntoIterator<Item = String>) -> Self {
        self.source_defined_cursor = true;
        self.default_cursor_field = field.into_iter().collect();
        self
    }

    /// Sets the source-defined primary key.
    #[must_use]
    pub fn with_primary_key(mut self, key: Vec<Vec<String>>) -> Self {
        self.source_defined_primary_key = key;
        self
    }

    /// Returns true when the stream supports the given sync mode.
    #[must_use]
    pub fn supports(&self, mode: SyncMode) -> bool {
        self.supported_sync_modes.contains(&mode)
    }
}

/// Streams selected for a sync, with their sync parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    /// Selected streams.
    pub streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Creates a configured catalog from streams.
    #[must_use]
    pub const fn new(streams: Vec<ConfiguredStream>) -> Self {
        Self { streams }
    }

    /// Finds a configured stream by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ConfiguredStream> {
        self.streams
            .iter()
            .find(|configured| configured.stream.name == name)
    }
}

/// One stream selected for a sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredStream {
    /// The stream as discovered.
    pub stream: Stream,
    /// Sync mode chosen by the operator.
    pub sync_mode: SyncMode,
    /// Cursor field path for incremental syncs.
    #[serde(default)]
    pub cursor_field: Vec<String>,
    /// How the destination applies the records.
    #[serde(default)]
    pub destination_sync_mode: DestinationSyncMode,
    /// Primary key field paths.
    #[serde(default)]
    pub primary_key: Vec<Vec<String>>,
}

impl ConfiguredStream {
    /// Selects a stream with the given sync mode and default parameters.
    #[must_use]
    pub fn new(stream: Stream, sync_mode: SyncMode) -> Self {
        Self {
            stream,
            sync_mode,
            ..Self::default()
        }
    }

    /// Sets the destination sync mode.
    #[must_use]
    pub const fn with_destination_sync_mode(mut self, mode: DestinationSyncMode) -> Self {
        self.destination_sync_mode = mode;
        self
    }

    /// Returns the stream name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.stream.name.as_str()
    }
}

// serde hands `skip_serializing_if` predicates a reference.
const fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests;
