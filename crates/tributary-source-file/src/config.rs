//! Connector configuration and checkpoint state.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Contents of the `--config` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSourceConfig {
    /// Directory holding one `<stream>.json` file per stream.
    pub directory: Utf8PathBuf,
    /// Namespace for streams whose catalog entry declares none.
    #[serde(default)]
    pub namespace: String,
}

/// Checkpoint emitted after each stream and read back from `--state`.
///
/// Counts are the number of objects seen in each stream file. An incremental
/// read skips that many objects from the start of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileState {
    /// Objects seen per stream name.
    #[serde(default)]
    pub streams: BTreeMap<String, u64>,
}

impl FileState {
    /// Returns how many objects of `stream` were already synced.
    #[must_use]
    pub fn position(&self, stream: &str) -> usize {
        self.streams
            .get(stream)
            .map_or(0, |count| usize::try_from(*count).unwrap_or(usize::MAX))
    }

    /// Records that `stream` now holds `count` objects.
    pub fn advance(&mut self, stream: &str, count: usize) {
        let stored = u64::try_from(count).unwrap_or(u64::MAX);
        self.streams.insert(stream.to_owned(), stored);
    }
}
