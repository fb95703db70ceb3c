//! Record, state, log and connection status payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One data item read from a source stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMessage {
    emitted_at: i64,
    #[serde(default)]
    namespace: String,
    data: serde_json::Value,
    stream: String,
}

impl RecordMessage {
    /// Creates a record stamped with `emitted_at` (Unix milliseconds).
    #[must_use]
    pub fn new(
        stream: impl Into<String>,
        namespace: impl Into<String>,
        data: serde_json::Value,
        emitted_at: i64,
    ) -> Self {
        Self {
            emitted_at,
            namespace: namespace.into(),
            data,
            stream: stream.into(),
        }
    }

    /// Returns the emission time in Unix milliseconds.
    #[must_use]
    pub const fn emitted_at(&self) -> i64 {
        self.emitted_at
    }

    /// Returns the stream namespace.
    #[must_use]
    pub const fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    /// Returns the stream name.
    #[must_use]
    pub const fn stream(&self) -> &str {
        self.stream.as_str()
    }

    /// Returns the record data.
    #[must_use]
    pub const fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

/// An opaque checkpoint the orchestrator persists and replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    #[serde(default)]
    data: serde_json::Value,
}

impl StateMessage {
    /// Wraps checkpoint data.
    #[must_use]
    pub const fn new(data: serde_json::Value) -> Self {
        Self { data }
    }

    /// Returns the checkpoint data.
    #[must_use]
    pub const fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Consumes the message and returns the checkpoint data.
    #[must_use]
    pub fn into_data(self) -> serde_json::Value {
        self.data
    }
}

/// Severity of a protocol log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// The connector cannot continue.
    Fatal,
    /// An operation failed.
    Error,
    /// Something unexpected that did not stop the run.
    Warn,
    /// Normal progress.
    Info,
    /// Detail for troubleshooting.
    Debug,
    /// Fine-grained detail.
    Trace,
}

impl LogLevel {
    /// Returns the wire value of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A log line addressed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    level: LogLevel,
    message: String,
}

impl LogMessage {
    /// Creates a log line.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Returns the severity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns the text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Result of a connection check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    /// The connector can reach its data system.
    Succeeded,
    /// The check or write failed; see the accompanying message.
    Failed,
}

/// Connection check outcome; the message is present only on failure.
///
/// # Example
///
/// ```
/// use tributary_protocol::{CheckStatus, ConnectionStatus};
///
/// let failed = ConnectionStatus::failed("bad key");
/// assert_eq!(failed.status(), CheckStatus::Failed);
/// assert_eq!(failed.message(), Some("bad key"));
/// assert_eq!(ConnectionStatus::succeeded().message(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ConnectionStatus {
    /// Creates a successful status.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            status: CheckStatus::Succeeded,
            message: None,
        }
    }

    /// Creates a failed status carrying the failure text.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Failed,
            message: Some(message.into()),
        }
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> CheckStatus {
        self.status
    }

    /// Returns the failure text, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
