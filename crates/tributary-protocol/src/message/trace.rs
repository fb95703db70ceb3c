//! Trace and control payloads.

use serde::{Deserialize, Serialize};

/// Kind of trace carried by a [`TraceMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TraceType {
    /// A structured error report.
    Error,
    /// A progress estimate.
    Estimate,
}

/// Error or estimate trace addressed to the orchestrator.
///
/// Exactly one of `error` and `estimate` is set by the constructors, matching
/// the trace type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceMessage {
    #[serde(rename = "type")]
    kind: TraceType,
    emitted_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorTrace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimate: Option<EstimateTrace>,
}

impl TraceMessage {
    /// Creates an error trace.
    #[must_use]
    pub const fn error(error: ErrorTrace, emitted_at: i64) -> Self {
        Self {
            kind: TraceType::Error,
            emitted_at,
            error: Some(error),
            estimate: None,
        }
    }

    /// Creates an estimate trace.
    #[must_use]
    pub const fn estimate(estimate: EstimateTrace, emitted_at: i64) -> Self {
        Self {
            kind: TraceType::Estimate,
            emitted_at,
            error: None,
            estimate: Some(estimate),
        }
    }

    /// Returns the trace type.
    #[must_use]
    pub const fn kind(&self) -> TraceType {
        self.kind
    }

    /// Returns the emission time in Unix milliseconds.
    #[must_use]
    pub const fn emitted_at(&self) -> i64 {
        self.emitted_at
    }

    /// Returns the error report, if this is an error trace.
    #[must_use]
    pub const fn error_details(&self) -> Option<&ErrorTrace> {
        self.error.as_ref()
    }

    /// Returns the estimate, if this is an estimate trace.
    #[must_use]
    pub const fn estimate_details(&self) -> Option<&EstimateTrace> {
        self.estimate.as_ref()
    }
}

/// Who is at fault for an error trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    /// A fault in the connector or the systems it talks to.
    SystemError,
    /// A fault in the operator-provided configuration.
    ConfigError,
}

/// Structured error report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorTrace {
    /// User-facing description.
    pub message: String,
    /// Technical description for maintainers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_message: Option<String>,
    /// Captured backtrace text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    /// Fault attribution.
    pub failure_type: FailureType,
}

impl ErrorTrace {
    /// Creates an error report without internal detail.
    #[must_use]
    pub fn new(message: impl Into<String>, failure_type: FailureType) -> Self {
        Self {
            message: message.into(),
            internal_message: None,
            stack_trace: None,
            failure_type,
        }
    }

    /// Attaches an internal message.
    #[must_use]
    pub fn with_internal_message(mut self, message: impl Into<String>) -> Self {
        self.internal_message = Some(message.into());
        self
    }
}

/// Scope of an [`EstimateTrace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EstimateType {
    /// Estimate for a single stream.
    Stream,
    /// Estimate for the whole sync.
    Sync,
}

/// Expected volume of a stream or sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateTrace {
    /// Stream name, empty for sync-wide estimates.
    #[serde(default)]
    pub name: String,
    /// Estimate scope.
    #[serde(rename = "type")]
    pub kind: EstimateType,
    /// Stream namespace.
    #[serde(default)]
    pub namespace: String,
    /// Expected number of records.
    #[serde(default)]
    pub row_estimate: u64,
    /// Expected number of bytes.
    #[serde(default)]
    pub byte_estimate: u64,
}

/// Kind of instruction carried by a [`ControlMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlType {
    /// Asks the orchestrator to persist an updated connector configuration.
    ConnectorConfig,
}

/// Configuration the connector wants persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// The full replacement configuration.
    pub config: serde_json::Value,
}

/// Instruction for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlMessage {
    #[serde(rename = "type")]
    kind: ControlType,
    emitted_at: i64,
    #[serde(rename = "connectorConfig")]
    connector_config: ConnectorConfig,
}

impl ControlMessage {
    /// Creates a connector configuration update, for example after a token
    /// refresh.
    #[must_use]
    pub const fn connector_config(config: serde_json::Value, emitted_at: i64) -> Self {
        Self {
            kind: ControlType::ConnectorConfig,
            emitted_at,
            connector_config: ConnectorConfig { config },
        }
    }

    /// Returns the control type.
    #[must_use]
    pub const fn kind(&self) -> ControlType {
        self.kind
    }

    /// Returns the emission time in Unix milliseconds.
    #[must_use]
    pub const fn emitted_at(&self) -> i64 {
        self.emitted_at
    }

    /// Returns the configuration carried by the instruction.
    #[must_use]
    pub const fn config(&self) -> &serde_json::Value {
        &self.connector_config.config
    }
}
