//! The message envelope and its line codec.
//!
//! Every line a connector writes to stdout is one envelope:
//!
//! ```json
//! {"type":"RECORD","record":{"emitted_at":1700000000000,"namespace":"crm","data":{},"stream":"users"}}
//! ```
//!
//! The `type` discriminant names exactly one payload key. All other payload
//! keys are absent, never `null`. [`Message`] is a closed enum with one payload
//! per variant, so an envelope built in Rust cannot violate that rule.
//! [`Message::decode`] re-checks it for lines arriving from elsewhere and
//! reports [`MessageError::InvalidPayload`] on mismatch.

mod payload;
mod trace;

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::Catalog;
use crate::error::MessageError;
use crate::spec::ConnectorSpecification;

pub use self::payload::{
    CheckStatus, ConnectionStatus, LogLevel, LogMessage, RecordMessage, StateMessage,
};
pub use self::trace::{
    ConnectorConfig, ControlMessage, ControlType, ErrorTrace, EstimateTrace, EstimateType,
    FailureType, TraceMessage, TraceType,
};

/// Discriminant carried in the envelope's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    /// A data record read from a stream.
    Record,
    /// A checkpoint for incremental resumption.
    State,
    /// A log line for the orchestrator.
    Log,
    /// The connector specification.
    Spec,
    /// The outcome of a connection check.
    ConnectionStatus,
    /// The discovered stream catalog.
    Catalog,
    /// An error or progress trace.
    Trace,
    /// A control instruction for the orchestrator.
    Control,
}

impl MessageType {
    /// All discriminants in wire order.
    pub const ALL: [Self; 8] = [
        Self::Record,
        Self::State,
        Self::Log,
        Self::Spec,
        Self::ConnectionStatus,
        Self::Catalog,
        Self::Trace,
        Self::Control,
    ];

    /// Returns the JSON key holding this type's payload.
    #[must_use]
    pub const fn payload_key(self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::State => "state",
            Self::Log => "log",
            Self::Spec => "spec",
            Self::ConnectionStatus => "connectionStatus",
            Self::Catalog => "catalog",
            Self::Trace => "trace",
            Self::Control => "control",
        }
    }

    /// Returns the wire value of the discriminant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Record => "RECORD",
            Self::State => "STATE",
            Self::Log => "LOG",
            Self::Spec => "SPEC",
            Self::ConnectionStatus => "CONNECTION_STATUS",
            Self::Catalog => "CATALOG",
            Self::Trace => "TRACE",
            Self::Control => "CONTROL",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One protocol message.
///
/// Serialisation writes `type` followed by the single payload key. Decoding
/// goes through [`Message::decode`] (or `serde` directly), which rejects
/// envelopes whose payload slots disagree with `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireMessage")]
pub enum Message {
    /// See [`RecordMessage`].
    Record(RecordMessage),
    /// See [`StateMessage`].
    State(StateMessage),
    /// See [`LogMessage`].
    Log(LogMessage),
    /// See [`ConnectorSpecification`].
    Spec(ConnectorSpecification),
    /// See [`ConnectionStatus`].
    ConnectionStatus(ConnectionStatus),
    /// See [`Catalog`].
    Catalog(Catalog),
    /// See [`TraceMessage`].
    Trace(TraceMessage),
    /// See [`ControlMessage`].
    Control(ControlMessage),
}

impl Message {
    /// Creates a record message.
    #[must_use]
    pub fn record(
        stream: impl Into<String>,
        namespace: impl Into<String>,
        data: serde_json::Value,
        emitted_at: i64,
    ) -> Self {
        Self::Record(RecordMessage::new(stream, namespace, data, emitted_at))
    }

    /// Creates a state message.
    #[must_use]
    pub const fn state(data: serde_json::Value) -> Self {
        Self::State(StateMessage::new(data))
    }

    /// Creates a log message.
    #[must_use]
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log(LogMessage::new(level, message))
    }

    /// Creates a spec message.
    #[must_use]
    pub const fn spec(spec: ConnectorSpecification) -> Self {
        Self::Spec(spec)
    }

    /// Creates a connection status message.
    #[must_use]
    pub const fn connection_status(status: ConnectionStatus) -> Self {
        Self::ConnectionStatus(status)
    }

    /// Creates a catalog message.
    #[must_use]
    pub const fn catalog(catalog: Catalog) -> Self {
        Self::Catalog(catalog)
    }

    /// Creates a trace message.
    #[must_use]
    pub const fn trace(trace: TraceMessage) -> Self {
        Self::Trace(trace)
    }

    /// Creates a control message.
    #[must_use]
    pub const fn control(control: ControlMessage) -> Self {
        Self::Control(control)
    }

    /// Returns the envelope discriminant.
    #[must_use]
    pub const fn kind(&self) -> MessageType {
        match self {
            Self::Record(_) => MessageType::Record,
            Self::State(_) => MessageType::State,
            Self::Log(_) => MessageType::Log,
            Self::Spec(_) => MessageType::Spec,
            Self::ConnectionStatus(_) => MessageType::ConnectionStatus,
            Self::Catalog(_) => MessageType::Catalog,
            Self::Trace(_) => MessageType::Trace,
            Self::Control(_) => MessageType::Control,
        }
    }

    /// Serialises the envelope as one JSON object without a line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Serialize`] if a payload cannot be rendered as
    /// JSON. Nothing is returned in that case, so no partial line can reach
    /// a sink.
    pub fn encode(&self) -> Result<Vec<u8>, MessageError> {
        serde_json::to_vec(self).map_err(MessageError::Serialize)
    }

    /// Parses one envelope line.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Malformed`] if the line is not an envelope
    /// object, or [`MessageError::InvalidPayload`] if the populated payload
    /// slots do not match `type`.
    pub fn decode(line: &str) -> Result<Self, MessageError> {
        let wire: WireMessage = serde_json::from_str(line).map_err(MessageError::Malformed)?;
        Self::try_from(wire)
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", &kind)?;
        let key = kind.payload_key();
        match self {
            Self::Record(payload) => map.serialize_entry(key, payload)?,
            Self::State(payload) => map.serialize_entry(key, payload)?,
            Self::Log(payload) => map.serialize_entry(key, payload)?,
            Self::Spec(payload) => map.serialize_entry(key, payload)?,
            Self::ConnectionStatus(payload) => map.serialize_entry(key, payload)?,
            Self::Catalog(payload) => map.serialize_entry(key, payload)?,
            Self::Trace(payload) => map.serialize_entry(key, payload)?,
            Self::Control(payload) => map.serialize_entry(key, payload)?,
        }
        map.end()
    }
}

/// The envelope as it appears on the wire: a discriminant and eight optional
/// payload slots.
#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(rename = "type")]
    kind: MessageType,
    #[serde(default)]
    record: Option<RecordMessage>,
    #[serde(default)]
    state: Option<StateMessage>,
    #[serde(default)]
    log: Option<LogMessage>,
    #[serde(default)]
    spec: Option<ConnectorSpecification>,
    #[serde(rename = "connectionStatus", default)]
    connection_status: Option<ConnectionStatus>,
    #[serde(default)]
    catalog: Option<Catalog>,
    #[serde(default)]
    trace: Option<TraceMessage>,
    #[serde(default)]
    control: Option<ControlMessage>,
}

impl TryFrom<WireMessage> for Message {
    type Error = MessageError;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        let WireMessage {
            kind,
            record,
            state,
            log,
            spec,
            connection_status,
            catalog,
            trace,
            control,
        } = wire;

        let mut payloads: Vec<Self> = [
            record.map(Self::Record),
            state.map(Self::State),
            log.map(Self::Log),
            spec.map(Self::Spec),
            connection_status.map(Self::ConnectionStatus),
            catalog.map(Self::Catalog),
            trace.map(Self::Trace),
            control.map(Self::Control),
        ]
        .into_iter()
        .flatten()
        .collect();

        let found: Vec<MessageType> = payloads.iter().map(Self::kind).collect();
        match (payloads.pop(), payloads.is_empty()) {
            (Some(message), true) if message.kind() == kind => Ok(message),
            _ => Err(MessageError::InvalidPayload {
                expected: kind,
                found,
            }),
        }
    }
}
