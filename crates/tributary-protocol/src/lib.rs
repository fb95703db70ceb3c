//! Wire types for the Tributary connector protocol.
//!
//! A connector is a short-lived process launched by a host orchestrator. The
//! orchestrator invokes one verb (`spec`, `check`, `discover`, `read` or
//! `write`) and consumes newline-delimited JSON from the connector's standard
//! output. Every line is one [`Message`] envelope carrying exactly one payload.
//!
//! This crate holds the data side of that exchange:
//!
//! - [`schema`]: the JSON-Schema-like property tree used in connector
//!   specifications and stream catalogs.
//! - [`catalog`]: discovered streams and the orchestrator-selected sync plan.
//! - [`spec`]: static connector metadata returned by the `spec` verb.
//! - [`message`]: the eight-variant envelope and its line codec.
//!
//! I/O is deliberately absent; `tributary-runtime` owns the output sink.
//!
//! # Example
//!
//! ```
//! use tributary_protocol::{Message, MessageType};
//!
//! let message = Message::state(serde_json::json!({"cursor": 42}));
//! let line = message.encode().unwrap();
//! let text = String::from_utf8(line).unwrap();
//! assert_eq!(text, r#"{"type":"STATE","state":{"data":{"cursor":42}}}"#);
//!
//! let decoded = Message::decode(&text).unwrap();
//! assert_eq!(decoded.kind(), MessageType::State);
//! ```

pub mod catalog;
pub mod error;
pub mod message;
pub mod schema;
pub mod spec;

pub use self::catalog::{
    Catalog, ConfiguredCatalog, ConfiguredStream, DestinationSyncMode, Stream, SyncMode,
};
pub use self::error::MessageError;
pub use self::message::{
    CheckStatus, ConnectionStatus, ConnectorConfig, ControlMessage, ControlType, ErrorTrace,
    EstimateTrace, EstimateType, FailureType, LogLevel, LogMessage, Message, MessageType,
    RecordMessage, StateMessage, TraceMessage, TraceType,
};
pub use self::schema::{ExtendedType, FormatType, Properties, PropertySpec, PropertyType, PropType};
pub use self::spec::{ConnectionSpecification, ConnectorSpecification};
