//! Capabilities handed to connector code for producing protocol output.
//!
//! Connectors never see the sink. `read` and `write` receive an [`Emitter`]
//! with three operations: log, record and state. `spec`, `check` and `discover`
//! receive the narrower [`LogEmitter`]. Every emitter built by a runner
//! shares that runner's [`SafeWriter`], so messages from one thread appear in
//! call order and messages from concurrent threads appear in lock order.

use serde::Serialize;
use time::OffsetDateTime;
use tributary_protocol::{LogLevel, Message, MessageError};

use crate::error::WriteError;
use crate::writer::SafeWriter;

/// Log, record and state emission bound to a shared writer.
///
/// `Emitter` is cheap to clone and is `Send + Sync`, so a connector can hand
/// it to worker threads that read several streams in parallel.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tributary_protocol::LogLevel;
/// use tributary_runtime::{Emitter, SafeWriter};
///
/// # fn main() -> Result<(), tributary_runtime::WriteError> {
/// let emitter = Emitter::new(SafeWriter::new(std::io::sink()));
/// emitter.log(LogLevel::Info, "starting users")?;
/// emitter.record(&json!({"id": 1}), "users", "crm")?;
/// emitter.state(&json!({"users": 1}))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Emitter {
    writer: SafeWriter,
}

impl Emitter {
    /// Binds an emitter to a writer.
    #[must_use]
    pub const fn new(writer: SafeWriter) -> Self {
        Self { writer }
    }

    /// Emits a protocol log line.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] if the sink fails.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> Result<(), WriteError> {
        self.writer.write_message(&Message::log(level, message))
    }

    /// Emits one record for `stream` in `namespace`.
    ///
    /// The record is stamped with the current UTC time, in milliseconds, at
    /// the moment of the call.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Encode`] if `data` cannot be represented as JSON
    /// (nothing is written), or [`WriteError::Io`] if the sink fails.
    pub fn record<T>(&self, data: &T, stream: &str, namespace: &str) -> Result<(), WriteError>
    where
        T: Serialize + ?Sized,
    {
        let value = to_json(data)?;
        let message = Message::record(stream, namespace, value, now_millis());
        self.writer.write_message(&message)
    }

    /// Emits a state checkpoint.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Encode`] if `data` cannot be represented as JSON
    /// (nothing is written), or [`WriteError::Io`] if the sink fails.
    pub fn state<T>(&self, data: &T) -> Result<(), WriteError>
    where
        T: Serialize + ?Sized,
    {
        let value = to_json(data)?;
        self.writer.write_message(&Message::state(value))
    }

    /// Returns a log-only view sharing this emitter's writer.
    #[must_use]
    pub fn logger(&self) -> LogEmitter {
        LogEmitter {
            writer: self.writer.clone(),
        }
    }

    pub(crate) const fn writer(&self) -> &SafeWriter {
        &self.writer
    }
}

/// Log-only emission, given to verbs that must not produce records or state.
#[derive(Debug, Clone)]
pub struct LogEmitter {
    writer: SafeWriter,
}

impl LogEmitter {
    /// Binds a log emitter to a writer.
    #[must_use]
    pub const fn new(writer: SafeWriter) -> Self {
        Self { writer }
    }

    /// Emits a protocol log line.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] if the sink fails.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> Result<(), WriteError> {
        self.writer.write_message(&Message::log(level, message))
    }
}

/// Returns the current UTC time in Unix milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos.div_euclid(1_000_000)).unwrap_or(i64::MAX)
}

fn to_json<T: Serialize + ?Sized>(data: &T) -> Result<serde_json::Value, WriteError> {
    serde_json::to_value(data)
        .map_err(|source| WriteError::Encode(MessageError::Serialize(source)))
}
