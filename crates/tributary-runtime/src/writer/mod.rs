//! The mutually exclusive output sink shared by every message producer.
//!
//! Connector code may emit from many threads at once. [`SafeWriter`] holds
//! the sink behind a mutex and writes each message as one complete line
//! (payload, terminator, flush) while holding the lock, so lines never
//! interleave and the orchestrator sees each message as soon as it is
//! written.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;
use tributary_protocol::Message;

use crate::error::WriteError;

/// Tracing target for sink operations.
const WRITER_TARGET: &str = "tributary_runtime::writer";

type Sink = Box<dyn Write + Send>;

/// Cloneable handle to a single line-oriented output sink.
///
/// # Example
///
/// ```
/// use tributary_protocol::Message;
/// use tributary_runtime::SafeWriter;
///
/// let writer = SafeWriter::new(std::io::sink());
/// writer
///     .write_message(&Message::state(serde_json::json!({})))
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SafeWriter {
    sink: Arc<Mutex<Sink>>,
}

impl SafeWriter {
    /// Wraps a sink. The sink lives as long as the last clone of the handle.
    #[must_use]
    pub fn new<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    /// Wraps the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Encodes a message and writes it as one line.
    ///
    /// Encoding happens before the lock is taken, so an encoding failure
    /// leaves the sink untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Encode`] if the message cannot be encoded, or
    /// [`WriteError::Io`] if the sink fails.
    pub fn write_message(&self, message: &Message) -> Result<(), WriteError> {
        let line = message.encode().map_err(WriteError::Encode)?;
        trace!(
            target: WRITER_TARGET,
            kind = %message.kind(),
            bytes = line.len(),
            "writing protocol message"
        );
        self.write_line(&line)
    }

    /// Writes `line` followed by a newline and flushes, holding the lock for
    /// the whole sequence.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Io`] if writing or flushing fails. There is no
    /// retry.
    pub fn write_line(&self, line: &[u8]) -> Result<(), WriteError> {
        // Poisoning only means another producer panicked between lines.
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(line).map_err(io_error)?;
        sink.write_all(b"\n").map_err(io_error)?;
        sink.flush().map_err(io_error)
    }
}

impl fmt::Debug for SafeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeWriter").finish_non_exhaustive()
    }
}

fn io_error(error: io::Error) -> WriteError {
    WriteError::Io(Arc::new(error))
}
