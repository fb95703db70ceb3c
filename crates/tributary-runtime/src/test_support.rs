//! In-memory output capture for testing connectors.
//!
//! Enabled by the `test-support` feature. [`CapturedOutput`] is a cloneable
//! byte sink: hand [`CapturedOutput::writer`] to an [`Emitter`] or runner and
//! inspect the emitted lines afterwards.
//!
//! [`Emitter`]: crate::Emitter

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tributary_protocol::{Message, MessageError};

use crate::writer::SafeWriter;

/// Shared in-memory buffer implementing [`Write`].
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a [`SafeWriter`] appending to this capture.
    #[must_use]
    pub fn writer(&self) -> SafeWriter {
        SafeWriter::new(self.clone())
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Returns the captured lines without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_owned).collect()
    }

    /// Decodes every captured line as a protocol message.
    ///
    /// # Errors
    ///
    /// Returns the first decoding error encountered.
    pub fn messages(&self) -> Result<Vec<Message>, MessageError> {
        self.text().lines().map(Message::decode).collect()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
