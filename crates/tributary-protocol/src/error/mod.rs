//! Errors raised while encoding or decoding protocol messages.

use thiserror::Error;

use crate::message::MessageType;

/// Errors arising from the message envelope codec.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The payload slots of a decoded envelope disagree with its `type`.
    ///
    /// A valid envelope carries exactly the one payload named by its
    /// discriminant. `found` lists every payload slot that was populated.
    #[error("message of type {expected} must carry exactly one '{key}' payload, found {found:?}", key = .expected.payload_key())]
    InvalidPayload {
        /// Discriminant declared by the envelope.
        expected: MessageType,
        /// Payload kinds actually present on the wire.
        found: Vec<MessageType>,
    },

    /// The line was not a JSON object in the envelope shape.
    #[error("malformed message line: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A payload could not be rendered as JSON.
    #[error("failed to serialise message: {0}")]
    Serialize(#[source] serde_json::Error),
}
