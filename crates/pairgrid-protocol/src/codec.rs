//! Codec trait and implementations for serializing/deserializing messages.
//!
//! A codec converts between Rust message types and the text frames the
//! transport carries. The protocol layer doesn't care which format is
//! in use — anything implementing [`Codec`] fits. [`JsonCodec`] is the
//! only implementation today: the browser client parses JSON straight
//! off the socket, and human-readable frames make debugging in browser
//! DevTools painless.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes messages to text frames and decodes frames back.
///
/// `Send + Sync + 'static` because the codec is shared across the
/// per-connection handler tasks for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into one text frame.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a text frame back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the frame is malformed,
    /// incomplete, or carries an unknown message type.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use pairgrid_protocol::{Codec, JsonCodec, ServerMessage};
///
/// let codec = JsonCodec;
///
/// let msg = ServerMessage::NextTurn { current_player: 1 };
/// let frame = codec.encode(&msg).unwrap();
/// assert_eq!(frame, r#"{"type":"next_turn","currentPlayer":1}"#);
///
/// let decoded: ServerMessage = codec.decode(&frame).unwrap();
/// assert_eq!(msg, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}
