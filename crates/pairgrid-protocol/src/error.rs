//! Error types for the protocol layer.

/// Errors that can occur in the protocol layer.
///
/// Both variants wrap the original `serde_json` error so callers deal
/// with `ProtocolError` uniformly regardless of which codec produced
/// it. Decode failures cover the whole spectrum of bad input: invalid
/// JSON, missing fields, and unknown `type` discriminators — the
/// dispatcher logs and drops all of them without replying.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a message into a text frame).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning a text frame into a message).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
