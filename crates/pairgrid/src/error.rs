//! Unified error type for the Pairgrid server crate.

use pairgrid_protocol::ProtocolError;
use pairgrid_room::RoomError;
use pairgrid_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From`
/// impls, so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PairgridError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (matchmaking, board generation).
    #[error(transparent)]
    Room(#[from] RoomError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairgrid_room::RoomId;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::SendFailed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "gone",
        ));
        let top: PairgridError = err.into();
        assert!(matches!(top, PairgridError::Transport(_)));
        assert!(top.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let decode_err =
            serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let top: PairgridError = ProtocolError::Decode(decode_err).into();
        assert!(matches!(top, PairgridError::Protocol(_)));
    }

    #[test]
    fn test_from_room_error() {
        let top: PairgridError = RoomError::NotFound(RoomId(1)).into();
        assert!(matches!(top, PairgridError::Room(_)));
        assert!(top.to_string().contains("R-1"));
    }
}
