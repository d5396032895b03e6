//! Error types for the room layer.

use pairgrid_board::BoardError;
use pairgrid_transport::ConnectionId;

use crate::RoomId;

/// Errors that can occur during room operations.
///
/// Note what is *not* here: illegal moves. Those are silently dropped
/// by the room actor rather than surfaced as errors — the protocol has
/// no error envelope and the client is expected to mirror legality
/// checks itself.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room has no free seat.
    #[error("room {0} is full")]
    Full(RoomId),

    /// The connection is already seated in this room.
    #[error("{0} already seated in room {1}")]
    AlreadySeated(ConnectionId, RoomId),

    /// The connection is not seated in this room.
    #[error("{0} not seated in room {1}")]
    NotSeated(ConnectionId, RoomId),

    /// The room is in a state that doesn't allow this operation.
    #[error("invalid room state for this operation: {0}")]
    InvalidState(String),

    /// The room's command channel is full or closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),

    /// The requested board cannot be generated, so no session is
    /// opened for the join.
    #[error(transparent)]
    Board(#[from] BoardError),
}
