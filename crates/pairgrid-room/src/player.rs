//! Participant handle: identity, score, and the outbound send capability.

use pairgrid_protocol::ServerMessage;
use pairgrid_transport::ConnectionId;
use tokio::sync::mpsc;

/// Channel sender for delivering outbound messages to a participant's
/// connection.
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

/// One seated participant in a room.
///
/// The sender is a borrowed capability, not ownership of the
/// connection: the connection layer keeps the socket alive, and a
/// dropped receiver just turns sends into no-ops.
#[derive(Debug)]
pub struct Player {
    /// The connection this participant arrived on.
    pub conn_id: ConnectionId,
    /// Display name from the join message.
    pub username: String,
    /// Pairs matched so far.
    pub score: u32,
    sender: PlayerSender,
}

impl Player {
    /// Creates a freshly seated participant with a zero score.
    pub fn new(conn_id: ConnectionId, username: String, sender: PlayerSender) -> Self {
        Self {
            conn_id,
            username,
            score: 0,
            sender,
        }
    }

    /// Sends a message to this participant. Silently drops it if the
    /// connection is gone.
    pub fn send(&self, msg: &ServerMessage) {
        let _ = self.sender.send(msg.clone());
    }
}
