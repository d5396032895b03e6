//! Per-connection dispatcher: decode inbound envelopes, route them to
//! the matchmaker, and pump outbound messages back to the socket.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The flow is:
//!
//!   1. Open the outbound channel and spawn the pump task.
//!   2. Loop: receive frame → decode `ClientMessage` → matchmaker op.
//!   3. On close or read error: remove the participant.
//!
//! A freshly opened connection triggers no session action until its
//! first `join` arrives; a close always triggers a disconnect, whether
//! or not the connection ever joined.

use std::sync::Arc;

use pairgrid_protocol::{ClientMessage, Codec};
use pairgrid_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "connection open");

    // Outbound pump: room events → socket. The pump ends once every
    // sender clone is dropped — ours below, plus the seated Player's
    // when it leaves its room. Room actors push onto the unbounded
    // channel without awaiting, so a slow socket never stalls a room.
    let (tx, mut rx) = mpsc::unbounded_channel();
    {
        let conn = conn.clone();
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let frame = match state.codec.encode(&msg) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode outbound message");
                        continue;
                    }
                };
                if conn.send(&frame).await.is_err() {
                    break;
                }
            }
        });
    }

    loop {
        let frame = match conn.recv().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        // Undecodable input — bad JSON or an unknown `type` — is
        // logged and dropped without a reply.
        let msg: ClientMessage = match state.codec.decode(&frame) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "dropping undecodable frame");
                continue;
            }
        };

        match msg {
            ClientMessage::Join {
                username,
                board_size,
            } => {
                let result = {
                    let mut rooms = state.rooms.lock().await;
                    rooms.join(conn_id, username, board_size, tx.clone()).await
                };
                if let Err(e) = result {
                    // Covers impossible board sizes and repeat joins.
                    // The protocol has no error envelope, so the
                    // refusal is silent on the wire.
                    tracing::warn!(%conn_id, error = %e, "join refused");
                }
            }
            ClientMessage::Move { position } => {
                let result = {
                    let rooms = state.rooms.lock().await;
                    rooms.route_move(conn_id, position).await
                };
                if let Err(e) = result {
                    tracing::debug!(%conn_id, error = %e, "move not routed");
                }
            }
        }
    }

    // Connection gone — remove the participant from any session it
    // holds. The room notifies the opponent and the registry evicts
    // the room once its last seat empties.
    state.rooms.lock().await.disconnect(conn_id).await;
}
