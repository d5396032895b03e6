//! Room manager: the matchmaking registry.
//!
//! The manager owns every live room handle and two indexes: rooms in
//! creation order (for oldest-first matchmaking) and connection → room
//! (for O(1) routing of moves and disconnects). All mutation of a
//! room's state goes through its actor; the manager never touches a
//! board or a turn directly.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use pairgrid_transport::ConnectionId;

use crate::room::spawn_room;
use crate::{PlayerSender, RoomConfig, RoomError, RoomHandle, RoomId, RoomInfo};

/// Counter for generating unique room IDs.
static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Manages all live rooms and tracks which connection sits in which
/// room.
///
/// This is the entry point for session operations from the connection
/// layer: joins, moves, and disconnects all land here first.
pub struct RoomManager {
    /// Live rooms keyed by ID. A `BTreeMap` because IDs are handed out
    /// monotonically, so iteration visits rooms oldest-first — the
    /// matchmaking order.
    rooms: BTreeMap<RoomId, RoomHandle>,

    /// Maps each connection to the room it is seated in. A connection
    /// sits in at most ONE room at a time (key invariant).
    seats: HashMap<ConnectionId, RoomId>,

    /// Configuration applied to every room this manager creates.
    config: RoomConfig,
}

impl RoomManager {
    /// Creates a new, empty manager with the given room config.
    pub fn new(config: RoomConfig) -> Self {
        Self {
            rooms: BTreeMap::new(),
            seats: HashMap::new(),
            config,
        }
    }

    /// Creates a new room with a freshly generated board.
    ///
    /// # Errors
    /// Returns [`RoomError::Board`] when the requested size cannot
    /// produce a pair-balanced board — the room is not created.
    pub fn create_room(&mut self, board_size: usize) -> Result<RoomId, RoomError> {
        let board = pairgrid_board::generate(board_size, &mut rand::rng())?;
        let room_id = RoomId(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed));
        let handle = spawn_room(
            room_id,
            board,
            board_size,
            &self.config,
            DEFAULT_CHANNEL_SIZE,
        );
        self.rooms.insert(room_id, handle);
        tracing::info!(%room_id, size = board_size, "room created");
        Ok(room_id)
    }

    /// Seats a joining participant: the oldest open room of the
    /// requested size wins; otherwise a new room is opened for them.
    ///
    /// # Errors
    /// - [`RoomError::InvalidState`] if the connection is already
    ///   seated somewhere.
    /// - [`RoomError::Board`] if no open room exists and the requested
    ///   size is impossible — the join is refused outright.
    pub async fn join(
        &mut self,
        conn_id: ConnectionId,
        username: String,
        board_size: usize,
        sender: PlayerSender,
    ) -> Result<RoomId, RoomError> {
        if let Some(existing) = self.seats.get(&conn_id) {
            return Err(RoomError::InvalidState(format!(
                "{conn_id} is already in room {existing}"
            )));
        }

        // Scan for an open room of the same size. If a join races the
        // room filling up, keep searching.
        for handle in self.rooms.values() {
            let Ok(info) = handle.info().await else {
                continue;
            };
            if info.board_size != board_size
                || !info.state.is_joinable()
                || info.players >= 2
            {
                continue;
            }
            if handle
                .join(conn_id, username.clone(), sender.clone())
                .await
                .is_ok()
            {
                self.seats.insert(conn_id, info.room_id);
                return Ok(info.room_id);
            }
        }

        // No open room of this size — open one.
        let room_id = self.create_room(board_size)?;
        let handle = self.rooms.get(&room_id).expect("just created this room");
        handle.join(conn_id, username, sender).await?;
        self.seats.insert(conn_id, room_id);
        Ok(room_id)
    }

    /// Removes a disconnected participant and evicts their room once
    /// its last seat empties. Unknown connections are ignored — a
    /// close may arrive before any join did.
    pub async fn disconnect(&mut self, conn_id: ConnectionId) {
        let Some(room_id) = self.seats.remove(&conn_id) else {
            tracing::debug!(%conn_id, "disconnect for unseated connection, ignoring");
            return;
        };
        let Some(handle) = self.rooms.get(&room_id) else {
            return;
        };

        match handle.leave(conn_id).await {
            Ok(0) => {
                // Dropping the last handle closes the command channel
                // and stops the actor.
                self.rooms.remove(&room_id);
                tracing::info!(%room_id, "room evicted");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(%room_id, %conn_id, error = %e, "leave failed");
            }
        }
    }

    /// Routes a move to the sender's room. Illegal moves are judged
    /// (and dropped) by the room itself; this only fails when the
    /// connection isn't seated anywhere.
    pub async fn route_move(
        &self,
        conn_id: ConnectionId,
        position: usize,
    ) -> Result<(), RoomError> {
        let room_id = self.seats.get(&conn_id).ok_or_else(|| {
            RoomError::InvalidState(format!("{conn_id} is not in any room"))
        })?;
        let handle = self
            .rooms
            .get(room_id)
            .ok_or(RoomError::NotFound(*room_id))?;
        handle.send_move(conn_id, position).await
    }

    /// Returns the room a connection is seated in, if any.
    pub fn room_of(&self, conn_id: &ConnectionId) -> Option<RoomId> {
        self.seats.get(conn_id).copied()
    }

    /// Returns metadata for a specific room.
    pub async fn room_info(&self, room_id: RoomId) -> Result<RoomInfo, RoomError> {
        let handle = self
            .rooms
            .get(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        handle.info().await
    }

    /// Returns the number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}
