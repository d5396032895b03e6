//! Session layer for Pairgrid.
//!
//! Each room is one two-participant match: it owns the board, the
//! reveal state, and the turn state machine, and runs as an isolated
//! Tokio task (actor model) — no shared mutable state, just message
//! passing. The [`RoomManager`] is the matchmaking registry on top:
//! it binds joining participants to an open room of the requested
//! board size (or opens one) and routes moves and disconnects to the
//! owning room in O(1).
//!
//! # Key types
//!
//! - [`RoomManager`] — matchmaking, registry, routing
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`Player`] — one seated participant (name, score, send capability)
//! - [`RoomState`] — session lifecycle state machine
//! - [`RoomConfig`] — room settings (resolution delay)

mod config;
mod error;
mod manager;
mod player;
mod room;
mod timer;

pub use config::{RoomConfig, RoomState};
pub use error::RoomError;
pub use manager::RoomManager;
pub use player::{Player, PlayerSender};
pub use room::{RoomHandle, RoomInfo};

use std::fmt;

/// A unique identifier for a room (one match instance).
///
/// Ordered so the registry can iterate rooms in creation order — IDs
/// are handed out monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}
