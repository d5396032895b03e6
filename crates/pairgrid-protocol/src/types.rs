//! Core protocol types for Pairgrid's wire format.
//!
//! Every message is a flat JSON object with a `type` discriminator —
//! `#[serde(tag = "type", rename_all = "snake_case")]` produces exactly
//! that shape, e.g. `{ "type": "next_turn", "currentPlayer": 1 }`.
//!
//! Messages flow in one direction each: [`ClientMessage`] inbound,
//! [`ServerMessage`] outbound. There is no request/response pairing —
//! the server pushes events as session state changes, and illegal
//! client input is dropped without a reply.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClientMessage — inbound
// ---------------------------------------------------------------------------

/// Messages a client sends to the server.
///
/// A connection says nothing meaningful until its first `join`; after
/// that, `move` is the only verb. Disconnects are signaled by the
/// transport (connection close), not by a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// "Seat me in a game of this size."
    ///
    /// `boardSize` is the side length N of the requested N×N board.
    Join {
        username: String,
        #[serde(rename = "boardSize")]
        board_size: usize,
    },

    /// "Flip the tile at this position."
    ///
    /// `position` indexes the board row-major in `[0, N²)`.
    Move { position: usize },
}

// ---------------------------------------------------------------------------
// ServerMessage — outbound
// ---------------------------------------------------------------------------

/// Messages the server sends to clients.
///
/// Within one session these arrive in a fixed order: reveals before the
/// resolution they belong to, and the resolution (`match`, or `hide`
/// then `next_turn`) before any later reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// "You opened a new session — waiting for an opponent."
    Waiting,

    /// "Your session is live." Sent to each participant individually:
    /// `playerNumber` is the recipient's own turn index (0 or 1, by
    /// join order), `player`/`opponent` are from the recipient's point
    /// of view. The full board is included for client compatibility —
    /// the web client renders tiles from it.
    GameStart {
        #[serde(rename = "playerNumber")]
        player_number: usize,
        player: String,
        opponent: String,
        board: Vec<String>,
    },

    /// "This tile is now face-up." Broadcast to both participants.
    Reveal { position: usize, emoji: String },

    /// "These two tiles go face-down again" — a mismatched pair, sent
    /// after the resolution delay.
    Hide { positions: [usize; 2] },

    /// "These two tiles matched." `currentPlayer` is the scorer, who
    /// keeps the turn.
    Match {
        positions: [usize; 2],
        #[serde(rename = "currentPlayer")]
        current_player: usize,
    },

    /// "It's now this player's turn."
    NextTurn {
        #[serde(rename = "currentPlayer")]
        current_player: usize,
    },

    /// "The session is over." `winner` is `null` on a draw. `scores`
    /// maps display name to final score.
    GameOver {
        winner: Option<String>,
        scores: HashMap<String, u32>,
    },

    /// "Your opponent disconnected." The session is abandoned; further
    /// moves are ignored.
    OpponentLeft,
}

// =========================================================================
// Tests
// =========================================================================
