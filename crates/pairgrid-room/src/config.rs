//! Room configuration and lifecycle state machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Configuration for a room instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// How long both flipped tiles stay face-up before the
    /// match/mismatch judgment is applied and broadcast.
    pub resolve_delay: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            resolve_delay: Duration::from_millis(1000),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomState
// ---------------------------------------------------------------------------

/// The lifecycle state of a room.
///
/// ```text
/// AwaitingOpponent → Active → Finished
///                      │         │
///                      └────┬────┘
///                           ▼ (a participant leaves, one remains)
///                       Abandoned
/// ```
///
/// - **AwaitingOpponent**: one seat taken, accepting a second join.
/// - **Active**: both seats taken, the turn state machine is running.
/// - **Finished**: every tile is permanently matched; final scores
///   have been broadcast.
/// - **Abandoned**: a participant left while the other remained. No
///   further moves are accepted; the room dies when the last seat
///   empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomState {
    AwaitingOpponent,
    Active,
    Finished,
    Abandoned,
}

impl RoomState {
    /// Returns `true` if the room is accepting a new participant.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::AwaitingOpponent)
    }

    /// Returns `true` if the turn state machine is running.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for RoomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingOpponent => write!(f, "AwaitingOpponent"),
            Self::Active => write!(f, "Active"),
            Self::Finished => write!(f, "Finished"),
            Self::Abandoned => write!(f, "Abandoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_state_is_joinable() {
        assert!(RoomState::AwaitingOpponent.is_joinable());
        assert!(!RoomState::Active.is_joinable());
        assert!(!RoomState::Finished.is_joinable());
        assert!(!RoomState::Abandoned.is_joinable());
    }

    #[test]
    fn test_room_state_is_active() {
        assert!(!RoomState::AwaitingOpponent.is_active());
        assert!(RoomState::Active.is_active());
        assert!(!RoomState::Finished.is_active());
        assert!(!RoomState::Abandoned.is_active());
    }

    #[test]
    fn test_room_state_display() {
        assert_eq!(RoomState::AwaitingOpponent.to_string(), "AwaitingOpponent");
        assert_eq!(RoomState::Abandoned.to_string(), "Abandoned");
    }

    #[test]
    fn test_room_config_default_delay_is_one_second() {
        let config = RoomConfig::default();
        assert_eq!(config.resolve_delay, Duration::from_millis(1000));
    }
}
