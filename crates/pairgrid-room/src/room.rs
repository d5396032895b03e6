//! Room actor: an isolated Tokio task that owns one match.
//!
//! Each room runs in its own task, communicating with the outside
//! world through an mpsc channel — no shared mutable state, just
//! message passing. Commands from both participants are serialized by
//! the channel, so the board, reveal set, and turn state are only ever
//! touched from inside the actor.
//!
//! The one piece of time in the system lives here too: when the second
//! tile of a turn flips, the judgment is deferred onto the
//! [`ResolveTimer`] and applied when it fires. Moves arriving in that
//! window fail the phase check and are dropped, so a third click can
//! never corrupt the pending pair.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use pairgrid_protocol::ServerMessage;
use pairgrid_transport::ConnectionId;
use tokio::sync::{mpsc, oneshot};

use crate::timer::ResolveTimer;
use crate::{Player, PlayerSender, RoomConfig, RoomError, RoomId, RoomState};

/// Where the current turn stands inside an active game.
///
/// ```text
/// Idle → FirstRevealed → Resolving → Idle
/// ```
///
/// `Resolving` is the two-tiles-up window: the judgment is armed on
/// the resolve timer and every further move is rejected until it
/// fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnPhase {
    /// No tile flipped this turn.
    Idle,
    /// One tile flipped, awaiting the second.
    FirstRevealed { first: usize },
    /// Both tiles flipped, judgment pending on the timer.
    Resolving { first: usize, second: usize },
}

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    /// Seat a participant.
    Join {
        conn_id: ConnectionId,
        username: String,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Remove a participant. Replies with the number of seats still
    /// occupied so the registry knows when to evict the room.
    Leave {
        conn_id: ConnectionId,
        reply: oneshot::Sender<Result<usize, RoomError>>,
    },

    /// A move from a participant. Fire-and-forget: illegal moves are
    /// dropped without a reply.
    Move {
        conn_id: ConnectionId,
        position: usize,
    },

    /// Request the current room metadata.
    Info { reply: oneshot::Sender<RoomInfo> },
}

/// A snapshot of room metadata (not the board itself).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    /// The room's unique ID.
    pub room_id: RoomId,
    /// Current lifecycle state.
    pub state: RoomState,
    /// Side length N of the N×N board.
    pub board_size: usize,
    /// Number of seats currently occupied.
    pub players: usize,
}

/// Handle to a running room actor. Used to send commands to it.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper. The
/// `RoomManager` holds one per room; dropping the last handle closes
/// the channel and stops the actor.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's unique ID.
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Seats a participant in the room.
    pub async fn join(
        &self,
        conn_id: ConnectionId,
        username: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                conn_id,
                username,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Removes a participant. Returns how many seats remain occupied.
    pub async fn leave(
        &self,
        conn_id: ConnectionId,
    ) -> Result<usize, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                conn_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Sends a move to the room (fire-and-forget).
    pub async fn send_move(
        &self,
        conn_id: ConnectionId,
        position: usize,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Move { conn_id, position })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Requests the current room metadata.
    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Info { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }
}

/// The room actor state. Runs inside a Tokio task.
struct GameRoom {
    room_id: RoomId,
    /// N² symbols, each distinct symbol exactly twice.
    board: Vec<&'static str>,
    /// Side length N.
    board_size: usize,
    /// Positions currently face-up. Matched tiles stay here forever.
    revealed: HashSet<usize>,
    /// Whose move it is: an index into `seats`.
    turn: usize,
    phase: TurnPhase,
    state: RoomState,
    /// Seat index is the player number, fixed at join order. A seat
    /// goes back to `None` when its participant disconnects, without
    /// renumbering the other.
    seats: [Option<Player>; 2],
    timer: ResolveTimer,
    resolve_delay: Duration,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl GameRoom {
    /// Runs the actor loop until every handle is dropped.
    async fn run(mut self) {
        tracing::info!(
            room_id = %self.room_id,
            size = self.board_size,
            "room started"
        );

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    // All handles dropped — the registry evicted us.
                    None => break,
                },
                _ = self.timer.fired() => self.resolve(),
            }
        }

        tracing::info!(room_id = %self.room_id, "room stopped");
    }

    fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join {
                conn_id,
                username,
                sender,
                reply,
            } => {
                let _ = reply.send(self.handle_join(conn_id, username, sender));
            }
            RoomCommand::Leave { conn_id, reply } => {
                let _ = reply.send(self.handle_leave(conn_id));
            }
            RoomCommand::Move { conn_id, position } => {
                self.handle_move(conn_id, position);
            }
            RoomCommand::Info { reply } => {
                let _ = reply.send(self.info());
            }
        }
    }

    fn handle_join(
        &mut self,
        conn_id: ConnectionId,
        username: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        if !self.state.is_joinable() {
            return Err(RoomError::InvalidState(format!(
                "cannot join room in state {}",
                self.state
            )));
        }
        if self.seat_of(conn_id).is_some() {
            return Err(RoomError::AlreadySeated(conn_id, self.room_id));
        }
        let Some(seat) = self.seats.iter().position(|s| s.is_none()) else {
            return Err(RoomError::Full(self.room_id));
        };

        self.seats[seat] = Some(Player::new(conn_id, username, sender));
        tracing::info!(
            room_id = %self.room_id,
            %conn_id,
            players = self.player_count(),
            "player joined"
        );

        if self.player_count() == 2 {
            self.start_game();
        } else if let Some(player) = &self.seats[seat] {
            // The opener waits alone until a second join arrives.
            player.send(&ServerMessage::Waiting);
        }

        Ok(())
    }

    fn handle_leave(
        &mut self,
        conn_id: ConnectionId,
    ) -> Result<usize, RoomError> {
        let Some(seat) = self.seat_of(conn_id) else {
            return Err(RoomError::NotSeated(conn_id, self.room_id));
        };
        self.seats[seat] = None;
        let remaining = self.player_count();

        tracing::info!(
            room_id = %self.room_id,
            %conn_id,
            remaining,
            "player left"
        );

        if remaining == 1 {
            // The turn state machine halts. An already-armed resolution
            // will still fire and update state, but no new moves are
            // accepted.
            self.state = RoomState::Abandoned;
            self.broadcast(&ServerMessage::OpponentLeft);
        }

        Ok(remaining)
    }

    /// Applies a move, or drops it. Wrong turn, unavailable tile, and
    /// any move during `Resolving` are all silent no-ops.
    fn handle_move(&mut self, conn_id: ConnectionId, position: usize) {
        if !self.state.is_active() {
            tracing::debug!(
                room_id = %self.room_id,
                %conn_id,
                state = %self.state,
                "move while not active, ignoring"
            );
            return;
        }
        let Some(seat) = self.seat_of(conn_id) else {
            tracing::debug!(
                room_id = %self.room_id,
                %conn_id,
                "move from non-member, ignoring"
            );
            return;
        };
        if seat != self.turn {
            tracing::debug!(
                room_id = %self.room_id,
                %conn_id,
                turn = self.turn,
                "move out of turn, ignoring"
            );
            return;
        }
        if position >= self.board.len() || self.revealed.contains(&position) {
            tracing::debug!(
                room_id = %self.room_id,
                %conn_id,
                position,
                "move on unavailable tile, ignoring"
            );
            return;
        }

        match self.phase {
            TurnPhase::Idle => {
                self.revealed.insert(position);
                self.phase = TurnPhase::FirstRevealed { first: position };
                self.reveal(position);
                // The turn does not switch until the pair resolves.
            }
            TurnPhase::FirstRevealed { first } => {
                // position == first is impossible here: first is
                // already in the revealed set.
                self.revealed.insert(position);
                self.phase = TurnPhase::Resolving {
                    first,
                    second: position,
                };
                self.reveal(position);
                self.timer.arm(self.resolve_delay);
            }
            TurnPhase::Resolving { .. } => {
                tracing::debug!(
                    room_id = %self.room_id,
                    %conn_id,
                    "move while resolving, ignoring"
                );
            }
        }
    }

    /// Applies the deferred judgment for the pending pair.
    ///
    /// Runs inside the actor when the resolve timer fires, so no move
    /// can interleave with it. A participant may have left during the
    /// delay — score, turn, and reveal-state updates still apply, and
    /// the broadcast simply reaches whoever remains.
    fn resolve(&mut self) {
        let TurnPhase::Resolving { first, second } = self.phase else {
            return;
        };
        self.phase = TurnPhase::Idle;

        if self.board[first] == self.board[second] {
            if let Some(mover) = self.seats[self.turn].as_mut() {
                mover.score += 1;
            }
            // The scorer keeps the turn.
            self.broadcast(&ServerMessage::Match {
                positions: [first, second],
                current_player: self.turn,
            });
        } else {
            self.revealed.remove(&first);
            self.revealed.remove(&second);
            self.broadcast(&ServerMessage::Hide {
                positions: [first, second],
            });
            self.turn = 1 - self.turn;
            self.broadcast(&ServerMessage::NextTurn {
                current_player: self.turn,
            });
        }

        if self.state.is_active() && self.revealed.len() == self.board.len() {
            self.finish_game();
        }
    }

    /// Both seats are taken: assign player numbers by join order, hand
    /// each participant the board, and start the first turn.
    fn start_game(&mut self) {
        self.state = RoomState::Active;
        let board: Vec<String> =
            self.board.iter().map(|s| (*s).to_owned()).collect();

        let [Some(a), Some(b)] = &self.seats else {
            return;
        };
        a.send(&ServerMessage::GameStart {
            player_number: 0,
            player: a.username.clone(),
            opponent: b.username.clone(),
            board: board.clone(),
        });
        b.send(&ServerMessage::GameStart {
            player_number: 1,
            player: b.username.clone(),
            opponent: a.username.clone(),
            board,
        });

        tracing::info!(room_id = %self.room_id, "game started");
        self.broadcast(&ServerMessage::NextTurn {
            current_player: self.turn,
        });
    }

    /// Ends the game: the strictly higher score wins, equal scores are
    /// an explicit draw — never a default win for either seat.
    fn finish_game(&mut self) {
        self.state = RoomState::Finished;

        let [Some(a), Some(b)] = &self.seats else {
            return;
        };
        let winner = if a.score > b.score {
            Some(a.username.clone())
        } else if b.score > a.score {
            Some(b.username.clone())
        } else {
            None
        };
        let scores = HashMap::from([
            (a.username.clone(), a.score),
            (b.username.clone(), b.score),
        ]);

        tracing::info!(
            room_id = %self.room_id,
            winner = winner.as_deref().unwrap_or("(draw)"),
            "game finished"
        );
        self.broadcast(&ServerMessage::GameOver { winner, scores });
    }

    fn reveal(&self, position: usize) {
        self.broadcast(&ServerMessage::Reveal {
            position,
            emoji: self.board[position].to_owned(),
        });
    }

    /// Sends a message to every occupied seat.
    fn broadcast(&self, msg: &ServerMessage) {
        for player in self.seats.iter().flatten() {
            player.send(msg);
        }
    }

    fn seat_of(&self, conn_id: ConnectionId) -> Option<usize> {
        self.seats
            .iter()
            .position(|s| s.as_ref().is_some_and(|p| p.conn_id == conn_id))
    }

    fn player_count(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.room_id,
            state: self.state,
            board_size: self.board_size,
            players: self.player_count(),
        }
    }
}

/// Spawns a new room actor task and returns a handle to communicate
/// with it.
///
/// `channel_size` controls backpressure — if the command channel fills
/// up, senders wait (bounded channel).
pub(crate) fn spawn_room(
    room_id: RoomId,
    board: Vec<&'static str>,
    board_size: usize,
    config: &RoomConfig,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = GameRoom {
        room_id,
        board,
        board_size,
        revealed: HashSet::new(),
        turn: 0,
        phase: TurnPhase::Idle,
        state: RoomState::AwaitingOpponent,
        seats: [None, None],
        timer: ResolveTimer::default(),
        resolve_delay: config.resolve_delay,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
