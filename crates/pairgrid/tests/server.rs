//! End-to-end tests: real WebSocket clients against a real server.
//!
//! These drive the full stack — accept loop, dispatcher, matchmaker,
//! room actors — through tokio-tungstenite clients, the same way the
//! browser client talks to the server. Boards are random, so tests
//! that need a match or a mismatch pick positions by reading the board
//! out of their own `game_start` message.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use pairgrid::PairgridServerBuilder;
use pairgrid_protocol::{ClientMessage, ServerMessage};
use pairgrid_room::RoomConfig;
use tokio_tungstenite::tungstenite::Message;

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Resolve delay for tests: long enough to be a real deferral, short
/// enough to keep the suite fast.
const TEST_RESOLVE_DELAY: Duration = Duration::from_millis(100);

// =========================================================================
// Helpers
// =========================================================================

/// Starts a server on an ephemeral port and returns its address.
async fn start_server() -> String {
    let server = PairgridServerBuilder::new()
        .bind("127.0.0.1:0")
        .room_config(RoomConfig {
            resolve_delay: TEST_RESOLVE_DELAY,
        })
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn connect(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

async fn send(ws: &mut ClientWs, msg: &ClientMessage) {
    let frame = serde_json::to_string(msg).expect("encode");
    ws.send(Message::Text(frame.into())).await.expect("send");
}

async fn join(ws: &mut ClientWs, username: &str, board_size: usize) {
    send(
        ws,
        &ClientMessage::Join {
            username: username.into(),
            board_size,
        },
    )
    .await;
}

async fn play(ws: &mut ClientWs, position: usize) {
    send(ws, &ClientMessage::Move { position }).await;
}

async fn recv(ws: &mut ClientWs) -> ServerMessage {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for a message")
            .expect("stream ended")
            .expect("recv failed");
        match msg {
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("decode");
            }
            _ => continue, // skip ping/pong
        }
    }
}

/// Asserts no frame arrives on this connection for a while.
async fn assert_silent(ws: &mut ClientWs) {
    let result = tokio::time::timeout(Duration::from_millis(300), ws.next()).await;
    assert!(result.is_err(), "expected silence, got {result:?}");
}

/// Connects ada and bob into one size-`size` game and drains the
/// waiting/game_start/next_turn preamble. Returns both sockets and the
/// shared board.
async fn setup_game(addr: &str, size: usize) -> (ClientWs, ClientWs, Vec<String>) {
    let mut a = connect(addr).await;
    join(&mut a, "ada", size).await;
    assert!(matches!(recv(&mut a).await, ServerMessage::Waiting));

    let mut b = connect(addr).await;
    join(&mut b, "bob", size).await;

    let board = match recv(&mut a).await {
        ServerMessage::GameStart {
            player_number: 0,
            board,
            ..
        } => board,
        other => panic!("expected ada's game_start, got {other:?}"),
    };
    match recv(&mut b).await {
        ServerMessage::GameStart {
            player_number: 1,
            board: board_b,
            ..
        } => assert_eq!(board_b, board),
        other => panic!("expected bob's game_start, got {other:?}"),
    }

    assert!(matches!(
        recv(&mut a).await,
        ServerMessage::NextTurn { current_player: 0 }
    ));
    assert!(matches!(
        recv(&mut b).await,
        ServerMessage::NextTurn { current_player: 0 }
    ));

    (a, b, board)
}

/// First two positions outside `taken` sharing a symbol.
fn find_pair(board: &[String], taken: &HashSet<usize>) -> (usize, usize) {
    for i in 0..board.len() {
        if taken.contains(&i) {
            continue;
        }
        for j in (i + 1)..board.len() {
            if !taken.contains(&j) && board[i] == board[j] {
                return (i, j);
            }
        }
    }
    panic!("no unrevealed pair left");
}

/// First two positions outside `taken` with different symbols.
fn find_mismatch(board: &[String], taken: &HashSet<usize>) -> (usize, usize) {
    for i in 0..board.len() {
        if taken.contains(&i) {
            continue;
        }
        for j in (i + 1)..board.len() {
            if !taken.contains(&j) && board[i] != board[j] {
                return (i, j);
            }
        }
    }
    panic!("no mismatched tiles left");
}

// =========================================================================
// Matchmaking over the wire
// =========================================================================

#[tokio::test]
async fn test_first_join_receives_waiting() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    join(&mut ws, "ada", 4).await;

    assert!(matches!(recv(&mut ws).await, ServerMessage::Waiting));
}

#[tokio::test]
async fn test_two_joins_start_a_game() {
    let addr = start_server().await;

    let mut a = connect(&addr).await;
    join(&mut a, "ada", 4).await;
    assert!(matches!(recv(&mut a).await, ServerMessage::Waiting));

    let mut b = connect(&addr).await;
    join(&mut b, "bob", 4).await;

    // Each side gets its own numbering and point of view, plus the
    // full 16-entry board.
    match recv(&mut a).await {
        ServerMessage::GameStart {
            player_number,
            player,
            opponent,
            board,
        } => {
            assert_eq!(player_number, 0);
            assert_eq!(player, "ada");
            assert_eq!(opponent, "bob");
            assert_eq!(board.len(), 16);
        }
        other => panic!("expected game_start, got {other:?}"),
    }
    match recv(&mut b).await {
        ServerMessage::GameStart {
            player_number,
            player,
            opponent,
            board,
        } => {
            assert_eq!(player_number, 1);
            assert_eq!(player, "bob");
            assert_eq!(opponent, "ada");
            assert_eq!(board.len(), 16);
        }
        other => panic!("expected game_start, got {other:?}"),
    }

    // The first turn goes to player 0.
    assert!(matches!(
        recv(&mut a).await,
        ServerMessage::NextTurn { current_player: 0 }
    ));
    assert!(matches!(
        recv(&mut b).await,
        ServerMessage::NextTurn { current_player: 0 }
    ));
}

#[tokio::test]
async fn test_game_start_board_is_pair_balanced() {
    let addr = start_server().await;
    let (_a, _b, board) = setup_game(&addr, 4).await;

    let mut freq: HashMap<&str, usize> = HashMap::new();
    for symbol in &board {
        *freq.entry(symbol).or_insert(0) += 1;
    }
    assert_eq!(freq.len(), 8);
    assert!(freq.values().all(|&count| count == 2));
}

#[tokio::test]
async fn test_sizes_are_matched_separately() {
    let addr = start_server().await;

    let mut a = connect(&addr).await;
    join(&mut a, "ada", 4).await;
    assert!(matches!(recv(&mut a).await, ServerMessage::Waiting));

    let mut b = connect(&addr).await;
    join(&mut b, "bob", 6).await;
    assert!(matches!(recv(&mut b).await, ServerMessage::Waiting));

    // carol asks for a 4-board and lands with ada; bob keeps waiting.
    let mut c = connect(&addr).await;
    join(&mut c, "carol", 4).await;

    assert!(matches!(
        recv(&mut a).await,
        ServerMessage::GameStart { player_number: 0, .. }
    ));
    assert!(matches!(
        recv(&mut c).await,
        ServerMessage::GameStart { player_number: 1, .. }
    ));
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn test_impossible_board_size_is_silently_refused() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    // Odd size: no session opens and no reply arrives.
    join(&mut ws, "ada", 3).await;
    assert_silent(&mut ws).await;

    // The connection survives; a sane join still works.
    join(&mut ws, "ada", 4).await;
    assert!(matches!(recv(&mut ws).await, ServerMessage::Waiting));
}

#[tokio::test]
async fn test_undecodable_frames_are_ignored() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    // Garbage, then valid JSON with an unknown type: both dropped.
    ws.send(Message::Text("not json at all".into()))
        .await
        .expect("send");
    ws.send(Message::Text(r#"{"type":"teleport","position":1}"#.into()))
        .await
        .expect("send");

    // The connection is still usable.
    join(&mut ws, "ada", 4).await;
    assert!(matches!(recv(&mut ws).await, ServerMessage::Waiting));
}

// =========================================================================
// Turn play over the wire
// =========================================================================

#[tokio::test]
async fn test_reveal_broadcasts_to_both_players() {
    let addr = start_server().await;
    let (mut a, mut b, board) = setup_game(&addr, 4).await;

    play(&mut a, 0).await;

    for ws in [&mut a, &mut b] {
        match recv(ws).await {
            ServerMessage::Reveal { position, emoji } => {
                assert_eq!(position, 0);
                assert_eq!(emoji, board[0]);
            }
            other => panic!("expected reveal, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_mismatch_hides_after_delay_and_swaps_turn() {
    let addr = start_server().await;
    let (mut a, mut b, board) = setup_game(&addr, 4).await;

    let (p, q) = find_mismatch(&board, &HashSet::new());
    play(&mut a, p).await;
    play(&mut a, q).await;

    for ws in [&mut a, &mut b] {
        assert!(matches!(recv(ws).await, ServerMessage::Reveal { .. }));
        assert!(matches!(recv(ws).await, ServerMessage::Reveal { .. }));
        match recv(ws).await {
            ServerMessage::Hide { positions } => {
                assert_eq!(positions, [p, q]);
            }
            other => panic!("expected hide, got {other:?}"),
        }
        assert!(matches!(
            recv(ws).await,
            ServerMessage::NextTurn { current_player: 1 }
        ));
    }
}

#[tokio::test]
async fn test_match_scores_and_keeps_turn() {
    let addr = start_server().await;
    let (mut a, mut b, board) = setup_game(&addr, 4).await;

    let mut taken = HashSet::new();
    let (p, q) = find_pair(&board, &taken);
    play(&mut a, p).await;
    play(&mut a, q).await;

    for ws in [&mut a, &mut b] {
        assert!(matches!(recv(ws).await, ServerMessage::Reveal { .. }));
        assert!(matches!(recv(ws).await, ServerMessage::Reveal { .. }));
        match recv(ws).await {
            ServerMessage::Match {
                positions,
                current_player,
            } => {
                assert_eq!(positions, [p, q]);
                assert_eq!(current_player, 0, "the scorer keeps the turn");
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    // ada still holds the turn: her next reveal goes through.
    taken.insert(p);
    taken.insert(q);
    let (r, _) = find_pair(&board, &taken);
    play(&mut a, r).await;
    assert!(matches!(recv(&mut a).await, ServerMessage::Reveal { .. }));
}

#[tokio::test]
async fn test_wrong_turn_move_is_a_noop() {
    let addr = start_server().await;
    let (mut a, mut b, board) = setup_game(&addr, 4).await;

    // bob does not hold the first turn — nothing happens.
    play(&mut b, 0).await;
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;

    // ada's move on the same tile proves state was untouched.
    play(&mut a, 0).await;
    match recv(&mut a).await {
        ServerMessage::Reveal { position, emoji } => {
            assert_eq!(position, 0);
            assert_eq!(emoji, board[0]);
        }
        other => panic!("expected reveal, got {other:?}"),
    }
}

#[tokio::test]
async fn test_move_during_resolution_is_dropped() {
    let addr = start_server().await;
    let (mut a, mut b, board) = setup_game(&addr, 4).await;

    let (p, q) = find_mismatch(&board, &HashSet::new());
    play(&mut a, p).await;
    play(&mut a, q).await;
    // Third click lands inside the resolution window.
    let spare = (0..board.len()).find(|i| *i != p && *i != q).unwrap();
    play(&mut a, spare).await;

    // Per-connection ordering makes this check exact: if the third
    // move had been accepted, a reveal for `spare` would precede the
    // hide.
    assert!(matches!(recv(&mut a).await, ServerMessage::Reveal { .. }));
    assert!(matches!(recv(&mut a).await, ServerMessage::Reveal { .. }));
    assert!(matches!(recv(&mut a).await, ServerMessage::Hide { .. }));
    assert!(matches!(
        recv(&mut a).await,
        ServerMessage::NextTurn { current_player: 1 }
    ));
    drop(b);
}

// =========================================================================
// Game over and disconnects
// =========================================================================

#[tokio::test]
async fn test_full_game_on_smallest_board() {
    let addr = start_server().await;
    // 2×2: two pairs, the shortest possible game. ada clears both and
    // wins 2–0.
    let (mut a, mut b, board) = setup_game(&addr, 2).await;

    let mut taken = HashSet::new();
    for _ in 0..2 {
        let (p, q) = find_pair(&board, &taken);
        play(&mut a, p).await;
        play(&mut a, q).await;
        for ws in [&mut a, &mut b] {
            assert!(matches!(recv(ws).await, ServerMessage::Reveal { .. }));
            assert!(matches!(recv(ws).await, ServerMessage::Reveal { .. }));
            assert!(matches!(
                recv(ws).await,
                ServerMessage::Match { current_player: 0, .. }
            ));
        }
        taken.insert(p);
        taken.insert(q);
    }

    for ws in [&mut a, &mut b] {
        match recv(ws).await {
            ServerMessage::GameOver { winner, scores } => {
                assert_eq!(winner.as_deref(), Some("ada"));
                assert_eq!(scores["ada"], 2);
                assert_eq!(scores["bob"], 0);
            }
            other => panic!("expected game_over, got {other:?}"),
        }
    }

    // game_over fires exactly once; a finished game ignores moves.
    play(&mut a, 0).await;
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn test_disconnect_notifies_opponent() {
    let addr = start_server().await;
    let (mut a, b, _board) = setup_game(&addr, 4).await;

    drop(b); // bob's socket closes

    assert!(matches!(recv(&mut a).await, ServerMessage::OpponentLeft));

    // The abandoned session accepts no further moves.
    play(&mut a, 0).await;
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn test_waiting_player_can_be_matched_after_another_leaves() {
    let addr = start_server().await;

    // ada opens a room and leaves before anyone arrives.
    let mut a = connect(&addr).await;
    join(&mut a, "ada", 4).await;
    assert!(matches!(recv(&mut a).await, ServerMessage::Waiting));
    drop(a);

    // The dead room is evicted, so bob and carol pair up fresh.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let mut b = connect(&addr).await;
    join(&mut b, "bob", 4).await;
    assert!(matches!(recv(&mut b).await, ServerMessage::Waiting));

    let mut c = connect(&addr).await;
    join(&mut c, "carol", 4).await;
    assert!(matches!(
        recv(&mut b).await,
        ServerMessage::GameStart { player_number: 0, .. }
    ));
    assert!(matches!(
        recv(&mut c).await,
        ServerMessage::GameStart { player_number: 1, .. }
    ));
}
