//! Wire protocol for Pairgrid.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`]) — the envelopes that
//!   travel on the wire. Every envelope is a single JSON object with a
//!   `type` discriminator plus type-specific fields.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those envelopes are
//!   converted to/from text frames.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (text frames) and the room
//! layer (sessions, turn state). It doesn't know about connections or
//! rooms — it only knows how to serialize and deserialize messages.
//!
//! ```text
//! Transport (frames) → Protocol (messages) → Room (session state)
//! ```
//!
//! The field names are a contract with the browser client — `boardSize`,
//! `playerNumber`, and `currentPlayer` stay camelCase on the wire even
//! though the Rust fields are snake_case.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientMessage, ServerMessage};
