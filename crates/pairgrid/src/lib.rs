//! # Pairgrid
//!
//! A two-player tile-matching (memory) game server over WebSockets.
//!
//! Pairgrid pairs connecting players into shared sessions by requested
//! board size and arbitrates turn-based play: tile reveals, the timed
//! two-phase match/mismatch resolution, scoring, and game over. This
//! crate is the facade that ties the layers together:
//!
//! ```text
//! connection → dispatcher → matchmaker → room actor → participants
//! (transport)   (this crate)  (pairgrid-room)           (outbound pump)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pairgrid::PairgridServerBuilder;
//!
//! # async fn run() -> Result<(), pairgrid::PairgridError> {
//! let server = PairgridServerBuilder::new()
//!     .bind("0.0.0.0:1234")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::PairgridError;
pub use server::{PairgridServer, PairgridServerBuilder};
