//! Board generation for Pairgrid.
//!
//! A board is an ordered sequence of N² symbols for an N×N grid, where
//! every distinct symbol appears exactly twice. This crate owns:
//!
//! - **The symbol pool** ([`SYMBOLS`]) — the fixed, ordered set of emoji
//!   that boards draw from.
//! - **Generation** ([`generate`]) — pool selection, pair duplication,
//!   and an unbiased Fisher–Yates shuffle.
//! - **Errors** ([`BoardError`]) — impossible board configurations.
//!
//! Generation is pure with respect to the injected RNG: the same seed
//! produces the same board, which keeps higher layers testable.

mod error;
mod generate;
mod pool;

pub use error::BoardError;
pub use generate::generate;
pub use pool::SYMBOLS;
