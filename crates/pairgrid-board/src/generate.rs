//! Board generation: pool selection, pair duplication, unbiased shuffle.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{BoardError, pool};

/// Generates a shuffled board for an N×N grid.
///
/// Takes the first N²/2 symbols from the pool, duplicates each once, and
/// applies a Fisher–Yates shuffle (via [`SliceRandom::shuffle`]) to the
/// resulting N² multiset, so every permutation is equally likely.
///
/// The RNG is injected rather than created here — production callers
/// pass `rand::rng()`, tests pass a seeded [`rand::rngs::StdRng`] for
/// reproducible boards.
///
/// # Errors
/// - [`BoardError::InvalidSize`] if `size` is zero or odd.
/// - [`BoardError::PoolExhausted`] if the pool has fewer than N²/2
///   symbols.
pub fn generate<R: Rng + ?Sized>(
    size: usize,
    rng: &mut R,
) -> Result<Vec<&'static str>, BoardError> {
    if size < 2 || size % 2 != 0 {
        return Err(BoardError::InvalidSize(size));
    }

    let pairs = size * size / 2;
    if pairs > pool::SYMBOLS.len() {
        return Err(BoardError::PoolExhausted {
            required: pairs,
            available: pool::SYMBOLS.len(),
        });
    }

    let mut board = Vec::with_capacity(pairs * 2);
    for symbol in &pool::SYMBOLS[..pairs] {
        board.push(*symbol);
        board.push(*symbol);
    }
    board.shuffle(rng);
    Ok(board)
}

// =========================================================================
// Tests
// =========================================================================
