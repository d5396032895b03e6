//! Error types for board generation.

/// Errors that can occur while generating a board.
///
/// Both variants are configuration errors: the requested board cannot
/// exist, so the caller must refuse to open a session rather than
/// degrade to a board that breaks the pair invariant.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The board side length is zero or odd. An N×N board holds N²
    /// tiles in pairs, so N must be even and at least 2.
    #[error("board size must be an even number >= 2, got {0}")]
    InvalidSize(usize),

    /// The board needs more distinct symbols than the pool provides.
    /// Reusing a symbol for more than one pair would make matches
    /// ambiguous, so this fails instead.
    #[error("symbol pool exhausted: {required} pairs required, {available} available")]
    PoolExhausted {
        /// Distinct symbols the requested board needs (N²/2).
        required: usize,
        /// Distinct symbols the pool holds.
        available: usize,
    },
}
