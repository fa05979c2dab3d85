//! Errors raised when building or advancing a [`Game`](crate::rules::Game).

/// Errors from the rules adapter.
///
/// The search itself never fails; these only surface while setting up a
/// position from outside input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The FEN string could not be parsed into a legal board.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },

    /// The move is not legal in the current position.
    #[error("illegal move: {uci_move}")]
    IllegalMove {
        /// The move in UCI notation.
        uci_move: String,
    },
}
