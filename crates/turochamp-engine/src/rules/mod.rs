//! The rules-engine contract consumed by search and evaluation.
//!
//! Board representation, move generation, and terminal-state detection live
//! behind the [`Rules`] trait. The search only ever holds a mutable
//! reference to one position and walks it with make/unmake calls; every
//! caller restores the position before returning.

mod game;

use std::fmt;

use chess::{BitBoard, ChessMove, Color, Piece, Square};

pub use game::Game;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// A legal move annotated with the facts the search needs.
///
/// Built by the rules adapter at generation time, so the capture and castle
/// flags describe the position the move was generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    inner: ChessMove,
    piece: Piece,
    captured: Option<Piece>,
    castle: bool,
}

impl Move {
    /// Annotate a raw move.
    pub fn new(inner: ChessMove, piece: Piece, captured: Option<Piece>, castle: bool) -> Self {
        Self {
            inner,
            piece,
            captured,
            castle,
        }
    }

    /// Origin square.
    #[inline]
    pub fn source(&self) -> Square {
        self.inner.get_source()
    }

    /// Destination square.
    #[inline]
    pub fn dest(&self) -> Square {
        self.inner.get_dest()
    }

    /// Kind of the moving piece.
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Kind of the captured piece, if any. En passant reports a pawn.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.castle
    }

    /// Promotion piece, if any.
    #[inline]
    pub fn promotion(&self) -> Option<Piece> {
        self.inner.get_promotion()
    }

    /// The underlying move as understood by the board.
    #[inline]
    pub fn chess_move(&self) -> ChessMove {
        self.inner
    }

    /// Long algebraic notation (`e2e4`, `e7e8q`).
    pub fn to_uci(&self) -> String {
        self.inner.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Operations the search requires from a rules engine.
///
/// Mutating calls follow strict stack discipline: every `make_move` is
/// paired with an `unmake_move`, every accepted `make_null_move` with an
/// `unmake_null_move`, innermost first.
pub trait Rules {
    /// Color of the side to move.
    fn side_to_move(&self) -> Color;

    /// All legal moves in the current position.
    fn legal_moves(&self) -> Vec<Move>;

    /// Legal captures only (en passant included).
    fn capture_moves(&self) -> Vec<Move>;

    /// Play `mv`, which must be legal in the current position.
    fn make_move(&mut self, mv: Move);

    /// Revert the most recent `make_move`.
    fn unmake_move(&mut self);

    /// Pass the turn without moving a piece.
    ///
    /// Returns `false` and leaves the position untouched when the side to
    /// move is in check: the flipped position would leave a king en prise.
    fn make_null_move(&mut self) -> bool;

    /// Revert the most recent accepted `make_null_move`.
    fn unmake_null_move(&mut self);

    /// Is the side to move checkmated?
    fn is_checkmate(&self) -> bool;

    /// Is the position drawn by rule (stalemate, fifty moves, repetition,
    /// insufficient material)?
    fn is_draw(&self) -> bool;

    /// Is `square` attacked by the side not to move?
    fn is_attacked_by_opponent(&self, square: Square) -> bool;

    /// Is the side to move in check?
    fn in_check(&self) -> bool {
        self.is_attacked_by_opponent(self.king_square(self.side_to_move()))
    }

    /// Does `color` still hold the castling right on `side`?
    fn has_castle_right(&self, color: Color, side: CastleSide) -> bool;

    /// Squares occupied by `piece` of `color`.
    fn pieces(&self, piece: Piece, color: Color) -> BitBoard;

    /// Squares attacked by a `piece` of `color` standing on `square`.
    ///
    /// Sliders stop at the first occupied square (which is included). Pawns
    /// report both capture diagonals regardless of occupancy.
    fn piece_attacks(&self, piece: Piece, color: Color, square: Square) -> BitBoard;

    /// Square of `color`'s king.
    fn king_square(&self, color: Color) -> Square;

    /// Zobrist hash of the current position.
    fn hash(&self) -> u64;
}
