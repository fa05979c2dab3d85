//! Material count for one side.

use chess::{ALL_PIECES, Color, Piece};

use crate::rules::Rules;

/// Material values indexed by [`Piece::to_index()`].
///
/// | Piece  | Value |
/// |--------|-------|
/// | Pawn   | 100   |
/// | Knight | 300   |
/// | Bishop | 350   |
/// | Rook   | 500   |
/// | Queen  | 1000  |
/// | King   | 0     |
pub const PIECE_VALUE: [i32; 6] = [100, 300, 350, 500, 1000, 0];

/// Material value of a single piece.
#[inline]
pub fn piece_value(piece: Piece) -> i32 {
    PIECE_VALUE[piece.to_index()]
}

/// Sum of `count * value` over every piece kind held by `color`.
pub fn material<R: Rules>(rules: &R, color: Color) -> i32 {
    ALL_PIECES
        .iter()
        .map(|&piece| rules.pieces(piece, color).popcnt() as i32 * piece_value(piece))
        .sum()
}
