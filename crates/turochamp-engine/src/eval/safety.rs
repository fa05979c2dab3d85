//! Piece safety and king exposure.

use chess::{Color, Piece};

use crate::eval::defenders::DefenderMap;
use crate::eval::mobility::diminishing;
use crate::rules::Rules;

/// Pieces rewarded for being defended.
const GUARDED_PIECES: [Piece; 3] = [Piece::Rook, Piece::Bishop, Piece::Knight];

const DEFENDED_ONCE: i32 = 100;
const DEFENDED_TWICE: i32 = 150;

/// Bonus for each rook, bishop and knight of `color` according to how many
/// of its own pieces defend it. `defenders` must be built for `color`.
pub fn piece_safety<R: Rules>(rules: &R, color: Color, defenders: &DefenderMap) -> i32 {
    GUARDED_PIECES
        .iter()
        .flat_map(|&piece| rules.pieces(piece, color))
        .map(|square| match defenders.total(square) {
            0 => 0,
            1 => DEFENDED_ONCE,
            _ => DEFENDED_TWICE,
        })
        .sum()
}

/// Exposure of `color`'s king.
///
/// Counts the squares a queen standing on the king square would reach and
/// scores them with the mobility curve. The caller subtracts this.
pub fn king_exposure<R: Rules>(rules: &R, color: Color) -> i32 {
    let king = rules.king_square(color);
    let reach = rules.piece_attacks(Piece::Queen, color, king).popcnt();
    diminishing(reach)
}
