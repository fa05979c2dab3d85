//! Piece mobility with diminishing returns per piece.
//!
//! Every non-pawn piece earns `100 * sqrt(weight)` where `weight` counts its
//! legal moves, captures counting twice. Pawn moves and castling are ignored.

use chess::{ALL_PIECES, BitBoard, Color, EMPTY, Piece};

use crate::rules::Rules;

/// `floor(sqrt(10000 * weight))`, roughly `100 * sqrt(weight)`.
#[inline]
pub fn diminishing(weight: u32) -> i32 {
    (10_000 * weight).isqrt() as i32
}

/// Mobility score for the side to move.
pub fn mobility<R: Rules>(rules: &R) -> i32 {
    let mut weights = [0u32; 64];

    for mv in rules.legal_moves() {
        if mv.piece() == Piece::Pawn || mv.is_castle() {
            continue;
        }
        weights[mv.source().to_index()] += if mv.is_capture() { 2 } else { 1 };
    }

    weights
        .iter()
        .filter(|&&weight| weight > 0)
        .map(|&weight| diminishing(weight))
        .sum()
}

/// Pieces scored by [`attack_mobility`].
const MOBILE_PIECES: [Piece; 5] = [
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

fn occupancy<R: Rules>(rules: &R, color: Color) -> BitBoard {
    ALL_PIECES
        .iter()
        .fold(EMPTY, |acc, &piece| acc | rules.pieces(piece, color))
}

/// Mobility for `color` read off attack sets, for a side that is not to move.
///
/// Each piece may land on any attacked square not held by its own side and
/// landing on an enemy piece counts twice. The enemy king's square is not a
/// target. Pins and checks are not considered.
pub fn attack_mobility<R: Rules>(rules: &R, color: Color) -> i32 {
    let own = occupancy(rules, color);
    let enemy_king = BitBoard::from_square(rules.king_square(!color));
    let enemy = occupancy(rules, !color) & !enemy_king;

    let mut score = 0;
    for piece in MOBILE_PIECES {
        for from in rules.pieces(piece, color) {
            let targets = rules.piece_attacks(piece, color, from) & !own & !enemy_king;
            score += diminishing(targets.popcnt() + (targets & enemy).popcnt());
        }
    }
    score
}
