//! Pawn advancement credit.

use chess::{Color, Piece};

use crate::eval::defenders::DefenderMap;
use crate::rules::Rules;

/// Credit per rank a pawn has advanced from its starting rank.
const PER_RANK: i32 = 20;

/// Credit for a pawn defended by at least one non-pawn piece.
const GUARDED: i32 = 30;

/// Ranks a pawn of `color` on `rank_index` (0-based) has advanced.
#[inline]
fn ranks_advanced(color: Color, rank_index: usize) -> i32 {
    match color {
        Color::White => rank_index as i32 - 1,
        Color::Black => 6 - rank_index as i32,
    }
}

/// Advancement and guard credit for every pawn of `color`.
pub fn pawn_credit<R: Rules>(rules: &R, color: Color, defenders: &DefenderMap) -> i32 {
    rules
        .pieces(Piece::Pawn, color)
        .map(|square| {
            let advance = PER_RANK * ranks_advanced(color, square.get_rank().to_index());
            let guard = if defenders.non_pawn(square) > 0 { GUARDED } else { 0 };
            advance + guard
        })
        .sum()
}
