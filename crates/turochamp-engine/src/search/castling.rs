//! Root-only castling incentive.

use chess::{ALL_PIECES, BitBoard, Color, EMPTY, File, Square};

use crate::rules::{CastleSide, Move, Rules};

/// The move castles.
pub const CASTLED: i32 = 300;

/// Castling rights kept and castling is legal on the next turn.
pub const CASTLE_NEXT: i32 = 200;

/// Castling rights kept but castling is not yet legal.
pub const CASTLE_KEPT: i32 = 100;

/// Bonus for a root move, evaluated after `mv` has been made.
///
/// Breaks ties toward castling without touching the minimax value. The
/// position is restored before returning. When `mv` gives check the turn
/// cannot be passed, so the castling path is inspected directly.
pub fn castling_incentive<R: Rules>(rules: &mut R, mv: Move) -> i32 {
    if mv.is_castle() {
        return CASTLED;
    }

    let mover = !rules.side_to_move();
    if !rules.has_castle_right(mover, CastleSide::KingSide)
        && !rules.has_castle_right(mover, CastleSide::QueenSide)
    {
        return 0;
    }

    if !rules.make_null_move() {
        let position: &R = rules;
        let open = [CastleSide::KingSide, CastleSide::QueenSide]
            .into_iter()
            .any(|side| castle_path_open(position, mover, side));
        return if open { CASTLE_NEXT } else { CASTLE_KEPT };
    }
    let can_castle = rules.legal_moves().iter().any(Move::is_castle);
    rules.unmake_null_move();

    if can_castle { CASTLE_NEXT } else { CASTLE_KEPT }
}

/// Could `color` castle toward `side` if it were its turn?
///
/// The squares between king and rook must be empty and the squares the king
/// crosses must not be attacked.
fn castle_path_open<R: Rules>(rules: &R, color: Color, side: CastleSide) -> bool {
    if !rules.has_castle_right(color, side) {
        return false;
    }

    let (between, crossed): (&[usize], &[usize]) = match side {
        CastleSide::KingSide => (&[5, 6], &[4, 5, 6]),
        CastleSide::QueenSide => (&[1, 2, 3], &[4, 3, 2]),
    };
    let rank = color.to_my_backrank();
    let square = |file: usize| Square::make_square(rank, File::from_index(file));

    let occupied = ALL_PIECES.iter().fold(EMPTY, |acc, &piece| {
        acc | rules.pieces(piece, Color::White) | rules.pieces(piece, Color::Black)
    });
    let attacked = ALL_PIECES.iter().fold(EMPTY, |acc, &piece| {
        rules
            .pieces(piece, !color)
            .fold(acc, |acc, from| acc | rules.piece_attacks(piece, !color, from))
    });

    between
        .iter()
        .all(|&file| occupied & BitBoard::from_square(square(file)) == EMPTY)
        && crossed
            .iter()
            .all(|&file| attacked & BitBoard::from_square(square(file)) == EMPTY)
}
