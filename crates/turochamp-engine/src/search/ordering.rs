//! Move ordering: captures first, then history, with a penalty for moving
//! onto attacked squares.

use std::cmp::Reverse;

use crate::eval::material::piece_value;
use crate::rules::{Move, Rules};
use crate::search::heuristics::HistoryTable;

/// Base score that lifts every capture above any quiet move.
pub const CAPTURE_BASE: i64 = 100_000;

/// Penalty for a destination the opponent attacks.
pub const ATTACKED_PENALTY: i64 = 50;

/// Ordering score for a move in the current position.
///
/// - Capture: `100_000 + value(victim) - value(attacker)`
/// - Destination attacked by the opponent: `-50`
/// - Plus the history bonus for `[side][from][to]`
pub fn score_move<R: Rules>(rules: &R, history: &HistoryTable, mv: Move) -> i64 {
    let mut score = 0;

    if let Some(victim) = mv.captured() {
        score += CAPTURE_BASE + i64::from(piece_value(victim) - piece_value(mv.piece()));
    }

    if rules.is_attacked_by_opponent(mv.dest()) {
        score -= ATTACKED_PENALTY;
    }

    score + i64::from(history.score(rules.side_to_move(), mv.source(), mv.dest()))
}

/// Sort `moves` by descending [`score_move`].
///
/// The sort is stable, so equal scores keep generation order.
pub fn order_moves<R: Rules>(rules: &R, history: &HistoryTable, moves: Vec<Move>) -> Vec<Move> {
    let mut scored: Vec<(Move, i64)> = moves
        .into_iter()
        .map(|mv| (mv, score_move(rules, history, mv)))
        .collect();
    scored.sort_by_key(|&(_, score)| Reverse(score));
    scored.into_iter().map(|(mv, _)| mv).collect()
}
