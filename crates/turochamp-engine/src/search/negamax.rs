//! Negamax alpha-beta search with quiescence.

use crate::config::SearchConfig;
use crate::eval::evaluate;
use crate::rules::{Move, Rules};
use crate::search::SearchStats;
use crate::search::castling::castling_incentive;
use crate::search::control::SearchControl;
use crate::search::heuristics::HistoryTable;
use crate::search::ordering::order_moves;

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Base score for checkmate (adjusted by ply for mate distance).
pub const MATE_SCORE: i32 = 100_000;

/// Scores above this threshold indicate a forced mate.
pub const MATE_THRESHOLD: i32 = 90_000;

/// Per-iteration search state.
pub(super) struct SearchContext<'a> {
    pub config: &'a SearchConfig,
    pub control: &'a SearchControl,
    pub history: &'a mut HistoryTable,
    pub stats: SearchStats,
    /// Best root move of this iteration, by incentivized score.
    pub best_move: Option<Move>,
    pub best_score: i32,
    /// Whether the control may abort this iteration.
    pub abortable: bool,
    pub aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        config: &'a SearchConfig,
        control: &'a SearchControl,
        history: &'a mut HistoryTable,
        abortable: bool,
    ) -> Self {
        Self {
            config,
            control,
            history,
            stats: SearchStats::default(),
            best_move: None,
            best_score: -INF,
            abortable,
            aborted: false,
        }
    }

    /// Poll the control; latches `aborted` once it fires.
    fn should_abort(&mut self) -> bool {
        if self.abortable && !self.aborted && self.control.should_stop(self.stats.total()) {
            self.aborted = true;
        }
        self.aborted
    }
}

/// Search the root position to `depth`.
///
/// Records the best move in `ctx` as a side effect: a move replaces the
/// current best only when it raises alpha and its score plus castling
/// incentive beats the running best. The incentive never enters the window.
pub(super) fn search_root<R: Rules>(rules: &mut R, depth: u8, ctx: &mut SearchContext<'_>) -> i32 {
    ctx.stats.alpha_beta_nodes += 1;

    if rules.is_checkmate() {
        return -MATE_SCORE;
    }

    // Claimable draws still need a move played; only stalemate ends the game
    let moves = rules.legal_moves();
    if moves.is_empty() {
        return 0;
    }

    let mut alpha = -INF;
    let beta = INF;
    let side = rules.side_to_move();
    let moves = order_moves(rules, ctx.history, moves);

    for mv in moves {
        rules.make_move(mv);
        let score = -alpha_beta(rules, depth - 1, 1, -beta, -alpha, ctx);
        let incentive = castling_incentive(rules, mv);
        rules.unmake_move();

        if ctx.aborted {
            return alpha;
        }

        if score > alpha {
            alpha = score;
            if alpha >= beta {
                ctx.history.reward(side, mv.source(), mv.dest(), depth);
                return beta;
            }

            let incentivized = score + incentive;
            if incentivized > ctx.best_score {
                ctx.best_score = incentivized;
                ctx.best_move = Some(mv);
            }
        }
    }

    alpha
}

/// Interior negamax node. Returns a score for the side to move, clamped to
/// `[alpha, beta]`.
fn alpha_beta<R: Rules>(
    rules: &mut R,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    if depth == 0 {
        return quiescence(rules, ply, 0, alpha, beta, ctx);
    }

    ctx.stats.alpha_beta_nodes += 1;
    if ctx.should_abort() {
        return 0;
    }

    if rules.is_checkmate() {
        return i32::from(ply) - MATE_SCORE;
    }
    if rules.is_draw() {
        return 0;
    }

    let side = rules.side_to_move();
    let moves = order_moves(rules, ctx.history, rules.legal_moves());

    for mv in moves {
        rules.make_move(mv);
        let score = -alpha_beta(rules, depth - 1, ply + 1, -beta, -alpha, ctx);
        rules.unmake_move();

        if ctx.aborted {
            return 0;
        }

        if score > alpha {
            alpha = score;
            if alpha >= beta {
                ctx.history.reward(side, mv.source(), mv.dest(), depth);
                return beta;
            }
        }
    }

    alpha
}

/// Capture-only search from a leaf.
///
/// `ply` is the distance from the root and `qply` the distance from the
/// leaf. A checkmated side scores as in [`alpha_beta`]; otherwise the node
/// stands pat on the static evaluation. Past the configured ply cap only the
/// stand-pat score is used.
fn quiescence<R: Rules>(
    rules: &mut R,
    ply: u8,
    qply: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.stats.quiescence_nodes += 1;
    if ctx.should_abort() {
        return 0;
    }

    if rules.in_check() && rules.is_checkmate() {
        return i32::from(ply) - MATE_SCORE;
    }

    let stand_pat = evaluate(rules);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    if qply >= ctx.config.quiescence_depth {
        return alpha;
    }

    let captures = order_moves(rules, ctx.history, rules.capture_moves());
    for mv in captures {
        rules.make_move(mv);
        let score = -quiescence(rules, ply + 1, qply + 1, -beta, -alpha, ctx);
        rules.unmake_move();

        if ctx.aborted {
            return 0;
        }

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
