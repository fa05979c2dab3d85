//! Iterative-deepening search and move ordering.

pub mod castling;
pub mod control;
pub mod heuristics;
pub mod negamax;
pub mod ordering;

use std::ops::AddAssign;
use std::time::Duration;

use tracing::debug;

use crate::config::SearchConfig;
use crate::rules::{Move, Rules};

use control::SearchControl;
use heuristics::HistoryTable;
use negamax::{INF, SearchContext, search_root};

/// Node counters, split by search phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub alpha_beta_nodes: u64,
    pub quiescence_nodes: u64,
}

impl SearchStats {
    /// Nodes visited in either phase.
    pub fn total(&self) -> u64 {
        self.alpha_beta_nodes + self.quiescence_nodes
    }
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.alpha_beta_nodes += rhs.alpha_beta_nodes;
        self.quiescence_nodes += rhs.quiescence_nodes;
    }
}

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move of the deepest completed iteration. `None` when the root
    /// is checkmate or stalemate.
    pub best_move: Option<Move>,
    /// Minimax value of the root at the deepest completed iteration.
    pub score: i32,
    /// Score of `best_move` including its castling incentive.
    pub best_score: i32,
    /// Deepest completed iteration.
    pub depth: u8,
    /// Nodes visited across every iteration, aborted ones included.
    pub stats: SearchStats,
}

/// Iterative-deepening searcher.
pub struct Searcher {
    config: SearchConfig,
    history: HistoryTable,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            history: HistoryTable::new(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// History table as left by the last iteration.
    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    /// Run iterative deepening from depth 1 up to the configured maximum.
    ///
    /// Calls `on_iter(depth, score, stats, best_move)` after each completed
    /// iteration with cumulative node counts. Depth 1 is never aborted; a
    /// deeper iteration cut short by `control` is discarded.
    pub fn think<R, F>(&mut self, rules: &mut R, control: &SearchControl, mut on_iter: F) -> SearchResult
    where
        R: Rules,
        F: FnMut(u8, i32, &SearchStats, Option<Move>),
    {
        let mut result = SearchResult {
            best_move: None,
            score: -INF,
            best_score: -INF,
            depth: 0,
            stats: SearchStats::default(),
        };

        for depth in 1..=self.config.max_depth {
            if depth > 1 && control.should_stop_iterating() {
                break;
            }

            self.history.clear();
            let mut ctx = SearchContext::new(&self.config, control, &mut self.history, depth > 1);
            let score = search_root(rules, depth, &mut ctx);
            result.stats += ctx.stats;

            if ctx.aborted {
                debug!(depth, nodes = ctx.stats.total(), "iteration aborted");
                break;
            }

            result.best_move = ctx.best_move;
            result.score = score;
            result.best_score = ctx.best_score;
            result.depth = depth;

            debug!(
                depth,
                best_move = %ctx.best_move.map_or_else(|| "none".to_string(), |mv| mv.to_uci()),
                score,
                nodes = ctx.stats.total(),
                alpha_beta = ctx.stats.alpha_beta_nodes,
                quiescence = ctx.stats.quiescence_nodes,
                "depth complete"
            );

            on_iter(depth, score, &result.stats, result.best_move);

            // Nothing deeper to find from a finished game
            if result.best_move.is_none() {
                break;
            }
        }

        result
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Choose a move for the side to move within `budget`.
///
/// Searches with the default configuration. Returns `None` only when the
/// side to move has no legal move.
pub fn think<R: Rules>(rules: &mut R, budget: Duration) -> Option<Move> {
    let control = SearchControl::with_budget(budget);
    Searcher::default()
        .think(rules, &control, |_, _, _, _| {})
        .best_move
}
