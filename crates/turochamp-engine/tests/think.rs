//! Integration tests for the iterative-deepening search.
//!
//! A `Spy` wrapping the real rules adapter records every move the search
//! makes, so pruning and stack discipline can be checked from outside.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chess::{BitBoard, Color, Piece, Square};
use turochamp_engine::{
    CastleSide, Game, MATE_THRESHOLD, Move, Rules, SearchConfig, SearchControl, SearchResult,
    Searcher, think,
};

const SCHOLARS_MATE_FEN: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

const HANGING_QUEEN_FEN: &str = "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1";

const STALEMATE_FEN: &str = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";

/// Rules wrapper that logs `(stack height, move)` for every make.
struct Spy<R> {
    inner: R,
    height: usize,
    made: Vec<(usize, Move)>,
    /// Raise this flag once this many moves have been made.
    stop_after: Option<(usize, Arc<AtomicBool>)>,
}

impl<R: Rules> Spy<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            height: 0,
            made: Vec::new(),
            stop_after: None,
        }
    }

    /// Number of height-1 replies explored under each root move, in order.
    fn replies_per_root_move(&self) -> Vec<(Move, usize)> {
        let mut groups: Vec<(Move, usize)> = Vec::new();
        for &(height, mv) in &self.made {
            match height {
                0 => groups.push((mv, 0)),
                1 => {
                    if let Some(last) = groups.last_mut() {
                        last.1 += 1;
                    }
                }
                _ => {}
            }
        }
        groups
    }
}

impl<R: Rules> Rules for Spy<R> {
    fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    fn legal_moves(&self) -> Vec<Move> {
        self.inner.legal_moves()
    }

    fn capture_moves(&self) -> Vec<Move> {
        self.inner.capture_moves()
    }

    fn make_move(&mut self, mv: Move) {
        self.made.push((self.height, mv));
        if let Some((limit, flag)) = &self.stop_after
            && self.made.len() >= *limit
        {
            flag.store(true, Ordering::Relaxed);
        }
        self.height += 1;
        self.inner.make_move(mv);
    }

    fn unmake_move(&mut self) {
        assert!(self.height > 0, "unmake without make");
        self.height -= 1;
        self.inner.unmake_move();
    }

    fn make_null_move(&mut self) -> bool {
        let accepted = self.inner.make_null_move();
        if accepted {
            self.height += 1;
        }
        accepted
    }

    fn unmake_null_move(&mut self) {
        assert!(self.height > 0, "unmake without make");
        self.height -= 1;
        self.inner.unmake_null_move();
    }

    fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    fn is_draw(&self) -> bool {
        self.inner.is_draw()
    }

    fn is_attacked_by_opponent(&self, square: Square) -> bool {
        self.inner.is_attacked_by_opponent(square)
    }

    fn has_castle_right(&self, color: Color, side: CastleSide) -> bool {
        self.inner.has_castle_right(color, side)
    }

    fn pieces(&self, piece: Piece, color: Color) -> BitBoard {
        self.inner.pieces(piece, color)
    }

    fn piece_attacks(&self, piece: Piece, color: Color, square: Square) -> BitBoard {
        self.inner.piece_attacks(piece, color, square)
    }

    fn king_square(&self, color: Color) -> Square {
        self.inner.king_square(color)
    }

    fn hash(&self) -> u64 {
        self.inner.hash()
    }
}

fn search<R: Rules>(rules: &mut R, depth: u8) -> SearchResult {
    let control = SearchControl::new_infinite(Arc::new(AtomicBool::new(false)));
    let mut searcher = Searcher::new(SearchConfig::default().with_max_depth(depth));
    searcher.think(rules, &control, |_, _, _, _| {})
}

// ── Stack discipline ──────────────────────────────────────────────────────────

#[test]
fn search_restores_position() {
    let mut spy = Spy::new(Game::from_fen(SCHOLARS_MATE_FEN).unwrap());
    let hash = spy.hash();
    search(&mut spy, 3);
    assert_eq!(spy.height, 0, "every make must be unmade");
    assert_eq!(spy.hash(), hash);
    assert_eq!(spy.inner.undo_depth(), 0);
}

#[test]
fn aborted_iteration_is_discarded() {
    // Depth 1 makes the 20 root moves; the flag goes up during depth 2
    let stopped = Arc::new(AtomicBool::new(false));
    let mut spy = Spy::new(Game::new());
    spy.stop_after = Some((30, Arc::clone(&stopped)));
    let hash = spy.hash();

    let control = SearchControl::new_infinite(stopped);
    let mut searcher = Searcher::default();
    let mut completed = Vec::new();
    let result = searcher.think(&mut spy, &control, |depth, _, _, _| completed.push(depth));

    assert_eq!(completed, vec![1]);
    assert_eq!(result.depth, 1);
    assert!(result.best_move.is_some());
    assert!(result.stats.total() > 21, "aborted nodes still counted");
    assert_eq!(spy.height, 0);
    assert_eq!(spy.hash(), hash);
}

// ── Pruning ───────────────────────────────────────────────────────────────────

#[test]
fn beta_cutoff_skips_remaining_replies() {
    let mut spy = Spy::new(Game::new());
    search(&mut spy, 2);

    // Depth 1 contributes 20 root moves with no replies; keep depth 2 only
    let groups = spy.replies_per_root_move();
    assert_eq!(groups.len(), 40);
    let depth_two = &groups[20..];

    // The first root move is searched with a full window
    assert_eq!(depth_two[0].1, 20, "first root move sees every reply");

    // Later root moves are refuted without looking at every reply
    assert!(
        depth_two[1..].iter().any(|&(_, replies)| replies < 20),
        "expected at least one cutoff, got {:?}",
        depth_two.iter().map(|&(_, n)| n).collect::<Vec<_>>()
    );
}

#[test]
fn cutoffs_feed_the_history_table() {
    let mut game = Game::new();
    let control = SearchControl::new_infinite(Arc::new(AtomicBool::new(false)));
    let mut searcher = Searcher::new(SearchConfig::default().with_max_depth(2));
    searcher.think(&mut game, &control, |_, _, _, _| {});

    let rewarded = chess::ALL_SQUARES.iter().any(|&from| {
        chess::ALL_SQUARES
            .iter()
            .any(|&to| searcher.history().score(Color::Black, from, to) > 0)
    });
    assert!(rewarded, "black replies that refuted white moves should be rewarded");
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn finds_mate_in_one() {
    let mut game = Game::from_fen(SCHOLARS_MATE_FEN).unwrap();
    let result = search(&mut game, 2);
    assert_eq!(
        result.best_move.map(|mv| mv.to_uci()).as_deref(),
        Some("h5f7"),
        "should find Qxf7# in the Scholar's mate position"
    );
    assert!(
        result.score >= MATE_THRESHOLD,
        "score {} should indicate mate",
        result.score
    );
}

#[test]
fn wins_hanging_queen() {
    let mut game = Game::from_fen(HANGING_QUEEN_FEN).unwrap();
    let result = search(&mut game, 3);
    assert_eq!(result.best_move.map(|mv| mv.to_uci()).as_deref(), Some("d2d5"));
}

#[test]
fn stalemate_yields_no_move() {
    let mut game = Game::from_fen(STALEMATE_FEN).unwrap();
    let result = search(&mut game, 4);
    assert!(result.best_move.is_none());
    assert_eq!(result.score, 0);
}

#[test]
fn think_returns_legal_move() {
    let mut game = Game::new();
    let mv = think(&mut game, Duration::from_secs(60)).expect("start position has moves");
    assert!(game.legal_moves().contains(&mv));
    assert_eq!(game.undo_depth(), 0);
}

#[test]
fn think_on_finished_game_returns_none() {
    let mut game = Game::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(think(&mut game, Duration::from_secs(1)).is_none());
}

#[test]
fn repeated_root_still_gets_a_move() {
    // The start position has occurred twice; the game goes on until claimed
    let mut game = Game::new();
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        game.play_uci(uci).unwrap();
    }
    assert!(game.is_draw());
    let result = search(&mut game, 2);
    assert!(result.best_move.is_some());
    assert_eq!(game.undo_depth(), 4);
}
