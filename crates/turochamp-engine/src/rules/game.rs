//! [`Rules`] adapter over the `chess` crate with a make/unmake stack.

use std::fmt;
use std::str::FromStr;

use chess::{
    BitBoard, Board, BoardStatus, ChessMove, Color, EMPTY, MoveGen, Piece, Square,
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves,
};

use crate::error::RulesError;
use crate::rules::{CastleSide, Move, Rules};

/// Plies without a capture or pawn move after which the game is drawn.
const FIFTY_MOVE_PLIES: u32 = 100;

/// State needed to revert one make or null move.
#[derive(Clone, Copy)]
struct Undo {
    board: Board,
    halfmove_clock: u32,
}

/// A position plus the history needed to undo moves and detect repetition.
///
/// Boards are copied on every make, so unmake is a pop. The hash list holds
/// every earlier position of the game in order, including positions pushed
/// by the search, so repetitions along the search path are detected too.
#[derive(Clone)]
pub struct Game {
    board: Board,
    halfmove_clock: u32,
    undo: Vec<Undo>,
    hashes: Vec<u64>,
}

impl Game {
    /// The standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::default(), 0)
    }

    /// Wrap an existing board with the given halfmove clock.
    pub fn from_board(board: Board, halfmove_clock: u32) -> Self {
        Self {
            board,
            halfmove_clock,
            undo: Vec::with_capacity(64),
            hashes: Vec::with_capacity(64),
        }
    }

    /// Parse a FEN string. The halfmove clock field is honored when present.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let board = Board::from_str(fen).map_err(|_| RulesError::InvalidFen {
            fen: fen.to_string(),
        })?;
        let halfmove_clock = fen
            .split_whitespace()
            .nth(4)
            .and_then(|field| field.parse().ok())
            .unwrap_or(0);
        Ok(Self::from_board(board, halfmove_clock))
    }

    /// Play a move given in UCI notation, if it is legal.
    pub fn play_uci(&mut self, uci_move: &str) -> Result<Move, RulesError> {
        let mv = self
            .legal_moves()
            .into_iter()
            .find(|mv| mv.to_uci() == uci_move)
            .ok_or_else(|| RulesError::IllegalMove {
                uci_move: uci_move.to_string(),
            })?;
        self.make_move(mv);
        Ok(mv)
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Number of moves (including null moves) that can currently be unmade.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// FEN of the current position.
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// Attach piece, capture, and castle facts to a generated move.
    fn describe(&self, mv: ChessMove) -> Move {
        let source = mv.get_source();
        let dest = mv.get_dest();
        let piece = self.board.piece_on(source).unwrap_or(Piece::Pawn);
        let captured = match self.board.piece_on(dest) {
            Some(victim) => Some(victim),
            // A pawn changing file onto an empty square is en passant
            None if piece == Piece::Pawn && source.get_file() != dest.get_file() => {
                Some(Piece::Pawn)
            }
            None => None,
        };
        let castle = piece == Piece::King
            && source
                .get_file()
                .to_index()
                .abs_diff(dest.get_file().to_index())
                == 2;
        Move::new(mv, piece, captured, castle)
    }

    fn push_undo(&mut self) {
        self.undo.push(Undo {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
        });
        self.hashes.push(self.board.get_hash());
    }

    /// Has the current position occurred before with the same side to move,
    /// since the last irreversible move?
    fn is_repetition(&self) -> bool {
        let current = self.board.get_hash();
        self.hashes
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .skip(1)
            .step_by(2)
            .any(|&hash| hash == current)
    }

    /// Bare kings, a single minor piece against a bare king, or one bishop
    /// each on squares of the same colour.
    fn is_insufficient_material(&self) -> bool {
        let heavy = *self.board.pieces(Piece::Pawn)
            | *self.board.pieces(Piece::Rook)
            | *self.board.pieces(Piece::Queen);
        if heavy != EMPTY {
            return false;
        }

        let knights = *self.board.pieces(Piece::Knight);
        let bishops = *self.board.pieces(Piece::Bishop);
        if (knights | bishops).popcnt() <= 1 {
            return true;
        }
        if knights != EMPTY {
            return false;
        }

        let white = self.pieces(Piece::Bishop, Color::White);
        let black = self.pieces(Piece::Bishop, Color::Black);
        white.popcnt() == 1
            && black.popcnt() == 1
            && square_shade(white.to_square()) == square_shade(black.to_square())
    }
}

/// `0` for dark squares, `1` for light.
#[inline]
fn square_shade(square: Square) -> usize {
    (square.get_rank().to_index() + square.get_file().to_index()) % 2
}

impl Rules for Game {
    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.board)
            .map(|mv| self.describe(mv))
            .collect()
    }

    fn capture_moves(&self) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(Move::is_capture)
            .collect()
    }

    fn make_move(&mut self, mv: Move) {
        self.push_undo();
        self.halfmove_clock = if mv.piece() == Piece::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.board = self.board.make_move_new(mv.chess_move());
    }

    fn unmake_move(&mut self) {
        if let Some(undo) = self.undo.pop() {
            self.board = undo.board;
            self.halfmove_clock = undo.halfmove_clock;
            self.hashes.pop();
        }
    }

    fn make_null_move(&mut self) -> bool {
        let Some(flipped) = self.board.null_move() else {
            return false;
        };
        self.push_undo();
        // A passed turn is not a real game position: close the repetition window
        self.halfmove_clock = 0;
        self.board = flipped;
        true
    }

    fn unmake_null_move(&mut self) {
        self.unmake_move();
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn is_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_PLIES
            || self.is_insufficient_material()
            || self.is_repetition()
            || self.board.status() == BoardStatus::Stalemate
    }

    fn is_attacked_by_opponent(&self, square: Square) -> bool {
        let us = self.board.side_to_move();
        let theirs = *self.board.color_combined(!us);
        let occupied = *self.board.combined();
        let queens = *self.board.pieces(Piece::Queen);
        let diagonal = *self.board.pieces(Piece::Bishop) | queens;
        let straight = *self.board.pieces(Piece::Rook) | queens;

        let attackers = (get_knight_moves(square) & *self.board.pieces(Piece::Knight))
            | (get_bishop_moves(square, occupied) & diagonal)
            | (get_rook_moves(square, occupied) & straight)
            | (get_king_moves(square) & *self.board.pieces(Piece::King))
            | get_pawn_attacks(square, us, *self.board.pieces(Piece::Pawn));

        (attackers & theirs) != EMPTY
    }

    fn has_castle_right(&self, color: Color, side: CastleSide) -> bool {
        let rights = self.board.castle_rights(color);
        match side {
            CastleSide::KingSide => rights.has_kingside(),
            CastleSide::QueenSide => rights.has_queenside(),
        }
    }

    fn pieces(&self, piece: Piece, color: Color) -> BitBoard {
        *self.board.pieces(piece) & *self.board.color_combined(color)
    }

    fn piece_attacks(&self, piece: Piece, color: Color, square: Square) -> BitBoard {
        let occupied = *self.board.combined();
        match piece {
            Piece::Pawn => get_pawn_attacks(square, color, !EMPTY),
            Piece::Knight => get_knight_moves(square),
            Piece::Bishop => get_bishop_moves(square, occupied),
            Piece::Rook => get_rook_moves(square, occupied),
            Piece::Queen => get_bishop_moves(square, occupied) | get_rook_moves(square, occupied),
            Piece::King => get_king_moves(square),
        }
    }

    fn king_square(&self, color: Color) -> Square {
        self.board.king_square(color)
    }

    fn hash(&self) -> u64 {
        self.board.get_hash()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("fen", &self.board.to_string())
            .field("halfmove_clock", &self.halfmove_clock)
            .field("undo_depth", &self.undo.len())
            .finish()
    }
}
