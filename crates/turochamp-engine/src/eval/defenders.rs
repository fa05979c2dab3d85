//! Per-square defender counts for the side being scored.

use chess::{Color, Piece, Square};

use crate::rules::Rules;

/// Non-pawn pieces whose attacks count as defence. Kings do not defend.
const DEFENDING_PIECES: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

/// How many pieces of one side attack each square, split into pawn and
/// non-pawn attackers.
///
/// Built once per positional score so piece safety and pawn credit share the
/// same attack sweep.
#[derive(Debug, Clone)]
pub struct DefenderMap {
    non_pawn: [u8; 64],
    pawn: [u8; 64],
}

impl DefenderMap {
    /// Count the defenders `color` has on every square.
    pub fn for_side<R: Rules>(rules: &R, color: Color) -> Self {
        let mut map = Self {
            non_pawn: [0; 64],
            pawn: [0; 64],
        };

        for piece in DEFENDING_PIECES {
            for from in rules.pieces(piece, color) {
                for target in rules.piece_attacks(piece, color, from) {
                    map.non_pawn[target.to_index()] += 1;
                }
            }
        }

        for from in rules.pieces(Piece::Pawn, color) {
            for target in rules.piece_attacks(Piece::Pawn, color, from) {
                map.pawn[target.to_index()] += 1;
            }
        }

        map
    }

    /// Knight, bishop, rook and queen defenders of `square`.
    #[inline]
    pub fn non_pawn(&self, square: Square) -> u8 {
        self.non_pawn[square.to_index()]
    }

    /// Pawn defenders of `square`.
    #[inline]
    pub fn pawn(&self, square: Square) -> u8 {
        self.pawn[square.to_index()]
    }

    #[inline]
    pub fn total(&self, square: Square) -> u8 {
        self.non_pawn(square) + self.pawn(square)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::rules::Game;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    #[test]
    fn starting_position_white() {
        let game = Game::new();
        let map = DefenderMap::for_side(&game, Color::White);

        // Knight g1, bishop f1 and queen d1 cover e2; the king does not count
        assert_eq!(map.non_pawn(sq("e2")), 3);
        assert_eq!(map.pawn(sq("e2")), 0);

        // c2 and e2 pawns both cover d3
        assert_eq!(map.pawn(sq("d3")), 2);
        assert_eq!(map.non_pawn(sq("f3")), 1);
        assert_eq!(map.total(sq("e5")), 0);
    }

    #[test]
    fn only_counts_requested_side() {
        let game = Game::new();
        let map = DefenderMap::for_side(&game, Color::Black);
        assert_eq!(map.pawn(sq("d3")), 0);
        assert_eq!(map.pawn(sq("d6")), 2);
    }

    #[test]
    fn sliders_are_blocked() {
        // Rook a1 is blocked by the knight on a3
        let game = Game::from_fen("4k3/8/8/8/8/N7/8/R3K3 w - - 0 1").unwrap();
        let map = DefenderMap::for_side(&game, Color::White);
        assert_eq!(map.non_pawn(sq("a3")), 1);
        assert_eq!(map.non_pawn(sq("a4")), 0);
    }
}
