//! Static evaluation.
//!
//! Scores are from the side to move's perspective: material difference plus
//! the mover's positional score minus the opponent's, where the opponent's
//! positional score is taken after a null move. When the mover is in check
//! the null move is refused and the opponent's mobility is read off its
//! attack sets instead.

pub mod defenders;
pub mod material;
pub mod mobility;
pub mod pawns;
pub mod safety;

use chess::Color;

use crate::rules::Rules;

use defenders::DefenderMap;
use material::material;
use mobility::{attack_mobility, mobility};
use pawns::pawn_credit;
use safety::{king_exposure, piece_safety};

/// Positional score for whichever side is to move.
///
/// Mobility, piece safety and pawn credit, less king exposure.
pub fn positional<R: Rules>(rules: &R) -> i32 {
    positional_terms(rules, rules.side_to_move(), mobility(rules))
}

/// Positional score for `color` with its mobility taken from attack sets.
pub fn positional_by_attacks<R: Rules>(rules: &R, color: Color) -> i32 {
    positional_terms(rules, color, attack_mobility(rules, color))
}

fn positional_terms<R: Rules>(rules: &R, color: Color, mobility: i32) -> i32 {
    let defenders = DefenderMap::for_side(rules, color);
    mobility + piece_safety(rules, color, &defenders) - king_exposure(rules, color)
        + pawn_credit(rules, color, &defenders)
}

/// Evaluate the position from the side to move's perspective.
///
/// The position is left as it was found.
pub fn evaluate<R: Rules>(rules: &mut R) -> i32 {
    let us = rules.side_to_move();
    let balance = material(rules, us) - material(rules, !us);

    let theirs = if rules.make_null_move() {
        let theirs = positional(rules);
        rules.unmake_null_move();
        theirs
    } else {
        positional_by_attacks(rules, !us)
    };

    balance + positional(rules) - theirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Game;

    #[test]
    fn starting_position_is_balanced() {
        let mut game = Game::new();
        assert_eq!(evaluate(&mut game), 0);
    }

    #[test]
    fn evaluation_restores_position() {
        let mut game =
            Game::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                .unwrap();
        let hash = game.hash();
        evaluate(&mut game);
        assert_eq!(game.hash(), hash);
        assert_eq!(game.undo_depth(), 0);
    }

    #[test]
    fn zero_sum_under_null_move() {
        let mut game =
            Game::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                .unwrap();
        let white = evaluate(&mut game);
        assert!(game.make_null_move());
        let black = evaluate(&mut game);
        game.unmake_null_move();
        assert_eq!(white, -black);
    }

    #[test]
    fn extra_queen_dominates() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(evaluate(&mut game) > 500);
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        assert!(evaluate(&mut game) < -500);
    }

    #[test]
    fn in_check_scores_both_sides() {
        // White is in check from the rook and a knight down
        let mut game = Game::from_fen("4k3/8/8/8/8/8/4r3/4K1N1 w - - 0 1").unwrap();
        let ours = positional(&game);
        let theirs = positional_by_attacks(&game, Color::Black);

        // White: Kd1, Kf1, Kxe2 and Nxe2 (341), king sees 14 squares (374)
        assert_eq!(ours, 341 - 374);
        // Black: rook 12 squares, king 5 (569), king sees 20 squares (447)
        assert_eq!(theirs, 569 - 447);
        assert_eq!(evaluate(&mut game), (300 - 500) + ours - theirs);
        assert_eq!(evaluate(&mut game), -355);
    }

    #[test]
    fn attack_terms_agree_with_null_move_when_nothing_is_attacked() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/N3K3 b - - 0 1").unwrap();
        let by_attacks = positional_by_attacks(&game, Color::White);
        assert!(game.make_null_move());
        assert_eq!(positional(&game), by_attacks);
        game.unmake_null_move();
    }

    #[test]
    fn positional_matches_components() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        // Mobility 364, knight a1 undefended, no pawns, king exposure 458
        assert_eq!(positional(&game), 364 - 458);
    }
}
