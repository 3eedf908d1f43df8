//! Material evaluation
//!
//! Scores a position by counting piece values, from White's perspective
//! (positive favors White). Used standalone for one-ply greedy lookahead
//! and as the leaf evaluation inside the bot's minimax search.

use crate::oracle::{PieceKind, RulesOracle, Side, Square};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

/// Centipawn value of a piece kind. The king is worth zero here; mates are
/// not scored by the material heuristic.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => 0,
    }
}

/// Evaluate the current material balance, White-positive.
///
/// Pure function of the oracle's board state; O(board size).
pub fn evaluate(oracle: &dyn RulesOracle) -> i32 {
    let mut score = 0;
    for square in Square::all() {
        if let Some((kind, side)) = oracle.piece_at(square) {
            let value = piece_value(kind);
            score += match side {
                Side::White => value,
                Side::Black => -value,
            };
        }
    }
    score
}
