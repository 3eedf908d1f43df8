//! Rules oracle interface and the vocabulary types it speaks
//!
//! The tutor core never implements chess rules itself. Everything that
//! decides legality, detects check or checkmate, and serializes board state
//! lives behind the [`RulesOracle`] trait, supplied by an external engine.
//! This module defines that trait plus the small, immutable value types it
//! exchanges with the rest of the crate.
//!
//! # Ownership
//!
//! The oracle is exclusively owned by the session. The move search engine
//! borrows it transiently during a single selection call and must leave it
//! in its original position before returning (see [`crate::bot`]).

use crate::error::TutorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the two chess sides. White is the fixed perspective whose material
/// counts positive in evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// Piece kinds, as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Pieces a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPiece {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// The full choice list, in the order offered while a promotion is pending.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    pub fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }
}

/// A board coordinate. `file` and `rank` are both 0-7, with `a1` at
/// `(0, 0)` and `h8` at `(7, 7)`.
///
/// Displays and parses as algebraic notation (`"a1"` .. `"h8"`), which is
/// also its serde representation so lesson catalogs stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    pub const fn new(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Iterates the 64 squares rank by rank, `a1` first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }

    pub fn is_on_board(self) -> bool {
        self.file < 8 && self.rank < 8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TutorError::InvalidSquare {
            notation: s.to_string(),
        };
        let mut chars = s.chars();
        let file_ch = chars.next().ok_or_else(invalid)?;
        let rank_ch = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
            return Err(invalid());
        }
        Ok(Square {
            file: file_ch as u8 - b'a',
            rank: rank_ch as u8 - b'1',
        })
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One legal move in the oracle's verbose form. Immutable once produced.
///
/// Oracles enumerate one verbose move per promotion choice, so a move with
/// `promotion: Some(_)` indicates the player must pick a piece before the
/// move can be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerboseMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionPiece>,
    pub captured: Option<PieceKind>,
    pub gives_check: bool,
}

impl VerboseMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Opaque, serializable snapshot of a board position.
///
/// Produced and consumed only by the oracle; the tutor core stores and
/// compares these tokens but never parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSpec(String);

impl PositionSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal classification reported by the oracle once a game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Side },
    Stalemate,
    Draw,
}

/// The external rules and position authority consumed by this crate.
///
/// Implementations own the real board representation. The session mutates
/// the position exclusively through [`apply_move`](RulesOracle::apply_move)
/// and [`undo_last_move`](RulesOracle::undo_last_move), or by loading a
/// named starting position; it never constructs positions directly.
pub trait RulesOracle {
    /// Reset to the canonical game start position.
    fn load_starting_position(&mut self);

    /// Load a previously captured or externally supplied position snapshot.
    fn load_position(&mut self, spec: &PositionSpec);

    /// Serializable snapshot of the current position.
    fn current_position_spec(&self) -> PositionSpec;

    fn side_to_move(&self) -> Side;

    fn piece_at(&self, square: Square) -> Option<(PieceKind, Side)>;

    /// Destination squares of all legal moves from `square`.
    fn legal_destinations_from(&self, square: Square) -> Vec<Square>;

    /// Verbose legal moves from `square`, carrying capture, check, and
    /// promotion metadata.
    fn legal_moves_verbose_from(&self, square: Square) -> Vec<VerboseMove>;

    /// Verbose legal moves for the side to move, in the oracle's native
    /// enumeration order. The search engine relies on this order being
    /// stable within one position.
    fn all_legal_moves_verbose(&self) -> Vec<VerboseMove>;

    /// Apply a move. Returns `false` if the move is not legal; the position
    /// is unchanged in that case.
    fn apply_move(&mut self, from: Square, to: Square, promotion: Option<PromotionPiece>) -> bool;

    /// Reverse the most recent applied move. Returns `false` if there is no
    /// move to undo.
    fn undo_last_move(&mut self) -> bool;

    /// Whether the side to move is currently in check.
    fn is_side_to_move_in_check(&self) -> bool;

    fn is_game_over(&self) -> bool;

    /// Terminal classification, or `None` while the game is still running.
    fn outcome(&self) -> Option<GameOutcome>;
}
