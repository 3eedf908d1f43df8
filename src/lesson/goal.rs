//! Lesson goals and goal evaluation

use crate::oracle::{RulesOracle, Side, Square};
use serde::{Deserialize, Serialize};

/// A declarative lesson win condition.
///
/// Serializes tagged, so catalogs read naturally:
/// `{"type": "reach", "targets": ["a8"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Goal {
    /// Land one of the learner's pieces on any target square.
    Reach { targets: Vec<Square> },
    /// Clear every target square (capture whatever sits there).
    Capture { targets: Vec<Square> },
    /// Put the given side's king in check.
    Check { side: Side },
}

impl Goal {
    /// Target squares for goals that have them; empty for check goals.
    /// Used by the hint search to steer suggestions toward the goal.
    pub fn target_squares(&self) -> &[Square] {
        match self {
            Goal::Reach { targets } | Goal::Capture { targets } => targets,
            Goal::Check { .. } => &[],
        }
    }
}

/// Decide whether `goal` is satisfied, called immediately after a move has
/// been applied: the oracle already reflects the post-move position and the
/// now-opposite side to move.
///
/// The check goal compares its defending side against the *post-move* side
/// to move, because the oracle's check predicate is always relative to the
/// side to move.
pub fn is_goal_met(oracle: &dyn RulesOracle, goal: &Goal) -> bool {
    let side_to_move = oracle.side_to_move();
    match goal {
        Goal::Reach { targets } => targets.iter().any(|&sq| {
            // A piece of the side that is NOT to move is one the mover just
            // placed (or already had) there.
            oracle
                .piece_at(sq)
                .is_some_and(|(_, side)| side != side_to_move)
        }),
        Goal::Capture { targets } => targets.iter().all(|&sq| oracle.piece_at(sq).is_none()),
        Goal::Check { side } => oracle.is_side_to_move_in_check() && side_to_move == *side,
    }
}
