//! Lesson definitions and the built-in catalog

use super::goal::Goal;
use crate::error::TutorResult;
use crate::oracle::{PositionSpec, Side, Square};
use serde::{Deserialize, Serialize};

/// One guided-practice lesson: a starting position plus a single goal.
/// Catalog entries are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Starting position, as a load specification for the oracle.
    pub position: PositionSpec,
    pub goal: Goal,
}

/// Parse a lesson catalog from JSON (an array of [`Lesson`] records).
pub fn lessons_from_json(json: &str) -> TutorResult<Vec<Lesson>> {
    Ok(serde_json::from_str(json)?)
}

/// The built-in starter catalog: one reach, one knight reach, one capture,
/// one check lesson, in teaching order.
pub fn builtin_lessons() -> Vec<Lesson> {
    vec![
        Lesson {
            id: "rook-runner".into(),
            title: "Rook Runner".into(),
            description: "Move the rook to the star square.".into(),
            position: PositionSpec::new("4k3/8/8/8/8/8/R6P/4K3 w - - 0 1"),
            goal: Goal::Reach {
                targets: vec![Square::new(0, 7)], // a8
            },
        },
        Lesson {
            id: "knight-hops".into(),
            title: "Knight Hops".into(),
            description: "Hop the knight to the star!".into(),
            position: PositionSpec::new("4k3/8/8/8/8/8/8/RN2K3 w - - 0 1"),
            goal: Goal::Reach {
                targets: vec![Square::new(2, 2)], // c3
            },
        },
        Lesson {
            id: "first-capture".into(),
            title: "First Capture".into(),
            description: "Capture the pawn on d5.".into(),
            position: PositionSpec::new("4k3/8/8/3p4/2B5/8/8/4K3 w - - 0 1"),
            goal: Goal::Capture {
                targets: vec![Square::new(3, 4)], // d5
            },
        },
        Lesson {
            id: "deliver-check".into(),
            title: "Deliver Check".into(),
            description: "Give check to the black king once.".into(),
            position: PositionSpec::new("4k3/8/8/8/8/8/8/3QK3 w - - 0 1"),
            goal: Goal::Check { side: Side::Black },
        },
    ]
}
