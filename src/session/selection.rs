//! Selection state for the currently picked-up piece

use crate::oracle::Square;

/// The learner's current origin selection and the legal destinations from
/// it. Either both are empty or both are populated consistently with the
/// oracle's legal moves from `selected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected: Option<Square>,
    pub legal_targets: Vec<Square>,
}

impl Selection {
    pub fn set(&mut self, square: Square, legal_targets: Vec<Square>) {
        self.selected = Some(square);
        self.legal_targets = legal_targets;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.legal_targets.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }
}
