//! Turn ownership

/// Who should act next: the human learner or the bot opponent.
///
/// Sessions always start on the human's turn. Note this is distinct from
/// the oracle's side to move: lessons are single-player, so the human may
/// legally move both sides there while `TurnOwner` keeps alternating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnOwner {
    #[default]
    Human,
    Bot,
}

impl TurnOwner {
    pub fn flip(self) -> Self {
        match self {
            TurnOwner::Human => TurnOwner::Bot,
            TurnOwner::Bot => TurnOwner::Human,
        }
    }
}
