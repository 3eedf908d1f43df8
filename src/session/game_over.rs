//! Terminal game state tracking
//!
//! Starts as `Playing` and transitions to a terminal state when the oracle
//! reports the game over. All non-`Playing` states block further move
//! application until the session restarts; they are results, not errors.

use crate::oracle::{GameOutcome, Side};

/// The session's view of whether and how the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOverState {
    #[default]
    Playing,
    Checkmate {
        winner: Side,
    },
    Stalemate,
    Draw,
}

impl GameOverState {
    pub fn from_outcome(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Checkmate { winner } => GameOverState::Checkmate { winner },
            GameOutcome::Stalemate => GameOverState::Stalemate,
            GameOutcome::Draw => GameOverState::Draw,
        }
    }

    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameOverState::Playing)
    }

    /// The side that delivered the terminal result, if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameOverState::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}
