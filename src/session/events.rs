//! Session transition events and the observer list
//!
//! Presentation layers subscribe to the session instead of polling it. The
//! observer list is explicit state on the aggregate's owner, not ambient
//! global state.

use super::game_over::GameOverState;
use super::turn::TurnOwner;
use crate::oracle::Square;

/// A state transition worth announcing to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    MoveApplied {
        from: Square,
        to: Square,
        by: TurnOwner,
    },
    /// A promotion-requiring move was attempted; the oracle is untouched
    /// until the choice is confirmed.
    PromotionRequested {
        from: Square,
        to: Square,
    },
    RewardGranted {
        total: u32,
    },
    LessonCompleted {
        lesson_id: String,
    },
    GameEnded {
        state: GameOverState,
    },
    /// The session was reset: restart, lesson load, or lesson exit.
    SessionReset,
}

/// Receiver for session transitions. Implemented for free by closures.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F: FnMut(&SessionEvent)> SessionObserver for F {
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}
