//! chess_tutor — turn-based practice sessions with a tiered bot opponent
//! and guided lessons
//!
//! This crate is the game-session core of a chess tutoring app. It does
//! not implement chess rules; it consumes a [`RulesOracle`] supplied by an
//! external engine and layers on top of it:
//!
//! - a [`Session`] state machine governing turns, selection, pending
//!   promotions, rewards, lessons, and terminal states,
//! - a tiered bot ([`BotLevel`], [`select_move`]) from near-random play up
//!   to node-budgeted alpha-beta minimax,
//! - a material [`evaluate`] heuristic,
//! - lesson [`Goal`]s (reach / capture / check) and their evaluator.
//!
//! Presentation, input handling, and persistence live outside this crate;
//! they read session state and call the session's action entry points.

pub mod bot;
pub mod error;
pub mod eval;
pub mod lesson;
pub mod oracle;
pub mod session;

pub use bot::{select_move, BotLevel, SearchBudget};
pub use error::{TutorError, TutorResult};
pub use eval::{evaluate, piece_value};
pub use lesson::{builtin_lessons, is_goal_met, lessons_from_json, Goal, Lesson};
pub use oracle::{
    GameOutcome, PieceKind, PositionSpec, PromotionPiece, RulesOracle, Side, Square, VerboseMove,
};
pub use session::{
    GameOverState, PendingBotReply, PendingPromotion, RewardTracker, Selection, Session,
    SessionEvent, SessionObserver, TurnOwner,
};
