//! Bot opponent: difficulty levels and move selection
//!
//! The bot picks one legal move under a bounded computation budget. Five
//! ordered difficulty levels map onto selection strategies ranging from
//! uniform-random play to shallow alpha-beta minimax with a hard node
//! budget. Deliberately not a full-strength engine: there is no
//! transposition table, no iterative deepening, and no opening book, in
//! exchange for a small, predictable cost per move.

mod level;
mod search;

pub use level::BotLevel;
pub use search::{select_move, SearchBudget};
