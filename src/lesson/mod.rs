//! Guided-practice lessons
//!
//! A lesson pairs a starting position with one declarative goal. The goal
//! evaluator runs right after each of the learner's moves; lessons are
//! single-player, so the bot never moves while one is active.

mod catalog;
mod goal;

pub use catalog::{builtin_lessons, lessons_from_json, Lesson};
pub use goal::{is_goal_met, Goal};
