//! Session state machine
//!
//! [`Session`] is the aggregate root for one sitting at the board: whose
//! turn it is, the current selection, pending promotion, reward and move
//! counters, the active lesson, and terminal state. It owns the rules
//! oracle outright and is the only component allowed to mutate it; the bot
//! borrows the oracle transiently during move selection and must hand it
//! back in the same position.
//!
//! # Action model
//!
//! All mutation goes through the action entry points below. Rejected
//! actions (moving from an empty square, targeting an illegal square,
//! confirming with no promotion pending, undoing with no history) are
//! silent no-ops that leave the session unchanged; the presentation layer
//! is expected to only offer legal actions. The one genuine error is
//! [`TutorError::OracleDesync`], raised when the oracle rejects a move it
//! had itself reported legal.
//!
//! # Bot replies
//!
//! A human move in a normal game records a deferred bot reply with a short
//! delay. The driving loop calls [`Session::poll_bot_reply`] each tick; the
//! task body revalidates its preconditions first (still the bot's turn, no
//! promotion pending, no lesson active, game not over) and silently drops
//! stale work otherwise.
//!
//! # Single thread of control
//!
//! Actions execute to completion without interleaving. Nothing here is
//! `Sync`; concurrency, if any, lives in the embedding application.

mod events;
mod game_over;
mod promotion;
mod rewards;
mod scheduler;
mod selection;
mod turn;

pub use events::{SessionEvent, SessionObserver};
pub use game_over::GameOverState;
pub use promotion::PendingPromotion;
pub use rewards::RewardTracker;
pub use scheduler::{PendingBotReply, DEFAULT_REPLY_DELAY};
pub use selection::Selection;
pub use turn::TurnOwner;

use crate::bot::{select_move, BotLevel};
use crate::error::{TutorError, TutorResult};
use crate::lesson::{is_goal_met, Lesson};
use crate::oracle::{PromotionPiece, RulesOracle, Square};
use rand::{Rng, RngCore};
use std::time::Duration;
use tracing::{debug, info};

/// One interactive practice session over an owned rules oracle.
pub struct Session<O: RulesOracle> {
    oracle: O,
    rng: Box<dyn RngCore>,
    observers: Vec<Box<dyn SessionObserver>>,

    lessons: Vec<Lesson>,
    current_lesson: Option<usize>,
    lesson_complete: bool,

    turn: TurnOwner,
    selection: Selection,
    pending_promotion: Option<PendingPromotion>,
    last_move: Option<(Square, Square)>,
    hint: Option<(Square, Square)>,
    move_count: u32,
    rewards: RewardTracker,
    bot_level: BotLevel,
    game_over: GameOverState,
    bot_reply: PendingBotReply,
}

impl<O: RulesOracle> Session<O> {
    /// Create a session over a fresh oracle position with the given lesson
    /// catalog. Starts on the human's turn with no lesson active.
    pub fn new(mut oracle: O, lessons: Vec<Lesson>) -> Self {
        oracle.load_starting_position();
        Self {
            oracle,
            rng: Box::new(rand::rng()),
            observers: Vec::new(),
            lessons,
            current_lesson: None,
            lesson_complete: false,
            turn: TurnOwner::Human,
            selection: Selection::default(),
            pending_promotion: None,
            last_move: None,
            hint: None,
            move_count: 0,
            rewards: RewardTracker::default(),
            bot_level: BotLevel::default(),
            game_over: GameOverState::Playing,
            bot_reply: PendingBotReply::default(),
        }
    }

    /// Replace the randomness source (tests seed a deterministic RNG).
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    // --- reads ---------------------------------------------------------

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn turn(&self) -> TurnOwner {
        self.turn
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        self.pending_promotion.as_ref()
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn hint(&self) -> Option<(Square, Square)> {
        self.hint
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn rewards(&self) -> &RewardTracker {
        &self.rewards
    }

    pub fn bot_level(&self) -> BotLevel {
        self.bot_level
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn current_lesson(&self) -> Option<&Lesson> {
        self.current_lesson.map(|idx| &self.lessons[idx])
    }

    pub fn lesson_complete(&self) -> bool {
        self.lesson_complete
    }

    pub fn game_over(&self) -> GameOverState {
        self.game_over
    }

    pub fn bot_reply_pending(&self) -> bool {
        self.bot_reply.is_pending()
    }

    // --- configuration -------------------------------------------------

    /// Takes effect on the bot's next turn.
    pub fn set_bot_level(&mut self, level: BotLevel) {
        info!("[SESSION] bot level set to {:?}", level);
        self.bot_level = level;
    }

    /// Replace the reward schedule. Resets the earned count, so configure
    /// at session setup.
    pub fn set_reward_schedule(&mut self, cadence: u32, cap: u32) {
        self.rewards = RewardTracker::new(cadence, cap);
    }

    pub fn set_reply_delay(&mut self, delay: Duration) {
        self.bot_reply.set_delay(delay);
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // --- actions -------------------------------------------------------

    /// Pick up a piece. Selecting an empty square or an opponent piece is a
    /// normal deselect, not a failure. Clears any published hint, and also
    /// abandons a pending promotion the way the explicit cancel does.
    pub fn select_origin(&mut self, square: Square) {
        self.hint = None;
        self.pending_promotion = None;
        match self.oracle.piece_at(square) {
            Some((_, side)) if side == self.oracle.side_to_move() => {
                let targets = self.oracle.legal_destinations_from(square);
                self.selection.set(square, targets);
            }
            _ => self.selection.clear(),
        }
    }

    /// Try to move the selected piece to `to`. No-op without a selection or
    /// for a destination the oracle does not list (the selection is kept so
    /// the player can pick another target). A promotion-requiring move
    /// parks as a pending promotion without touching the oracle.
    pub fn attempt_move(&mut self, to: Square) -> TutorResult<()> {
        if self.game_over.is_game_over() || self.pending_promotion.is_some() {
            return Ok(());
        }
        let Some(from) = self.selection.selected else {
            return Ok(());
        };
        let candidates = self.oracle.legal_moves_verbose_from(from);
        let Some(candidate) = candidates.iter().find(|m| m.to == to) else {
            return Ok(());
        };

        if candidate.promotion.is_some() {
            debug!("[SESSION] promotion required for {} -> {}", from, to);
            self.pending_promotion = Some(PendingPromotion::new(from, to));
            self.notify(SessionEvent::PromotionRequested { from, to });
            return Ok(());
        }

        self.apply_and_book(from, to, None, TurnOwner::Human)
    }

    /// Complete a pending promotion with the chosen piece. No-op if nothing
    /// is pending.
    pub fn confirm_promotion(&mut self, choice: PromotionPiece) -> TutorResult<()> {
        let Some(pending) = self.pending_promotion.take() else {
            return Ok(());
        };
        self.apply_and_book(pending.from, pending.to, Some(choice), TurnOwner::Human)
    }

    /// Clear selection, legal targets, and any pending promotion. Always
    /// succeeds.
    pub fn cancel_pending_selection(&mut self) {
        self.selection.clear();
        self.pending_promotion = None;
    }

    /// Reverse the most recent move. No-op if the oracle has no history.
    /// Flips the turn owner back one step per undone ply; a previously
    /// pending promotion is dropped, not restored.
    pub fn undo_last_move(&mut self) {
        if !self.oracle.undo_last_move() {
            return;
        }
        let before = self.move_count;
        self.move_count = before.saturating_sub(1);
        self.rewards.on_move_undone(before);
        self.turn = self.turn.flip();
        self.selection.clear();
        self.pending_promotion = None;
        self.hint = None;
        self.last_move = None;
        // The position is live again, whatever the oracle said before.
        self.game_over = GameOverState::Playing;
        debug!("[SESSION] undid move, counter now {}", self.move_count);
    }

    /// Restart the current activity: the active lesson's starting position
    /// if one is loaded, else the canonical game start. Keeps the lesson
    /// reference and the chosen bot level.
    pub fn restart(&mut self) {
        match self.current_lesson {
            Some(idx) => {
                let spec = self.lessons[idx].position.clone();
                self.oracle.load_position(&spec);
            }
            None => self.oracle.load_starting_position(),
        }
        self.reset_transient();
        info!("[SESSION] restarted");
        self.notify(SessionEvent::SessionReset);
    }

    /// Activate a lesson by id and load its starting position. Unknown ids
    /// are a silent no-op.
    pub fn load_lesson(&mut self, id: &str) {
        let Some(idx) = self.lessons.iter().position(|l| l.id == id) else {
            debug!("[SESSION] unknown lesson id {:?}", id);
            return;
        };
        let spec = self.lessons[idx].position.clone();
        self.current_lesson = Some(idx);
        self.oracle.load_position(&spec);
        self.reset_transient();
        info!("[SESSION] lesson {:?} loaded", id);
        self.notify(SessionEvent::SessionReset);
    }

    /// Leave lesson mode and return to a normal game start.
    pub fn exit_lesson(&mut self) {
        self.current_lesson = None;
        self.oracle.load_starting_position();
        self.reset_transient();
        info!("[SESSION] lesson exited");
        self.notify(SessionEvent::SessionReset);
    }

    /// Publish a suggested move. No-op while a selection exists. In a
    /// lesson with target squares, prefers a move landing on a target; else
    /// prefers a capture; else suggests any legal move. Never mutates the
    /// oracle or the selection.
    pub fn request_hint(&mut self) {
        if self.selection.is_selected() {
            return;
        }
        let moves = self.oracle.all_legal_moves_verbose();
        if moves.is_empty() {
            return;
        }

        if let Some(idx) = self.current_lesson {
            let targets = self.lessons[idx].goal.target_squares();
            if let Some(mv) = moves.iter().find(|m| targets.contains(&m.to)) {
                self.hint = Some((mv.from, mv.to));
                return;
            }
        }
        if let Some(mv) = moves.iter().find(|m| m.is_capture()) {
            self.hint = Some((mv.from, mv.to));
            return;
        }
        let mv = &moves[self.rng.random_range(0..moves.len())];
        self.hint = Some((mv.from, mv.to));
    }

    /// Run the deferred bot reply if its deadline has arrived and its
    /// preconditions still hold. Returns whether a bot move was applied.
    /// Stale or superseded work drops out silently at the revalidation
    /// step.
    pub fn poll_bot_reply(&mut self) -> TutorResult<bool> {
        if !self.bot_reply.take_due() {
            return Ok(false);
        }
        // Revalidate first: the session may have changed since scheduling.
        if self.turn != TurnOwner::Bot
            || self.pending_promotion.is_some()
            || self.current_lesson.is_some()
            || self.game_over.is_game_over()
        {
            debug!("[SESSION] scheduled bot reply dropped by revalidation");
            return Ok(false);
        }
        self.perform_bot_move()
    }

    // --- internals -----------------------------------------------------

    /// Pick and apply the bot's move, then run the shared post-move
    /// bookkeeping. Goal evaluation is skipped here because lessons never
    /// reach this path.
    fn perform_bot_move(&mut self) -> TutorResult<bool> {
        let Some(mv) = select_move(&mut self.oracle, self.bot_level, &mut *self.rng) else {
            return Ok(false);
        };
        info!(
            "[BOT] playing {} -> {} at level {:?}",
            mv.from, mv.to, self.bot_level
        );
        self.apply_and_book(mv.from, mv.to, mv.promotion, TurnOwner::Bot)?;
        Ok(true)
    }

    /// Shared success path for human moves, confirmed promotions, and bot
    /// replies: apply via the oracle, then counters, rewards, lesson goal,
    /// turn flip, last-move record, terminal detection, and bot
    /// scheduling.
    fn apply_and_book(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PromotionPiece>,
        by: TurnOwner,
    ) -> TutorResult<()> {
        if !self.oracle.apply_move(from, to, promotion) {
            return Err(TutorError::OracleDesync { from, to });
        }

        self.move_count += 1;
        if self.rewards.on_move_applied(self.move_count) {
            let total = self.rewards.earned();
            info!("[SESSION] reward granted, total {}", total);
            self.notify(SessionEvent::RewardGranted { total });
        }

        let mut completed_id = None;
        if by == TurnOwner::Human && !self.lesson_complete {
            if let Some(idx) = self.current_lesson {
                let lesson = &self.lessons[idx];
                if is_goal_met(&self.oracle, &lesson.goal) {
                    completed_id = Some(lesson.id.clone());
                }
            }
        }
        if let Some(lesson_id) = completed_id {
            self.lesson_complete = true;
            info!("[SESSION] lesson {:?} complete", lesson_id);
            self.notify(SessionEvent::LessonCompleted { lesson_id });
        }

        self.turn = self.turn.flip();
        self.last_move = Some((from, to));
        self.selection.clear();
        self.pending_promotion = None;
        self.hint = None;
        self.notify(SessionEvent::MoveApplied { from, to, by });

        self.detect_game_over();

        if !self.game_over.is_game_over()
            && self.turn == TurnOwner::Bot
            && self.current_lesson.is_none()
        {
            self.bot_reply.request();
            debug!(
                "[SESSION] bot reply scheduled in {:?}",
                self.bot_reply.delay()
            );
        }
        Ok(())
    }

    fn detect_game_over(&mut self) {
        if !self.oracle.is_game_over() {
            return;
        }
        let state = match self.oracle.outcome() {
            Some(outcome) => GameOverState::from_outcome(outcome),
            // Over but unclassified: treat as a generic draw.
            None => GameOverState::Draw,
        };
        self.game_over = state;
        info!("[SESSION] game over: {:?}", state);
        self.notify(SessionEvent::GameEnded { state });
    }

    /// Reset everything except the lesson catalog, the active lesson
    /// reference, and the chosen bot level.
    fn reset_transient(&mut self) {
        self.move_count = 0;
        self.rewards.reset();
        self.selection.clear();
        self.pending_promotion = None;
        self.last_move = None;
        self.hint = None;
        self.lesson_complete = false;
        self.turn = TurnOwner::Human;
        self.game_over = GameOverState::Playing;
        self.bot_reply.clear();
    }

    fn notify(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}
