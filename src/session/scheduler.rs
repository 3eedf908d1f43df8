//! Deferred bot reply scheduling
//!
//! The bot's reply is never played synchronously inside the move that
//! triggers it; it is recorded as a single deferred unit of work with a
//! short fixed delay (presentation pacing, not algorithmic necessity). At
//! most one reply is outstanding at a time: requesting a new one overwrites
//! the old deadline, and stale work is dropped by the session's
//! revalidation check when the deadline is polled, not by cancellation
//! tokens.

use std::time::{Duration, Instant};

/// Default pause before the bot answers, tuned so the reply reads as a
/// deliberate response rather than an instant one.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(450);

/// At most one outstanding deferred bot reply, recorded as a deadline.
#[derive(Debug, Clone)]
pub struct PendingBotReply {
    due: Option<Instant>,
    delay: Duration,
}

impl Default for PendingBotReply {
    fn default() -> Self {
        Self {
            due: None,
            delay: DEFAULT_REPLY_DELAY,
        }
    }
}

impl PendingBotReply {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Record a reply due after the configured delay, superseding any
    /// previously recorded deadline.
    pub fn request(&mut self) {
        self.due = Some(Instant::now() + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Consume the deadline if it has arrived. Returns `true` at most once
    /// per request.
    pub fn take_due(&mut self) -> bool {
        match self.due {
            Some(due) if Instant::now() >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.due = None;
    }
}
