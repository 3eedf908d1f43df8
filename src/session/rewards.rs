//! Reward bookkeeping
//!
//! One reward unit is granted every `cadence` successful moves, up to a
//! fixed `cap`. Undoing a move that landed exactly on a cadence boundary
//! takes the reward back, and the count never goes negative.

/// Tracks earned rewards against a grant cadence and cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardTracker {
    earned: u32,
    cadence: u32,
    cap: u32,
}

impl Default for RewardTracker {
    fn default() -> Self {
        Self::new(5, 4)
    }
}

impl RewardTracker {
    pub fn new(cadence: u32, cap: u32) -> Self {
        Self {
            earned: 0,
            cadence: cadence.max(1),
            cap,
        }
    }

    pub fn earned(&self) -> u32 {
        self.earned
    }

    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Evaluate the cadence after a successful move; `move_count` is the
    /// counter value including that move. Returns whether a reward was
    /// granted.
    pub fn on_move_applied(&mut self, move_count: u32) -> bool {
        if move_count % self.cadence == 0 && self.earned < self.cap {
            self.earned += 1;
            true
        } else {
            false
        }
    }

    /// Reverse the grant for an undone move; `move_count_before_undo` is
    /// the counter value while that move was still applied. Returns whether
    /// a reward was taken back.
    pub fn on_move_undone(&mut self, move_count_before_undo: u32) -> bool {
        if move_count_before_undo % self.cadence == 0 && self.earned > 0 {
            self.earned -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.earned = 0;
    }
}
