//! Bot difficulty levels
//!
//! Five ordered tiers, each bound to one selection strategy:
//!
//! | Level    | Strategy                                   | Budget |
//! |----------|--------------------------------------------|--------|
//! | Beginner | uniform random                             | -      |
//! | Casual   | random capture, else check, else random    | -      |
//! | Club     | one-ply greedy on material                 | -      |
//! | Advanced | minimax, one reply ply, alpha-beta         | 1500   |
//! | Expert   | minimax, two reply plies, alpha-beta       | 2500   |
//!
//! Display labels are a presentation concern and live outside this crate.

/// Bot difficulty tier. Ordered: `Beginner < ... < Expert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BotLevel {
    #[default]
    Beginner,
    Casual,
    Club,
    Advanced,
    Expert,
}

impl BotLevel {
    pub const ALL: [BotLevel; 5] = [
        BotLevel::Beginner,
        BotLevel::Casual,
        BotLevel::Club,
        BotLevel::Advanced,
        BotLevel::Expert,
    ];

    /// 1-based tier index, matching the difficulty scale shown to players.
    pub fn index(self) -> u8 {
        match self {
            BotLevel::Beginner => 1,
            BotLevel::Casual => 2,
            BotLevel::Club => 3,
            BotLevel::Advanced => 4,
            BotLevel::Expert => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index.checked_sub(1)? as usize).copied()
    }

    /// Search plies below each candidate root move. Zero for the tiers that
    /// never enter minimax.
    pub(crate) fn reply_depth(self) -> u32 {
        match self {
            BotLevel::Advanced => 1,
            BotLevel::Expert => 2,
            _ => 0,
        }
    }

    /// Total node budget shared across one selection call.
    pub(crate) fn node_budget(self) -> i32 {
        match self {
            BotLevel::Expert => 2500,
            _ => 1500,
        }
    }
}
