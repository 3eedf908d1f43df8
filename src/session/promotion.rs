//! Pending pawn promotion record

use crate::oracle::{PromotionPiece, Square};

/// A promotion-requiring move that has been attempted but not yet
/// confirmed. While one of these is pending, no other move may be
/// attempted; the oracle has not been mutated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    /// Choices offered to the player, in display order.
    pub options: [PromotionPiece; 4],
}

impl PendingPromotion {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            options: PromotionPiece::ALL,
        }
    }
}
