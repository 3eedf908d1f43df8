//! Error types for the tutor core
//!
//! Rejected actions (moving from an empty square, confirming a promotion
//! with none pending, undoing with no history) are not errors; they are
//! silent no-ops handled inside the session. The variants here cover the
//! genuine defects and fallible parsing this crate can encounter.

use crate::oracle::Square;
use thiserror::Error;

/// Errors that can occur in the tutor core
#[derive(Debug, Error)]
pub enum TutorError {
    /// The oracle rejected a move it had itself reported as legal. This is
    /// a defect in the oracle or in session sequencing, never a no-op.
    #[error("Oracle rejected a move it reported legal: {from} -> {to}")]
    OracleDesync { from: Square, to: Square },

    /// Algebraic square notation failed to parse
    #[error("Invalid square notation: {notation:?}")]
    InvalidSquare { notation: String },

    /// Lesson catalog failed to parse
    #[error("Failed to parse lesson catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Result type alias for tutor core operations
pub type TutorResult<T> = Result<T, TutorError>;
