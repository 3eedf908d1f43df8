//! Tiered move selection
//!
//! [`select_move`] picks one legal move for the side to move according to a
//! [`BotLevel`]. The top tiers run a bounded minimax with alpha-beta
//! pruning; the budget is the search's only cancellation mechanism, so a
//! selection call always costs a deterministic, wall-clock-independent
//! amount of work.
//!
//! Exploratory moves are applied to the live oracle and reverted through
//! snapshot-restore. The revert-on-all-paths guarantee is load-bearing: the
//! oracle is a single shared mutable resource, and the caller must observe
//! the exact position it handed in, even when the budget runs out
//! mid-enumeration.

use super::level::BotLevel;
use crate::eval::evaluate;
use crate::oracle::{RulesOracle, Side, VerboseMove};
use rand::{Rng, RngCore};
use tracing::{debug, trace};

/// Scores strictly outside any reachable material balance.
const INF: i32 = 1_000_000;

/// Remaining node visits for one top-level selection call.
///
/// Shared across all recursive calls within that call; never persists
/// across calls. Decremented on every minimax node entered, leaves
/// included.
#[derive(Debug)]
pub struct SearchBudget {
    remaining: i32,
}

impl SearchBudget {
    pub fn new(limit: i32) -> Self {
        Self { remaining: limit }
    }

    pub fn spend(&mut self) {
        self.remaining -= 1;
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }
}

/// Choose a move for the side to move, or `None` on a terminal position.
///
/// The oracle's position after this call equals the position before it, on
/// every path.
pub fn select_move(
    oracle: &mut dyn RulesOracle,
    level: BotLevel,
    rng: &mut dyn RngCore,
) -> Option<VerboseMove> {
    let moves = oracle.all_legal_moves_verbose();
    if moves.is_empty() {
        return None;
    }

    #[cfg(debug_assertions)]
    let spec_before = oracle.current_position_spec();

    let chosen = match level {
        BotLevel::Beginner => pick_uniform(&moves, rng),
        BotLevel::Casual => pick_forcing(&moves, rng),
        BotLevel::Club => pick_greedy(oracle, &moves),
        BotLevel::Advanced | BotLevel::Expert => pick_minimax(oracle, &moves, level),
    };

    #[cfg(debug_assertions)]
    debug_assert_eq!(
        spec_before,
        oracle.current_position_spec(),
        "search must leave the oracle in its pre-search position"
    );

    debug!(
        "[BOT] {:?} picked {} -> {} ({} candidates)",
        level,
        chosen.from,
        chosen.to,
        moves.len()
    );
    Some(chosen)
}

fn pick_uniform(moves: &[VerboseMove], rng: &mut dyn RngCore) -> VerboseMove {
    moves[rng.random_range(0..moves.len())].clone()
}

/// Casual tier: prefer captures, then checks, else anything.
fn pick_forcing(moves: &[VerboseMove], rng: &mut dyn RngCore) -> VerboseMove {
    let captures: Vec<&VerboseMove> = moves.iter().filter(|m| m.is_capture()).collect();
    if !captures.is_empty() {
        return captures[rng.random_range(0..captures.len())].clone();
    }
    let checks: Vec<&VerboseMove> = moves.iter().filter(|m| m.gives_check).collect();
    if !checks.is_empty() {
        return checks[rng.random_range(0..checks.len())].clone();
    }
    pick_uniform(moves, rng)
}

/// Club tier: one-ply greedy on material, from the mover's perspective.
/// Ties keep the first-seen move in the oracle's enumeration order.
fn pick_greedy(oracle: &mut dyn RulesOracle, moves: &[VerboseMove]) -> VerboseMove {
    let sign = perspective_sign(oracle.side_to_move());
    let mut best = moves[0].clone();
    let mut best_score = i32::MIN;
    for mv in moves {
        let score = sign * with_move(oracle, mv, |o| evaluate(o));
        trace!("[BOT] greedy {} -> {} scores {}", mv.from, mv.to, score);
        if score > best_score {
            best_score = score;
            best = mv.clone();
        }
    }
    best
}

/// Advanced/Expert tiers: alpha-beta minimax under a shared node budget.
/// Once the budget runs out, remaining root candidates are skipped and the
/// best move found so far wins.
fn pick_minimax(oracle: &mut dyn RulesOracle, moves: &[VerboseMove], level: BotLevel) -> VerboseMove {
    let maximizing = oracle.side_to_move();
    let depth = level.reply_depth();
    let mut budget = SearchBudget::new(level.node_budget());

    let mut best = moves[0].clone();
    let mut best_score = -INF;
    for mv in moves {
        let score = with_move(oracle, mv, |o| {
            minimax(o, depth, maximizing, -INF, INF, &mut budget)
        });
        if score > best_score {
            best_score = score;
            best = mv.clone();
        }
        if budget.is_exhausted() {
            debug!(
                "[BOT] node budget exhausted after {} -> {}, keeping best so far",
                mv.from, mv.to
            );
            break;
        }
    }
    best
}

/// Minimax with alpha-beta cutoff. The maximizing side is fixed to whoever
/// was to move at the top of the selection call; levels alternate by the
/// oracle's side to move. Move ordering is the oracle's enumeration order.
fn minimax(
    oracle: &mut dyn RulesOracle,
    depth: u32,
    maximizing: Side,
    mut alpha: i32,
    mut beta: i32,
    budget: &mut SearchBudget,
) -> i32 {
    budget.spend();
    if depth == 0 || budget.is_exhausted() {
        return perspective_sign(maximizing) * evaluate(oracle);
    }

    let moves = oracle.all_legal_moves_verbose();
    if moves.is_empty() {
        // No-move nodes score neutral whether checkmate or stalemate. Kept
        // coarse on purpose: it is part of the tiering's weakness curve.
        return 0;
    }

    if oracle.side_to_move() == maximizing {
        let mut best = -INF;
        for mv in &moves {
            if budget.is_exhausted() {
                break;
            }
            let score = with_move(oracle, mv, |o| {
                minimax(o, depth - 1, maximizing, alpha, beta, budget)
            });
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = INF;
        for mv in &moves {
            if budget.is_exhausted() {
                break;
            }
            let score = with_move(oracle, mv, |o| {
                minimax(o, depth - 1, maximizing, alpha, beta, budget)
            });
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

fn perspective_sign(side: Side) -> i32 {
    match side {
        Side::White => 1,
        Side::Black => -1,
    }
}

/// Apply `mv`, run `f`, then restore the pre-move position. The snapshot
/// restore runs regardless of what `f` computed, which is what upholds the
/// revert invariant on early-termination paths.
fn with_move<T>(
    oracle: &mut dyn RulesOracle,
    mv: &VerboseMove,
    f: impl FnOnce(&mut dyn RulesOracle) -> T,
) -> T {
    let snapshot = oracle.current_position_spec();
    oracle.apply_move(mv.from, mv.to, mv.promotion);
    let out = f(oracle);
    oracle.load_position(&snapshot);
    out
}
