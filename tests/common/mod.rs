//! Scripted rules oracle used by the integration suites
//!
//! Implements [`RulesOracle`] over a small piece-geometry board: full
//! movement rules for all six piece kinds plus promotion, legality
//! filtering (own king may not be left attacked), check detection, and
//! checkmate/stalemate classification. Castling and en passant are not
//! modeled; the test positions never need them.
//!
//! Positions load from the piece-placement and side fields of a FEN
//! string, which is also the snapshot format, so the search engine's
//! snapshot-restore contract is observable in tests. `apply_calls` counts
//! every attempted application, making node budgets observable too.

#![allow(dead_code)]

use chess_tutor::{
    GameOutcome, PieceKind, PositionSpec, PromotionPiece, RulesOracle, Side, Square, VerboseMove,
};
use std::collections::BTreeMap;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

type Board = BTreeMap<Square, (PieceKind, Side)>;

const KNIGHT_JUMPS: [(i16, i16); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_STEPS: [(i16, i16); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
const ROOK_DIRS: [(i16, i16); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i16, i16); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub struct TestOracle {
    board: Board,
    side: Side,
    history: Vec<(Board, Side)>,
    /// Count of `apply_move` calls, exploratory ones included.
    pub apply_calls: usize,
}

impl TestOracle {
    pub fn new() -> Self {
        Self::from_fen(START_FEN)
    }

    pub fn from_fen(fen: &str) -> Self {
        let (board, side) = parse_fen(fen);
        Self {
            board,
            side,
            history: Vec::new(),
            apply_calls: 0,
        }
    }

    pub fn fen(&self) -> String {
        let mut rows = Vec::new();
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                match self.board.get(&Square::new(file, rank)) {
                    Some(&(kind, side)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece_char(kind, side));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }
        let side = match self.side {
            Side::White => 'w',
            Side::Black => 'b',
        };
        format!("{} {} - - 0 1", rows.join("/"), side)
    }

    fn legal_moves_for_side(&self, side: Side) -> Vec<VerboseMove> {
        let mut moves = Vec::new();
        for (&from, &(kind, piece_side)) in &self.board {
            if piece_side != side {
                continue;
            }
            for (to, promotion) in pseudo_moves(&self.board, from, kind, side) {
                let after = simulate(&self.board, from, to, kind, side, promotion);
                let Some(own_king) = king_square(&after, side) else {
                    continue;
                };
                if square_attacked(&after, own_king, side.opposite()) {
                    continue;
                }
                let gives_check = king_square(&after, side.opposite())
                    .is_some_and(|k| square_attacked(&after, k, side));
                moves.push(VerboseMove {
                    from,
                    to,
                    promotion,
                    captured: self.board.get(&to).map(|&(k, _)| k),
                    gives_check,
                });
            }
        }
        moves
    }

    fn kings_only(&self) -> bool {
        self.board.values().all(|&(kind, _)| kind == PieceKind::King)
    }
}

impl RulesOracle for TestOracle {
    fn load_starting_position(&mut self) {
        let (board, side) = parse_fen(START_FEN);
        self.board = board;
        self.side = side;
        self.history.clear();
    }

    fn load_position(&mut self, spec: &PositionSpec) {
        let (board, side) = parse_fen(spec.as_str());
        self.board = board;
        self.side = side;
        self.history.clear();
    }

    fn current_position_spec(&self) -> PositionSpec {
        PositionSpec::new(self.fen())
    }

    fn side_to_move(&self) -> Side {
        self.side
    }

    fn piece_at(&self, square: Square) -> Option<(PieceKind, Side)> {
        self.board.get(&square).copied()
    }

    fn legal_destinations_from(&self, square: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .legal_moves_verbose_from(square)
            .into_iter()
            .map(|m| m.to)
            .collect();
        // Promotion variants share a destination.
        targets.dedup();
        targets
    }

    fn legal_moves_verbose_from(&self, square: Square) -> Vec<VerboseMove> {
        self.legal_moves_for_side(self.side)
            .into_iter()
            .filter(|m| m.from == square)
            .collect()
    }

    fn all_legal_moves_verbose(&self) -> Vec<VerboseMove> {
        self.legal_moves_for_side(self.side)
    }

    fn apply_move(&mut self, from: Square, to: Square, promotion: Option<PromotionPiece>) -> bool {
        self.apply_calls += 1;
        let legal = self
            .all_legal_moves_verbose()
            .into_iter()
            .any(|m| m.from == from && m.to == to && m.promotion == promotion);
        if !legal {
            return false;
        }
        let Some(&(kind, side)) = self.board.get(&from) else {
            return false;
        };
        self.history.push((self.board.clone(), self.side));
        self.board = simulate(&self.board, from, to, kind, side, promotion);
        self.side = self.side.opposite();
        true
    }

    fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some((board, side)) => {
                self.board = board;
                self.side = side;
                true
            }
            None => false,
        }
    }

    fn is_side_to_move_in_check(&self) -> bool {
        king_square(&self.board, self.side)
            .is_some_and(|k| square_attacked(&self.board, k, self.side.opposite()))
    }

    fn is_game_over(&self) -> bool {
        self.kings_only() || self.legal_moves_for_side(self.side).is_empty()
    }

    fn outcome(&self) -> Option<GameOutcome> {
        if self.legal_moves_for_side(self.side).is_empty() {
            if self.is_side_to_move_in_check() {
                return Some(GameOutcome::Checkmate {
                    winner: self.side.opposite(),
                });
            }
            return Some(GameOutcome::Stalemate);
        }
        if self.kings_only() {
            return Some(GameOutcome::Draw);
        }
        None
    }
}

fn parse_fen(fen: &str) -> (Board, Side) {
    let mut parts = fen.split_whitespace();
    let placement = parts.next().unwrap_or("8/8/8/8/8/8/8/8");
    let side = match parts.next() {
        Some("b") => Side::Black,
        _ => Side::White,
    };
    let mut board = Board::new();
    for (row_index, row) in placement.split('/').enumerate() {
        let rank = 7 - row_index as u8;
        let mut file = 0u8;
        for ch in row.chars() {
            if let Some(skip) = ch.to_digit(10) {
                file += skip as u8;
            } else {
                board.insert(Square::new(file, rank), piece_from_char(ch));
                file += 1;
            }
        }
    }
    (board, side)
}

fn piece_from_char(ch: char) -> (PieceKind, Side) {
    let side = if ch.is_ascii_uppercase() {
        Side::White
    } else {
        Side::Black
    };
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        other => panic!("bad FEN piece char {other:?}"),
    };
    (kind, side)
}

fn piece_char(kind: PieceKind, side: Side) -> char {
    let ch = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match side {
        Side::White => ch.to_ascii_uppercase(),
        Side::Black => ch,
    }
}

fn offset(sq: Square, df: i16, dr: i16) -> Option<Square> {
    let file = sq.file as i16 + df;
    let rank = sq.rank as i16 + dr;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square::new(file as u8, rank as u8))
    } else {
        None
    }
}

/// Candidate (destination, promotion) pairs for a piece, before legality
/// filtering. Promotion-rank pawn moves expand to all four choices.
fn pseudo_moves(
    board: &Board,
    from: Square,
    kind: PieceKind,
    side: Side,
) -> Vec<(Square, Option<PromotionPiece>)> {
    let mut out = Vec::new();
    let mut push = |to: Square| {
        if kind == PieceKind::Pawn && (to.rank == 7 || to.rank == 0) {
            for choice in PromotionPiece::ALL {
                out.push((to, Some(choice)));
            }
        } else {
            out.push((to, None));
        }
    };

    match kind {
        PieceKind::Pawn => {
            let dir: i16 = if side == Side::White { 1 } else { -1 };
            let start_rank = if side == Side::White { 1 } else { 6 };
            if let Some(one) = offset(from, 0, dir) {
                if board.get(&one).is_none() {
                    push(one);
                    if from.rank == start_rank {
                        if let Some(two) = offset(from, 0, 2 * dir) {
                            if board.get(&two).is_none() {
                                push(two);
                            }
                        }
                    }
                }
            }
            for df in [-1, 1] {
                if let Some(to) = offset(from, df, dir) {
                    if board.get(&to).is_some_and(|&(_, s)| s != side) {
                        push(to);
                    }
                }
            }
        }
        PieceKind::Knight => {
            for (df, dr) in KNIGHT_JUMPS {
                if let Some(to) = offset(from, df, dr) {
                    if board.get(&to).is_none_or(|&(_, s)| s != side) {
                        push(to);
                    }
                }
            }
        }
        PieceKind::King => {
            for (df, dr) in KING_STEPS {
                if let Some(to) = offset(from, df, dr) {
                    if board.get(&to).is_none_or(|&(_, s)| s != side) {
                        push(to);
                    }
                }
            }
        }
        PieceKind::Rook => slide(board, from, side, &ROOK_DIRS, &mut push),
        PieceKind::Bishop => slide(board, from, side, &BISHOP_DIRS, &mut push),
        PieceKind::Queen => {
            slide(board, from, side, &ROOK_DIRS, &mut push);
            slide(board, from, side, &BISHOP_DIRS, &mut push);
        }
    }
    out
}

fn slide(
    board: &Board,
    from: Square,
    side: Side,
    dirs: &[(i16, i16)],
    push: &mut impl FnMut(Square),
) {
    for &(df, dr) in dirs {
        let mut step = 1;
        while let Some(to) = offset(from, df * step, dr * step) {
            match board.get(&to) {
                None => push(to),
                Some(&(_, s)) => {
                    if s != side {
                        push(to);
                    }
                    break;
                }
            }
            step += 1;
        }
    }
}

fn simulate(
    board: &Board,
    from: Square,
    to: Square,
    kind: PieceKind,
    side: Side,
    promotion: Option<PromotionPiece>,
) -> Board {
    let mut after = board.clone();
    after.remove(&from);
    let final_kind = promotion.map(PromotionPiece::kind).unwrap_or(kind);
    after.insert(to, (final_kind, side));
    after
}

fn king_square(board: &Board, side: Side) -> Option<Square> {
    board
        .iter()
        .find(|(_, &(kind, s))| kind == PieceKind::King && s == side)
        .map(|(&sq, _)| sq)
}

fn square_attacked(board: &Board, target: Square, by: Side) -> bool {
    for (&from, &(kind, side)) in board {
        if side != by || from == target {
            continue;
        }
        let df = target.file as i16 - from.file as i16;
        let dr = target.rank as i16 - from.rank as i16;
        let hits = match kind {
            PieceKind::Pawn => {
                let dir: i16 = if by == Side::White { 1 } else { -1 };
                dr == dir && df.abs() == 1
            }
            PieceKind::Knight => KNIGHT_JUMPS.contains(&(df, dr)),
            PieceKind::King => df.abs() <= 1 && dr.abs() <= 1,
            PieceKind::Rook => (df == 0 || dr == 0) && ray_clear(board, from, target),
            PieceKind::Bishop => df.abs() == dr.abs() && ray_clear(board, from, target),
            PieceKind::Queen => {
                (df == 0 || dr == 0 || df.abs() == dr.abs()) && ray_clear(board, from, target)
            }
        };
        if hits {
            return true;
        }
    }
    false
}

/// Whether the squares strictly between `from` and `to` (which must share
/// a rank, file, or diagonal) are all empty.
fn ray_clear(board: &Board, from: Square, to: Square) -> bool {
    let df = (to.file as i16 - from.file as i16).signum();
    let dr = (to.rank as i16 - from.rank as i16).signum();
    let mut step = 1;
    while let Some(sq) = offset(from, df * step, dr * step) {
        if sq == to {
            return true;
        }
        if board.contains_key(&sq) {
            return false;
        }
        step += 1;
    }
    false
}

/// Install a test subscriber once so `RUST_LOG` works under `cargo test`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parse an algebraic square in test code, where panicking on a typo is
/// the right behavior.
pub fn sq(notation: &str) -> Square {
    notation.parse().expect("valid algebraic square")
}
