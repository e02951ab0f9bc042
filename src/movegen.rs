//! Pseudo-legal move geometry.
//!
//! Everything here ignores whether a move exposes the mover's own king. The
//! check oracle relies on that: it generates the opponent's moves through
//! these functions, so they must never call back into king-safety filtering.

use once_cell::sync::Lazy;

use crate::board::Board;
use crate::types::*;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// On-board destinations of the fixed-offset pieces, per origin square.
pub struct StepTables {
    pub knight: [[Vec<Square>; 8]; 8],
    pub king: [[Vec<Square>; 8]; 8],
}

impl StepTables {
    pub fn new() -> Self {
        Self {
            knight: Self::build(&KNIGHT_OFFSETS),
            king: Self::build(&ALL_DIRECTIONS),
        }
    }

    fn build(offsets: &[(i8, i8)]) -> [[Vec<Square>; 8]; 8] {
        std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                let from = Square::new(row as u8, col as u8);
                offsets
                    .iter()
                    .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
                    .collect()
            })
        })
    }
}

impl Default for StepTables {
    fn default() -> Self {
        Self::new()
    }
}

pub static STEP_TABLES: Lazy<StepTables> = Lazy::new(StepTables::new);

/// What a moving piece finds on a square it could reach.
enum PotentialMove {
    /// Empty square.
    Quiet,
    /// Opposing piece. The square is reachable but nothing behind it is.
    Capture,
    /// Friendly piece. Neither the square nor anything behind it is reachable.
    Blocked,
}

impl PotentialMove {
    fn is_reachable(&self) -> bool {
        !matches!(self, PotentialMove::Blocked)
    }

    fn continue_search_in_direction(&self) -> bool {
        matches!(self, PotentialMove::Quiet)
    }
}

fn check_move_target(board: &Board, piece: &Piece, target: Square) -> PotentialMove {
    match board.piece_at(target) {
        None => PotentialMove::Quiet,
        Some(other) if other.color == piece.color => PotentialMove::Blocked,
        Some(_) => PotentialMove::Capture,
    }
}

/// Every square `piece`, standing on `from`, can reach under its movement
/// rule. Castling is not included, see [`crate::rules::legal_moves`].
pub fn pseudo_legal_moves(board: &Board, piece: &Piece, from: Square) -> Vec<Square> {
    let (row, col) = (from.row as usize, from.col as usize);
    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, piece, from),
        PieceType::Knight => step_moves(board, piece, &STEP_TABLES.knight[row][col]),
        PieceType::Bishop => sliding_moves(board, piece, from, &DIAGONAL),
        PieceType::Rook => sliding_moves(board, piece, from, &ORTHOGONAL),
        PieceType::Queen => sliding_moves(board, piece, from, &ALL_DIRECTIONS),
        PieceType::King => step_moves(board, piece, &STEP_TABLES.king[row][col]),
    }
}

/// [`pseudo_legal_moves`] for whatever stands on `from`, empty if nothing does.
pub fn pseudo_legal_moves_from(board: &Board, from: Square) -> Vec<Square> {
    match board.piece_at(from) {
        Some(piece) => pseudo_legal_moves(board, piece, from),
        None => vec![],
    }
}

/// Pushes one square forward onto an empty square, two from the start rank if
/// the pawn has never moved and both squares are empty, and diagonal captures
/// only onto opposing pieces. No en passant.
fn pawn_moves(board: &Board, piece: &Piece, from: Square) -> Vec<Square> {
    let mut moves = Vec::with_capacity(4);
    let forward = piece.color.forward();

    if let Some(one_step) = from.offset(forward, 0).filter(|sq| board.is_empty(*sq)) {
        moves.push(one_step);

        if !piece.has_moved && from.row == piece.color.pawn_start_rank() {
            if let Some(two_step) = one_step.offset(forward, 0).filter(|sq| board.is_empty(*sq)) {
                moves.push(two_step);
            }
        }
    }

    for side in [-1, 1] {
        if let Some(target) = from.offset(forward, side) {
            if let PotentialMove::Capture = check_move_target(board, piece, target) {
                moves.push(target);
            }
        }
    }
    moves
}

fn step_moves(board: &Board, piece: &Piece, targets: &[Square]) -> Vec<Square> {
    targets
        .iter()
        .copied()
        .filter(|target| check_move_target(board, piece, *target).is_reachable())
        .collect()
}

/// Cast a ray along each direction until the edge of the board, a friendly
/// piece (excluded) or an opposing piece (included as a capture).
fn sliding_moves(board: &Board, piece: &Piece, from: Square, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut moves = Vec::with_capacity(14);
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(candidate) = current.offset(d_row, d_col) {
            let potential_move = check_move_target(board, piece, candidate);
            if potential_move.is_reachable() {
                moves.push(candidate);
            }
            if !potential_move.continue_search_in_direction() {
                break;
            }
            current = candidate;
        }
    }
    moves
}
