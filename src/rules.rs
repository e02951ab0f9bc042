//! King safety: the check oracle, the legality filter and castling.

use crate::board::Board;
use crate::movegen::pseudo_legal_moves;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub fn rook_col(&self) -> u8 {
        match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        }
    }

    pub fn king_destination_col(&self) -> u8 {
        match self {
            Self::Kingside => 6,
            Self::Queenside => 2,
        }
    }

    /// The rook ends up next to the king, on the side it came from.
    pub fn rook_destination_col(&self) -> u8 {
        match self {
            Self::Kingside => 5,
            Self::Queenside => 3,
        }
    }

    fn direction(&self) -> i8 {
        match self {
            Self::Kingside => 1,
            Self::Queenside => -1,
        }
    }

    /// Side a king move of two columns toward `to_col` castles on.
    pub fn from_king_destination(to_col: u8) -> Option<CastleSide> {
        match to_col {
            6 => Some(Self::Kingside),
            2 => Some(Self::Queenside),
            _ => None,
        }
    }
}

/// Whether any piece of `attacker` has a pseudo-legal move onto `square`.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, piece)| pseudo_legal_moves(board, piece, from).contains(&square))
}

/// Whether the king of `color` is attacked.
///
/// The opponent's moves are generated unfiltered, so this never recurses
/// into itself. A board without a king for `color` is reported as not in
/// check.
pub fn in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_attacked(board, king, color.other_color()),
        None => false,
    }
}

/// Simulate relocating the piece on `from` to `to` on a scratch copy of the
/// board and report whether its own king is safe afterwards.
pub fn is_move_safe(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    let color = piece.color;
    let mut scratch = board.clone();
    scratch.relocate(from, to);
    !in_check(&scratch, color)
}

/// Whether the king on `king` may castle toward `side`.
///
/// The king and the rook must both be unmoved, every square between them
/// empty, the king not in check, and neither square the king steps through
/// or onto attacked.
pub fn can_castle(board: &Board, king: Square, side: CastleSide) -> bool {
    let Some(king_piece) = board.piece_at(king) else {
        return false;
    };
    if king_piece.piece_type != PieceType::King || king_piece.has_moved {
        return false;
    }

    let rook_square = Square::new(king.row, side.rook_col());
    let rook_ok = board.piece_at(rook_square).is_some_and(|rook| {
        rook.piece_type == PieceType::Rook && rook.color == king_piece.color && !rook.has_moved
    });
    if !rook_ok {
        return false;
    }

    let (low, high) = if king.col < rook_square.col {
        (king.col + 1, rook_square.col)
    } else {
        (rook_square.col + 1, king.col)
    };
    if !(low..high).all(|col| board.is_empty(Square::new(king.row, col))) {
        return false;
    }

    if in_check(board, king_piece.color) {
        return false;
    }

    (1..=2).all(|step| match king.offset(0, step * side.direction()) {
        Some(transit) => is_move_safe(board, king, transit),
        None => false,
    })
}

/// The pseudo-legal destinations of the piece on `from` that leave its own
/// king safe, plus castling destinations for an unmoved king.
///
/// Unsafe candidates are dropped silently. Empty if `from` is empty.
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return vec![];
    };

    let mut moves: Vec<Square> = pseudo_legal_moves(board, piece, from)
        .into_iter()
        .filter(|&to| {
            let safe = is_move_safe(board, from, to);
            if !safe {
                log::trace!("{from}{to} leaves the {} king in check", piece.color);
            }
            safe
        })
        .collect();

    if piece.piece_type == PieceType::King && !piece.has_moved {
        for side in CastleSide::ALL {
            if can_castle(board, from, side) {
                log::trace!("{} may castle {:?}", piece.color, side);
                moves.push(Square::new(from.row, side.king_destination_col()));
            }
        }
    }
    moves
}

/// Whether any piece of `color` has at least one legal move.
pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_moves(board, from).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::pseudo_legal_moves_from;
    use pretty_assertions::assert_eq;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    fn sorted(moves: Vec<Square>) -> Vec<String> {
        let mut moves: Vec<String> = moves.iter().map(|s| s.to_algebraic()).collect();
        moves.sort();
        moves
    }

    #[test]
    fn test_in_check() {
        assert!(!in_check(&Board::new(), Color::White));
        assert!(!in_check(&Board::new(), Color::Black));

        let b = board("4k3/8/8/8/8/8/8/4K2r");
        assert!(in_check(&b, Color::White));
        assert!(!in_check(&b, Color::Black));

        // blocked by a piece of either color
        assert!(!in_check(&board("4k3/8/8/8/8/8/8/4KN1r"), Color::White));
        assert!(!in_check(&board("4k3/8/8/8/8/8/8/4Kn1r"), Color::White));
    }

    #[test]
    fn pawn_and_knight_checks() {
        assert!(in_check(&board("4k3/8/8/8/8/8/3p4/4K3"), Color::White));
        // a pawn directly in front does not give check
        assert!(!in_check(&board("4k3/8/8/8/8/8/4p3/4K3"), Color::White));
        assert!(in_check(&board("4k3/8/8/8/8/5n2/8/4K3"), Color::White));
        assert!(in_check(&board("4k3/3P4/8/8/8/8/8/4K3"), Color::Black));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        assert!(!in_check(&board("8/8/8/8/8/8/8/4K2r"), Color::Black));
    }

    #[test]
    fn pinned_rook_stays_on_the_pin_line() {
        // white rook on e2 is pinned to the king on e1 by the rook on e8
        let b = board("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let pseudo = sorted(pseudo_legal_moves_from(&b, sq("e2")));
        let legal = sorted(legal_moves(&b, sq("e2")));

        assert!(pseudo.contains(&"a2".to_string()));
        assert_eq!(legal, vec!["e3", "e4", "e5", "e6", "e7", "e8"]);
    }

    #[test]
    fn pinned_knight_cannot_move() {
        let b = board("4k3/8/8/8/b7/8/2N5/4K3 w - - 0 1");
        assert!(!pseudo_legal_moves_from(&b, sq("c2")).is_empty());
        // a4 bishop, c2 knight, e1 king are not on one diagonal, so no pin
        assert!(!legal_moves(&b, sq("c2")).is_empty());

        let b = board("4k3/8/8/8/1b6/8/3N4/4K3 w - - 0 1");
        assert!(legal_moves(&b, sq("d2")).is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let b = board("4k3/8/8/8/8/8/r7/4K3 w - - 0 1");
        assert_eq!(sorted(legal_moves(&b, sq("e1"))), vec!["d1", "f1"]);
    }

    #[test]
    fn king_cannot_capture_defended_piece() {
        let b = board("4k3/8/8/8/8/8/3q4/3rK3 w - - 0 1");
        assert!(legal_moves(&b, sq("e1")).is_empty());
    }

    #[test]
    fn must_answer_check() {
        // rook check on the e-file: block with the bishop, or step aside
        let b = board("4r1k1/8/8/8/8/8/8/3BK3 w - - 0 1");
        assert_eq!(sorted(legal_moves(&b, sq("d1"))), vec!["e2"]);
        assert_eq!(sorted(legal_moves(&b, sq("e1"))), vec!["d2", "f1", "f2"]);
    }

    #[test]
    fn castling_both_sides() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves = sorted(legal_moves(&b, sq("e1")));
        assert!(moves.contains(&"g1".to_string()));
        assert!(moves.contains(&"c1".to_string()));

        let moves = sorted(legal_moves(&b, sq("e8")));
        assert!(moves.contains(&"g8".to_string()));
        assert!(moves.contains(&"c8".to_string()));
    }

    #[test]
    fn no_castling_with_piece_in_between() {
        let b = board("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        assert!(!can_castle(&b, sq("e1"), CastleSide::Kingside));
        assert!(!can_castle(&b, sq("e1"), CastleSide::Queenside));
    }

    #[test]
    fn queenside_b_file_must_be_empty_but_may_be_attacked() {
        let blocked = board("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(!can_castle(&blocked, sq("e1"), CastleSide::Queenside));

        let attacked_b1 = board("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(can_castle(&attacked_b1, sq("e1"), CastleSide::Queenside));
    }

    #[test]
    fn no_castling_out_of_through_or_into_check() {
        // in check
        let b = board("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!can_castle(&b, sq("e1"), CastleSide::Kingside));
        assert!(!can_castle(&b, sq("e1"), CastleSide::Queenside));

        // through f1
        let b = board("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!can_castle(&b, sq("e1"), CastleSide::Kingside));
        assert!(can_castle(&b, sq("e1"), CastleSide::Queenside));

        // onto c1
        let b = board("2r3k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!can_castle(&b, sq("e1"), CastleSide::Queenside));
        assert!(can_castle(&b, sq("e1"), CastleSide::Kingside));
    }

    #[test]
    fn no_castling_after_rook_or_king_moved() {
        let mut b = board("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        b.piece_at_mut(sq("h1")).unwrap().has_moved = true;
        assert!(!can_castle(&b, sq("e1"), CastleSide::Kingside));
        assert!(can_castle(&b, sq("e1"), CastleSide::Queenside));

        b.piece_at_mut(sq("e1")).unwrap().has_moved = true;
        assert!(!can_castle(&b, sq("e1"), CastleSide::Queenside));
        assert!(!sorted(legal_moves(&b, sq("e1"))).contains(&"c1".to_string()));
    }

    #[test]
    fn no_castling_with_enemy_rook_in_corner() {
        let b = board("4k3/8/8/8/8/8/8/4K2r w K - 0 1");
        assert!(!can_castle(&b, sq("e1"), CastleSide::Kingside));
    }

    #[test]
    fn test_has_any_legal_move() {
        assert!(has_any_legal_move(&Board::new(), Color::White));
        assert!(has_any_legal_move(&Board::new(), Color::Black));
        // cornered king with no escape
        let b = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!has_any_legal_move(&b, Color::Black));
    }
}
