use std::fmt;

use crate::board::Board;
use crate::error::{IllegalMoveError, ParseError};
use crate::rules::{self, CastleSide};
use crate::types::*;

/// A board together with the side to move. Every engine query is a pure
/// function of this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side_to_move: Color,
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl Position {
    /// Standard layout, white to move.
    pub fn initial() -> Position {
        Position {
            board: Board::new(),
            side_to_move: Color::White,
        }
    }

    pub fn new(board: Board, side_to_move: Color) -> Position {
        Position {
            board,
            side_to_move,
        }
    }

    /// Parse placement, side to move and castling fields of a FEN string.
    /// A missing side-to-move field means white.
    pub fn from_fen(fen: &str) -> Result<Position, ParseError> {
        let board = Board::from_fen(fen)?;
        let side_to_move = match fen.split_whitespace().nth(1) {
            None => Color::White,
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Color::from_char(c)?,
                    _ => return Err(ParseError::InvalidColor(field.to_string())),
                }
            }
        };
        Ok(Position::new(board, side_to_move))
    }

    /// Placement and side to move, e.g. `8/8/8/8/8/8/8/K6k w`.
    pub fn to_fen(&self) -> String {
        format!("{} {}", self.board.to_fen(), self.side_to_move.to_char())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Legal destinations of the piece on `from`. Empty if the square is
    /// empty or holds a piece of the side not to move.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        match self.board.piece_at(from) {
            Some(piece) if piece.color == self.side_to_move => {
                rules::legal_moves(&self.board, from)
            }
            _ => vec![],
        }
    }

    /// Every legal move of the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces_of(self.side_to_move)
            .flat_map(|(from, _)| {
                rules::legal_moves(&self.board, from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.legal_moves(from).contains(&to)
    }

    /// Validate and play `from` to `to`, returning the resulting position and
    /// the type of the captured piece, if any. `self` is never modified.
    pub fn apply_move(
        &self,
        from: Square,
        to: Square,
    ) -> Result<(Position, Option<PieceType>), IllegalMoveError> {
        if !self.is_legal(from, to) {
            log::debug!("rejecting {from}{to} for {}", self.side_to_move);
            return Err(IllegalMoveError { from, to });
        }
        let mut next = self.clone();
        let captured = next.commit(from, to);
        log::debug!(
            "{} plays {from}{to}{}",
            self.side_to_move,
            captured.map_or(String::new(), |pt| format!(", capturing a {}", pt.to_human()))
        );
        Ok((next, captured))
    }

    /// Play a move that is already known to be legal, without re-validating.
    pub(crate) fn apply_unchecked(&self, mv: Move) -> Position {
        let mut next = self.clone();
        next.commit(mv.from, mv.to);
        next
    }

    /// The move applier. Relocates the piece, marks it moved, moves the rook
    /// when a king travels exactly two columns (the only king move of that
    /// length that is ever generated is castling), promotes a pawn landing on
    /// the far rank to a queen, and hands the turn over.
    ///
    /// Returns the captured piece type.
    fn commit(&mut self, from: Square, to: Square) -> Option<PieceType> {
        let captured = self.board.relocate(from, to).map(|piece| piece.piece_type);

        let Some(piece) = self.board.piece_at_mut(to) else {
            return captured;
        };
        piece.has_moved = true;
        let moved_type = piece.piece_type;
        if moved_type == PieceType::Pawn && to.row == piece.color.promotion_rank() {
            piece.piece_type = PieceType::Queen;
        }

        if moved_type == PieceType::King && from.col.abs_diff(to.col) == 2 {
            if let Some(side) = CastleSide::from_king_destination(to.col) {
                let rook_from = Square::new(to.row, side.rook_col());
                let rook_to = Square::new(to.row, side.rook_destination_col());
                self.board.relocate(rook_from, rook_to);
                if let Some(rook) = self.board.piece_at_mut(rook_to) {
                    rook.has_moved = true;
                }
            }
        }

        self.side_to_move = self.side_to_move.other_color();
        captured
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        rules::in_check(&self.board, self.side_to_move)
    }

    /// Classify the position for the side to move.
    pub fn evaluate(&self) -> Verdict {
        let in_check = self.in_check();
        let can_move = rules::has_any_legal_move(&self.board, self.side_to_move);
        match (in_check, can_move) {
            (true, false) => Verdict::Checkmate(self.side_to_move.other_color()),
            (true, true) => Verdict::Check,
            (false, false) => Verdict::Stalemate,
            (false, true) => Verdict::Ongoing,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.side_to_move)
    }
}
