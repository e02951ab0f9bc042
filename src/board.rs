use std::fmt;

use itertools::iproduct;

use crate::error::ParseError;
use crate::types::*;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Column of both kings in the initial layout.
pub const KING_HOME_COL: u8 = 4;

/// 8x8 grid of optional pieces, indexed `[row][col]`.
///
/// Cloning a board copies every piece by value, so a clone can be mutated
/// freely without affecting the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard initial layout.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, piece_type) in BACK_RANK.iter().enumerate() {
                board.put(
                    Square::new(color.back_rank(), col as u8),
                    Piece::new(color, *piece_type),
                );
                board.put(
                    Square::new(color.pawn_start_rank(), col as u8),
                    Piece::new(color, PieceType::Pawn),
                );
            }
        }
        board
    }

    pub fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Build a board from a FEN string. Only the placement field is required.
    ///
    /// FEN carries no per-piece move history, so `has_moved` is inferred:
    /// pawns off their start rank have moved, kings and rooks count as
    /// unmoved only where the castling field still allows it, and other
    /// pieces are unmoved on their initial square. Without a
    /// castling field every king on its home square and every corner rook is
    /// treated as unmoved.
    pub fn from_fen(fen: &str) -> Result<Board, ParseError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| ParseError::InvalidFen("empty string".to_string()))?;
        let castling = fields.nth(1);

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col: u8 = 0;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as u8;
                    if col > 8 {
                        return Err(ParseError::InvalidFen(format!("rank `{rank}` is too long")));
                    }
                } else if let Some(piece) = Piece::from_char(c) {
                    if col >= 8 {
                        return Err(ParseError::InvalidFen(format!("rank `{rank}` is too long")));
                    }
                    board.put(Square::new(row as u8, col), piece);
                    col += 1;
                } else {
                    return Err(ParseError::InvalidFen(format!(
                        "unexpected char `{c}` in placement"
                    )));
                }
            }
            if col != 8 {
                return Err(ParseError::InvalidFen(format!(
                    "rank `{rank}` does not cover 8 files"
                )));
            }
        }

        board.infer_move_history(castling);
        Ok(board)
    }

    fn infer_move_history(&mut self, castling: Option<&str>) {
        let may_castle = |color: Color, side: char| match castling {
            None => true,
            Some(rights) => {
                let flag = match color {
                    Color::White => side.to_ascii_uppercase(),
                    Color::Black => side,
                };
                rights.contains(flag)
            }
        };

        for (row, col) in iproduct!(0..8u8, 0..8u8) {
            let Some(piece) = self.squares[row as usize][col as usize].as_mut() else {
                continue;
            };
            let home = row == piece.color.back_rank();
            piece.has_moved = match piece.piece_type {
                PieceType::Pawn => row != piece.color.pawn_start_rank(),
                PieceType::King => {
                    !(home
                        && col == KING_HOME_COL
                        && (may_castle(piece.color, 'k') || may_castle(piece.color, 'q')))
                }
                PieceType::Rook => {
                    !(home
                        && ((col == 7 && may_castle(piece.color, 'k'))
                            || (col == 0 && may_castle(piece.color, 'q'))))
                }
                _ => !(home && BACK_RANK[col as usize] == piece.piece_type),
            };
        }
    }

    /// FEN placement field for this board.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for row in 0..8 {
            let mut empty = 0;
            for col in 0..8 {
                match self.squares[row][col] {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }
        fen
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.row as usize][square.col as usize].as_ref()
    }

    pub fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.squares[square.row as usize][square.col as usize].as_mut()
    }

    pub fn piece_at_algebraic(&self, pos: &str) -> Result<Option<&Piece>, ParseError> {
        Ok(self.piece_at(Square::from_algebraic(pos)?))
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Place `piece` on `square`, returning whatever stood there.
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize].replace(piece)
    }

    /// Clear `square`, returning its occupant.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize].take()
    }

    /// Move the piece on `from` to `to` as-is, returning the captured occupant.
    ///
    /// No flags are touched, this is the raw relocation used both by the
    /// legality simulation and by the move applier.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        match self.take(from) {
            Some(piece) => self.put(to, piece),
            None => None,
        }
    }

    /// All occupied squares with their pieces, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        iproduct!(0..8u8, 0..8u8).filter_map(move |(row, col)| {
            let square = Square::new(row, col);
            self.piece_at(square).map(|piece| (square, piece))
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Square of the king of `color`. Boards reached through play always
    /// have exactly one.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.piece_type == PieceType::King)
            .map(|(square, _)| square)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self
                    .piece_at(Square::new(row, col))
                    .map_or('.', |piece| piece.to_char());
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
