use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn from_char(c: char) -> Result<Color, ParseError> {
        match c {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            other => Err(ParseError::InvalidColor(other.to_string())),
        }
    }

    /// Uppercase letters are white pieces, lowercase are black.
    pub fn from_case(c: char) -> Color {
        if c.is_uppercase() {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn other_color(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Row holding this color's pieces in the initial layout.
    pub fn back_rank(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// Row holding this color's pawns in the initial layout.
    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Row delta of a single pawn step. White moves toward row 0.
    pub fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row a pawn of this color promotes on.
    pub fn promotion_rank(&self) -> u8 {
        self.other_color().back_rank()
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_human())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Points scored for capturing a piece of this type.
    pub fn value(&self) -> u32 {
        match self {
            Self::Pawn => 1,
            Self::Knight => 3,
            Self::Bishop => 3,
            Self::Rook => 5,
            Self::Queen => 9,
            Self::King => 0,
        }
    }
}

/// A piece is a plain value. Moving it copies the value to the destination
/// and clears the origin; two cells never share a piece.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
    /// Set on the first relocation, gates pawn double steps and castling.
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, piece_type: PieceType) -> Self {
        Self {
            color,
            piece_type,
            has_moved: false,
        }
    }

    /// Parse a FEN piece letter, `K` is a white king and `k` a black one.
    pub fn from_char(c: char) -> Option<Piece> {
        PieceType::from_char(c).map(|piece_type| Piece::new(Color::from_case(c), piece_type))
    }

    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

/// A cell on the board. Row 0 is Black's back rank, row 7 is White's;
/// column 0 is the a-file.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "square ({row}, {col}) is off the board");
        Self { row, col }
    }

    /// The square `(d_row, d_col)` away, or `None` if that leaves the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn from_algebraic(s: &str) -> Result<Square, ParseError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseError::InvalidSquare(s.to_string()));
        }
        let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ParseError::InvalidSquare(s.to_string()));
        }
        Ok(Square {
            row: b'8' - rank,
            col: file - b'a',
        })
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", (b'a' + self.col) as char, (b'8' - self.row) as char)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

/// A request to relocate whatever stands on `from` to `to`.
///
/// Castling and promotion are not flagged here, the move applier derives
/// them from the moving piece and its displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parse coordinate notation like `e2e4`. A trailing `q` is accepted on
    /// promotions, any other promotion letter is rejected.
    pub fn from_coordinate(s: &str) -> Result<Move, ParseError> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(ParseError::InvalidMove(s.to_string()));
        }
        let from = Square::from_algebraic(&s[0..2])
            .map_err(|_| ParseError::InvalidMove(s.to_string()))?;
        let to = Square::from_algebraic(&s[2..4])
            .map_err(|_| ParseError::InvalidMove(s.to_string()))?;
        if let Some(promotion) = s[4..].chars().next() {
            match PieceType::from_char(promotion) {
                Some(PieceType::Queen) => {}
                Some(_) => return Err(ParseError::UnsupportedPromotion(promotion)),
                None => return Err(ParseError::InvalidMove(s.to_string())),
            }
        }
        Ok(Move { from, to })
    }

    pub fn to_coordinate(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_coordinate())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_coordinate(s)
    }
}

/// Classification of a position, relative to the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ongoing,
    Check,
    /// Contains the winning color, the side that is not to move.
    Checkmate(Color),
    Stalemate,
}

impl Verdict {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Verdict::Checkmate(_) | Verdict::Stalemate)
    }

    pub fn to_human(&self) -> String {
        match self {
            Verdict::Ongoing => "ongoing".to_string(),
            Verdict::Check => "check".to_string(),
            Verdict::Checkmate(winner) => format!("checkmate, {} wins", winner.to_human()),
            Verdict::Stalemate => "stalemate".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_char() {
        assert_eq!(Color::from_char('w'), Ok(Color::White));
        assert_eq!(Color::from_char('b'), Ok(Color::Black));
        assert!(Color::from_char('g').is_err());
    }

    #[test]
    fn test_color_from_case() {
        assert_eq!(Color::from_case('K'), Color::White);
        assert_eq!(Color::from_case('k'), Color::Black);
    }

    #[test]
    fn test_other_color() {
        assert_eq!(Color::White, Color::Black.other_color());
        assert_eq!(Color::Black, Color::White.other_color());
    }

    #[test]
    fn test_pawn_direction_and_ranks() {
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
        assert_eq!(Color::White.promotion_rank(), 0);
        assert_eq!(Color::Black.promotion_rank(), 7);
        assert_eq!(Color::White.pawn_start_rank(), 6);
        assert_eq!(Color::Black.pawn_start_rank(), 1);
    }

    #[test]
    fn test_piece_type_from_char() {
        assert_eq!(PieceType::from_char('p'), Some(PieceType::Pawn));
        assert_eq!(PieceType::from_char('R'), Some(PieceType::Rook));
        assert_eq!(PieceType::from_char('n'), Some(PieceType::Knight));
        assert_eq!(PieceType::from_char('B'), Some(PieceType::Bishop));
        assert_eq!(PieceType::from_char('Q'), Some(PieceType::Queen));
        assert_eq!(PieceType::from_char('k'), Some(PieceType::King));
        assert_eq!(PieceType::from_char('x'), None);
    }

    #[test]
    fn test_is_sliding() {
        assert!(!PieceType::Pawn.is_sliding());
        assert!(PieceType::Rook.is_sliding());
        assert!(PieceType::Bishop.is_sliding());
        assert!(!PieceType::Knight.is_sliding());
        assert!(PieceType::Queen.is_sliding());
        assert!(!PieceType::King.is_sliding());
    }

    #[test]
    fn test_capture_values() {
        let values: Vec<u32> = [
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ]
        .iter()
        .map(|pt| pt.value())
        .collect();
        assert_eq!(values, vec![1, 3, 3, 5, 9, 0]);
    }

    #[test]
    fn test_piece_chars() {
        let black_knight = Piece::from_char('n').unwrap();
        assert_eq!(black_knight.color, Color::Black);
        assert_eq!(black_knight.piece_type, PieceType::Knight);
        assert!(!black_knight.has_moved);
        assert_eq!(black_knight.to_char(), 'n');
        assert_eq!(Piece::new(Color::White, PieceType::Queen).to_char(), 'Q');
        assert_eq!(Piece::from_char('1'), None);
    }

    #[test]
    fn test_square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a8"), Ok(Square::new(0, 0)));
        assert_eq!(Square::from_algebraic("a1"), Ok(Square::new(7, 0)));
        assert_eq!(Square::from_algebraic("h1"), Ok(Square::new(7, 7)));
        assert_eq!(Square::from_algebraic("e2"), Ok(Square::new(6, 4)));
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("a9").is_err());
        assert!(Square::from_algebraic("a").is_err());
        assert_eq!(Square::new(4, 3).to_algebraic(), "d4");
    }

    #[test]
    fn test_square_offset() {
        let a1 = Square::new(7, 0);
        assert_eq!(a1.offset(-1, 0), Some(Square::new(6, 0)));
        assert_eq!(a1.offset(1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(-2, 1), Some(Square::new(5, 1)));
    }

    #[test]
    fn test_move_from_coordinate() {
        let mv: Move = "e2e4".parse().unwrap();
        assert_eq!(mv, Move::new(Square::new(6, 4), Square::new(4, 4)));
        assert_eq!(mv.to_string(), "e2e4");
        assert!(Move::from_coordinate("a7a8q").is_ok());
        assert_eq!(
            Move::from_coordinate("a7a8n"),
            Err(ParseError::UnsupportedPromotion('n'))
        );
        assert!(Move::from_coordinate("e2").is_err());
        assert!(Move::from_coordinate("e2z4").is_err());
    }

    #[test]
    fn test_verdict_is_terminal() {
        assert!(!Verdict::Ongoing.is_terminal());
        assert!(!Verdict::Check.is_terminal());
        assert!(Verdict::Checkmate(Color::White).is_terminal());
        assert!(Verdict::Stalemate.is_terminal());
    }
}
