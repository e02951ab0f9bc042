pub mod types;
pub mod error;
pub mod board;
pub mod movegen;
pub mod rules;
pub mod position;
pub mod game;
pub mod perft;

pub use board::Board;
pub use error::{IllegalMoveError, ParseError};
pub use game::{Game, MoveReport};
pub use position::Position;
pub use types::{Color, Move, Piece, PieceType, Square, Verdict};
