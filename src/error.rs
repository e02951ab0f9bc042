use thiserror::Error;

use crate::types::Square;

/// Raised when a move is applied that is not in the current legal-move set.
///
/// Nothing is mutated when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal move from {from} to {to}")]
pub struct IllegalMoveError {
    pub from: Square,
    pub to: Square,
}

/// Errors from the text inputs: squares, coordinate moves and FEN strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid square notation `{0}`")]
    InvalidSquare(String),

    #[error("invalid move notation `{0}`")]
    InvalidMove(String),

    #[error("cannot promote to `{0}`, pawns always promote to a queen")]
    UnsupportedPromotion(char),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("side to move must be `w` or `b`, got `{0}`")]
    InvalidColor(String),
}
