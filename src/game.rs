use chrono::prelude::*;

use crate::error::IllegalMoveError;
use crate::position::Position;
use crate::types::*;

/// Outcome of one committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub mv: Move,
    pub mover: Color,
    pub captured: Option<PieceType>,
    /// Verdict for the side now to move.
    pub verdict: Verdict,
}

/// The live game: one position that moves are committed to, the capture
/// tally of each side and the list of moves played.
pub struct Game {
    position: Position,
    moves: Vec<Move>,
    scores: [u32; 2],
    verdict: Verdict,
    game_start_time: DateTime<Local>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game::from_position(Position::initial())
    }

    pub fn from_position(position: Position) -> Self {
        let verdict = position.evaluate();
        Self {
            position,
            moves: Vec::new(),
            scores: [0, 0],
            verdict,
            game_start_time: Local::now(),
        }
    }

    /// Back to the initial layout with white to move, clearing scores and history.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    /// Commit a move to the live position. On error nothing changes.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveReport, IllegalMoveError> {
        let mover = self.position.side_to_move();
        let (next, captured) = self.position.apply_move(from, to)?;

        if let Some(piece_type) = captured {
            self.scores[mover.index()] += piece_type.value();
        }
        self.position = next;
        self.verdict = self.position.evaluate();
        let mv = Move::new(from, to);
        self.moves.push(mv);

        match self.verdict {
            Verdict::Checkmate(winner) => log::info!("checkmate, {winner} wins"),
            Verdict::Stalemate => log::info!("stalemate"),
            Verdict::Check => log::debug!("{} is in check", self.position.side_to_move()),
            Verdict::Ongoing => {}
        }

        Ok(MoveReport {
            mv,
            mover,
            captured,
            verdict: self.verdict,
        })
    }

    pub fn play_move(&mut self, mv: Move) -> Result<MoveReport, IllegalMoveError> {
        self.play(mv.from, mv.to)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Total value of the pieces `color` has captured.
    pub fn score(&self, color: Color) -> u32 {
        self.scores[color.index()]
    }

    pub fn history(&self) -> &[Move] {
        &self.moves
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_over(&self) -> bool {
        self.verdict.is_terminal()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.game_start_time
    }

    /// One line per move in coordinate notation, numbered by full move.
    pub fn to_move_list(&self) -> String {
        let mut out = String::new();
        for (i, m) in self.moves.iter().enumerate() {
            if i % 2 == 0 {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("{}. ", (i + 2) / 2));
            } else {
                out.push(' ');
            }
            out.push_str(&m.to_coordinate());
        }
        out
    }
}
