//! Move classification and per-square move lists

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction, Player, Square, COLUMNS, ROWS};
use crate::error::SelectError;

/// What a single direction allows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    #[default]
    Impossible,
    Step,
    Capture,
}

/// Result of evaluating one direction from one square
///
/// `Move::default()` is the "no move" value; every impossible result the
/// engine hands out compares equal to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    /// Landing square
    pub to: Square,
    /// Square of the captured piece
    pub jumped: Option<Square>,
}

impl Move {
    pub fn step(to: Square) -> Self {
        Self {
            kind: MoveKind::Step,
            to,
            jumped: None,
        }
    }

    pub fn capture(to: Square, jumped: Square) -> Self {
        Self {
            kind: MoveKind::Capture,
            to,
            jumped: Some(jumped),
        }
    }

    pub fn is_possible(&self) -> bool {
        self.kind != MoveKind::Impossible
    }

    pub fn is_capture(&self) -> bool {
        self.kind == MoveKind::Capture
    }
}

/// One move per direction, in `Direction::ALL` slot order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moves([Move; 4]);

impl Moves {
    pub fn get(&self, direction: Direction) -> &Move {
        &self.0[direction.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &Move)> {
        Direction::ALL.into_iter().zip(self.0.iter())
    }

    /// Only the slots holding a real move
    pub fn possible(&self) -> impl Iterator<Item = (Direction, &Move)> {
        self.iter().filter(|(_, mv)| mv.is_possible())
    }

    pub fn has_capture(&self) -> bool {
        self.0.iter().any(Move::is_capture)
    }
}

impl Index<Direction> for Moves {
    type Output = Move;

    fn index(&self, direction: Direction) -> &Move {
        self.get(direction)
    }
}

impl Board {
    /// Classify the move of the piece on `square` toward `direction`
    ///
    /// Plain pieces only move north; kings move both ways. With `jump_only`
    /// set, simple steps are suppressed and only captures come back.
    pub fn move_at_direction(&self, square: &Square, direction: Direction, jump_only: bool) -> Move {
        let owner = match square.player() {
            Some(player) => player,
            None => return Move::default(),
        };

        if !direction.is_north() && !square.is_king() {
            return Move::default();
        }

        let neighbor = match self.square_at_direction(square, direction) {
            Ok(s) => s,
            Err(_) => return Move::default(),
        };

        if neighbor.is_empty() {
            if !jump_only {
                return Move::step(neighbor);
            }
        } else if neighbor.player() != Some(owner) {
            if let Ok(landing) = self.square_at_direction(&neighbor, direction) {
                if landing.is_empty() {
                    return Move::capture(landing, neighbor);
                }
            }
        }

        Move::default()
    }

    /// All four move slots for a piece that `turn` wants to move
    pub fn available_moves(
        &self,
        square: &Square,
        turn: Player,
        jump_only: bool,
    ) -> Result<Moves, SelectError> {
        if square.x >= COLUMNS || square.y >= ROWS {
            return Err(SelectError::InvalidCoordinates);
        }

        if square.is_empty() {
            return Err(SelectError::EmptySquare);
        }

        if square.player() != Some(turn) {
            return Err(SelectError::OpponentPiece);
        }

        let moves = Moves(Direction::ALL.map(|d| self.move_at_direction(square, d, jump_only)));
        if moves.possible().next().is_none() {
            return Err(SelectError::NoMoves);
        }

        Ok(moves)
    }
}
