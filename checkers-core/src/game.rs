//! Game state, turn sequencing and move application
//!
//! A turn runs Idle -> Selected -> (move applied) and then either passes to
//! the opponent or, after a capture with another capture available from the
//! landing square, stays with the same player in the Chaining phase.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction, Piece, Player, Square, CELLS, PIECES_PER_SIDE};
use crate::error::{GameError, SelectError, SquareError};
use crate::moves::{Move, Moves};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won(Player),
}

/// Where the player to move is within their turn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    /// A piece is selected and may be deselected again
    Selected(u8),
    /// A capture landed here and another capture is pending; only captures
    /// are offered and the selection cannot be cancelled
    Chaining(u8),
}

/// What happened after a move was applied
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The board was flipped and the opponent is to move
    TurnPassed,
    /// Same player continues with these captures from the landing square
    Chain(Moves),
    /// The last capture took the opponent's final piece
    Won(Player),
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state (clone to keep a snapshot)
///
/// The board is always stored from the perspective of the player to move,
/// whose pieces advance toward row 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Player,
    phase: Phase,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh game: starting layout, player 2 to move
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            turn: Player::Two,
            phase: Phase::Idle,
        }
    }

    pub fn from_parts(board: Board, turn: Player, phase: Phase) -> Self {
        Self { board, turn, phase }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the selected square, if any
    pub fn selected(&self) -> Option<u8> {
        match self.phase {
            Phase::Idle => None,
            Phase::Selected(index) | Phase::Chaining(index) => Some(index),
        }
    }

    pub fn is_chaining(&self) -> bool {
        matches!(self.phase, Phase::Chaining(_))
    }

    pub fn square_at_coords(&self, x: u8, y: u8) -> Result<Square, SquareError> {
        self.board.square_at_coords(x, y)
    }

    pub fn square_at_index(&self, index: u8) -> Result<Square, SquareError> {
        self.board.square_at_index(index)
    }

    pub fn move_at_direction(&self, square: &Square, direction: Direction, jump_only: bool) -> Move {
        self.board.move_at_direction(square, direction, jump_only)
    }

    pub fn available_moves(&self, square: &Square, jump_only: bool) -> Result<Moves, SelectError> {
        self.board.available_moves(square, self.turn, jump_only)
    }

    // ========================================================================
    // SCORE
    // ========================================================================

    /// Captures made by (player 1, player 2)
    ///
    /// Derived from the survivors on the board; nothing is counted as moves
    /// are made.
    pub fn score(&self) -> (u8, u8) {
        (
            PIECES_PER_SIDE.saturating_sub(self.board.count(Player::Two)),
            PIECES_PER_SIDE.saturating_sub(self.board.count(Player::One)),
        )
    }

    pub fn result(&self) -> GameResult {
        match self.score() {
            (one, _) if one >= PIECES_PER_SIDE => GameResult::Won(Player::One),
            (_, two) if two >= PIECES_PER_SIDE => GameResult::Won(Player::Two),
            _ => GameResult::Ongoing,
        }
    }

    // ========================================================================
    // TURN FLOW
    // ========================================================================

    /// Clear the selection, hand the move to the opponent and flip the board
    /// to their side
    pub fn swap_turn(&mut self) {
        self.phase = Phase::Idle;
        self.turn = self.turn.opponent();
        self.board.flip();
    }

    /// Select the piece at 1-indexed (`x`, `y`) and return its moves
    pub fn select(&mut self, x: u8, y: u8) -> Result<Moves, GameError> {
        self.ensure_ongoing()?;
        if self.is_chaining() {
            return Err(GameError::ChainInProgress);
        }

        let square = self
            .board
            .square_at_coords(x, y)
            .map_err(|_| SelectError::InvalidCoordinates)?;
        let moves = self.available_moves(&square, false)?;
        self.phase = Phase::Selected(square.index);
        Ok(moves)
    }

    pub fn deselect(&mut self) -> Result<(), GameError> {
        if self.is_chaining() {
            return Err(GameError::ChainInProgress);
        }
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Moves of the current selection (captures only while chaining)
    pub fn selected_moves(&self) -> Result<Moves, GameError> {
        let index = self.selected().ok_or(GameError::NoSelection)?;
        let square = self.board.square_at_index(index)?;
        Ok(self.available_moves(&square, self.is_chaining())?)
    }

    /// Play the selected piece toward `direction`
    pub fn play(&mut self, direction: Direction) -> Result<Outcome, GameError> {
        self.ensure_ongoing()?;
        let index = self.selected().ok_or(GameError::NoSelection)?;
        let square = self.board.square_at_index(index)?;
        let moves = self.available_moves(&square, self.is_chaining())?;

        let mv = moves[direction];
        if !mv.is_possible() {
            return Err(GameError::MoveNotPossible(direction));
        }

        self.board.move_piece(&square, &mv)?;

        if mv.is_capture() {
            if let GameResult::Won(player) = self.result() {
                self.phase = Phase::Idle;
                return Ok(Outcome::Won(player));
            }

            let landing = self.board.square_at_index(mv.to.index)?;
            if let Ok(captures) = self.available_moves(&landing, true) {
                self.phase = Phase::Chaining(landing.index);
                return Ok(Outcome::Chain(captures));
            }
        }

        self.swap_turn();
        Ok(Outcome::TurnPassed)
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        match self.result() {
            GameResult::Ongoing => Ok(()),
            GameResult::Won(_) => Err(GameError::GameOver),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// APPLY MOVE
// ============================================================================

impl Board {
    /// Move the piece on `square` as described by `mv`
    ///
    /// A piece landing on row 0 is crowned; `Piece::crowned` leaves kings as
    /// they are. A capture also clears the jumped square. Impossible moves
    /// leave the board untouched, and so does a move naming a square off the
    /// board.
    pub fn move_piece(&mut self, square: &Square, mv: &Move) -> Result<(), SquareError> {
        if !mv.is_possible() {
            return Ok(());
        }

        let touched = [Some(square.index), Some(mv.to.index), mv.jumped.map(|s| s.index)];
        if touched.iter().flatten().any(|&index| index as usize >= CELLS) {
            return Err(SquareError::OutOfBounds);
        }

        let piece = if mv.to.y == 0 {
            square.piece.crowned()
        } else {
            square.piece
        };

        self.set(mv.to.index, piece)?;
        self.set(square.index, Piece::Empty)?;
        if let Some(jumped) = mv.jumped {
            self.set(jumped.index, Piece::Empty)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
