//! Error types for the rule engine
//!
//! Every failure is a typed value returned to the caller. Nothing here is
//! fatal to the process; the caller decides what to tell the player.

use std::num::ParseIntError;

use crate::board::Direction;

/// Failure to decode a 32-symbol board string
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("board must have 32 cells, found {0}")]
    WrongLength(usize),

    #[error("unrecognized board symbol {0:?}")]
    InvalidSymbol(char),
}

/// A square or neighbor lookup fell outside the 4x8 grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    #[error("out of bounds")]
    OutOfBounds,
}

/// Reasons a square cannot be selected for moving
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("invalid coordinates")]
    InvalidCoordinates,

    #[error("cannot select blank space")]
    EmptySquare,

    #[error("cannot select other player's piece")]
    OpponentPiece,

    #[error("piece has nowhere to move")]
    NoMoves,
}

/// Rejected turn-flow commands
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no piece is selected")]
    NoSelection,

    #[error("a double jump must be finished first")]
    ChainInProgress,

    #[error("the game is already over")]
    GameOver,

    #[error("move {0} is not possible")]
    MoveNotPossible(Direction),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Square(#[from] SquareError),
}

/// Failure to decode an encoded game string
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseGameError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("could not parse turn: {0}")]
    Turn(ParseIntError),

    #[error("invalid turn {0}")]
    InvalidTurn(u8),

    #[error("could not parse selected: {0}")]
    Selection(ParseIntError),

    #[error("selected index {0} is off the board")]
    SelectionOutOfRange(u8),

    #[error("no capture can continue a double jump from square {0}")]
    InvalidChain(u8),

    #[error(transparent)]
    Board(#[from] ParseBoardError),
}

/// Unrecognized direction name
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction {0:?}, expected one of nw, ne, sw, se")]
pub struct ParseDirectionError(pub String);
