//! Encoded game strings
//!
//! Front-ends keep a game between requests as four space-separated fields:
//!
//! ```text
//! <opponent> <turn> <board> <selected>
//! ```
//!
//! `turn` is `1` or `2`, `board` the 32-symbol board and `selected` one of
//! `-` (nothing selected), a square index 0-31, or `*` followed by the index
//! of a piece that must finish a double jump.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, CELLS};
use crate::error::ParseGameError;
use crate::game::{Game, Phase};

/// Marker for "nothing selected"
const NO_SELECTION: &str = "-";

/// Prefix of a selection that is partway through a double jump
const CHAIN_MARKER: char = '*';

/// A game together with the identifier of the opponent waiting on it
///
/// Treat each encoded string as an immutable snapshot: decode, act, encode
/// the result. Two changes decoded from the same string must not both be
/// written back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub opponent: String,
    pub game: Game,
}

impl Snapshot {
    /// Fresh game against `opponent`
    pub fn new(opponent: impl Into<String>) -> Self {
        Self {
            opponent: opponent.into(),
            game: Game::new(),
        }
    }
}

impl FromStr for Snapshot {
    type Err = ParseGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(' ').collect();
        let [opponent, turn, board, selected] = fields.as_slice() else {
            return Err(ParseGameError::FieldCount(fields.len()));
        };

        let turn = turn.parse::<u8>().map_err(ParseGameError::Turn)?;
        let turn = Player::try_from(turn)?;
        let board: Board = board.parse()?;
        let phase = parse_phase(selected, &board, turn)?;

        Ok(Self {
            opponent: opponent.to_string(),
            game: Game::from_parts(board, turn, phase),
        })
    }
}

fn parse_phase(field: &str, board: &Board, turn: Player) -> Result<Phase, ParseGameError> {
    if field == NO_SELECTION {
        return Ok(Phase::Idle);
    }

    let Some(field) = field.strip_prefix(CHAIN_MARKER) else {
        return parse_index(field).map(Phase::Selected);
    };

    // A pending double jump must still have a capture to make
    let index = parse_index(field)?;
    board
        .square_at_index(index)
        .ok()
        .and_then(|square| board.available_moves(&square, turn, true).ok())
        .ok_or(ParseGameError::InvalidChain(index))?;
    Ok(Phase::Chaining(index))
}

fn parse_index(field: &str) -> Result<u8, ParseGameError> {
    let index = field.parse::<u8>().map_err(ParseGameError::Selection)?;
    if index as usize >= CELLS {
        return Err(ParseGameError::SelectionOutOfRange(index));
    }
    Ok(index)
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} ", self.opponent, self.game.turn(), self.game.board())?;
        match self.game.phase() {
            Phase::Idle => f.write_str(NO_SELECTION),
            Phase::Selected(index) => write!(f, "{}", index),
            Phase::Chaining(index) => write!(f, "{}{}", CHAIN_MARKER, index),
        }
    }
}
