//! Board geometry for the 8x4 checkers grid
//!
//! Only the 32 dark squares are stored, row-major, 4 per row. Rows alternate
//! which half of each light/dark pair is dark, so the diagonal neighbors of a
//! square sit at different index offsets on even and odd rows.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ParseBoardError, ParseDirectionError, ParseGameError, SquareError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Dark squares per row
pub const COLUMNS: u8 = 4;

/// Rows on the board
pub const ROWS: u8 = 8;

/// Number of stored cells
pub const CELLS: usize = (COLUMNS * ROWS) as usize;

/// Pieces each player starts with
pub const PIECES_PER_SIDE: u8 = 12;

/// Layout of a fresh game: player 1 on top, player 2 on the bottom
pub const STARTING_BOARD: &str = "11111111111100000000222222222222";

/// Index offsets per (row parity, direction), in `Direction::ALL` order
const OFFSETS: [[i8; 4]; 2] = [
    [-4, -3, 4, 5], // even rows
    [-5, -4, 3, 4], // odd rows
];

// ============================================================================
// PLAYERS AND PIECES
// ============================================================================

/// Piece owner, numbered as in the board symbols
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.number()
    }
}

impl TryFrom<u8> for Player {
    type Error = ParseGameError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            _ => Err(ParseGameError::InvalidTurn(n)),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Contents of one dark square
///
/// Symbols: `0` empty, `1`/`2` plain pieces, `3`/`4` kings. A king's symbol
/// is always its owner's plain symbol plus 2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Piece {
    #[default]
    Empty,
    Man(Player),
    King(Player),
}

impl Piece {
    pub const fn symbol(self) -> u8 {
        match self {
            Piece::Empty => 0,
            Piece::Man(player) => player as u8,
            Piece::King(player) => player as u8 + 2,
        }
    }

    pub fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            0 => Some(Piece::Empty),
            1 => Some(Piece::Man(Player::One)),
            2 => Some(Piece::Man(Player::Two)),
            3 => Some(Piece::King(Player::One)),
            4 => Some(Piece::King(Player::Two)),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Piece::Empty => None,
            Piece::Man(player) | Piece::King(player) => Some(player),
        }
    }

    pub fn is_king(self) -> bool {
        matches!(self, Piece::King(_))
    }

    /// The piece after promotion. Kings and empty cells are unchanged.
    pub fn crowned(self) -> Self {
        match self {
            Piece::Man(player) => Piece::King(player),
            other => other,
        }
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> char {
        char::from(b'0' + piece.symbol())
    }
}

impl TryFrom<char> for Piece {
    type Error = ParseBoardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .and_then(|d| Piece::from_symbol(d as u8))
            .ok_or(ParseBoardError::InvalidSymbol(c))
    }
}

// ============================================================================
// DIRECTIONS
// ============================================================================

/// Diagonal direction, north being toward row 0
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Direction {
    /// Slot order of every move list. Front-ends map slots to glyphs and
    /// follow-up choices, so this order never changes.
    pub const ALL: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn is_north(self) -> bool {
        matches!(self, Direction::NorthWest | Direction::NorthEast)
    }

    pub fn is_west(self) -> bool {
        matches!(self, Direction::NorthWest | Direction::SouthWest)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Direction::NorthWest => "nw",
            Direction::NorthEast => "ne",
            Direction::SouthWest => "sw",
            Direction::SouthEast => "se",
        }
    }

    fn offset(self, row: u8) -> i8 {
        OFFSETS[(row % 2) as usize][self.slot()]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nw" | "northwest" => Ok(Direction::NorthWest),
            "ne" | "northeast" => Ok(Direction::NorthEast),
            "sw" | "southwest" => Ok(Direction::SouthWest),
            "se" | "southeast" => Ok(Direction::SouthEast),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

// ============================================================================
// SQUARES
// ============================================================================

/// A decoded view of one cell: position plus contents
///
/// Squares are never stored. They are rebuilt from the board on every
/// lookup, so a square goes stale once the board changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: u8,
    pub y: u8,
    pub index: u8,
    pub piece: Piece,
}

impl Square {
    pub fn is_empty(&self) -> bool {
        self.piece.is_empty()
    }

    pub fn player(&self) -> Option<Player> {
        self.piece.player()
    }

    pub fn is_king(&self) -> bool {
        self.piece.is_king()
    }

    /// Row letter and 1-indexed column, e.g. `F1`
    pub fn label(&self) -> String {
        format!("{}{}", char::from(b'A' + self.y), self.x + 1)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// The 32 dark squares, seen from the side of the player to move
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Piece; CELLS],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [Piece::Empty; CELLS],
        }
    }

    pub fn starting() -> Self {
        let mut board = Self::empty();
        let top = PIECES_PER_SIDE as usize;
        board.cells[..top].fill(Piece::Man(Player::One));
        board.cells[CELLS - top..].fill(Piece::Man(Player::Two));
        board
    }

    pub fn get(&self, index: u8) -> Option<Piece> {
        self.cells.get(index as usize).copied()
    }

    /// Overwrite one cell
    pub fn set(&mut self, index: u8, piece: Piece) -> Result<(), SquareError> {
        let cell = self
            .cells
            .get_mut(index as usize)
            .ok_or(SquareError::OutOfBounds)?;
        *cell = piece;
        Ok(())
    }

    /// Look up a square from 1-indexed column `x` (1-4) and row `y` (1-8)
    pub fn square_at_coords(&self, x: u8, y: u8) -> Result<Square, SquareError> {
        if !(1..=COLUMNS).contains(&x) || !(1..=ROWS).contains(&y) {
            return Err(SquareError::OutOfBounds);
        }
        self.square_at_index((y - 1) * COLUMNS + (x - 1))
    }

    pub fn square_at_index(&self, index: u8) -> Result<Square, SquareError> {
        let piece = self.get(index).ok_or(SquareError::OutOfBounds)?;
        Ok(Square {
            x: index % COLUMNS,
            y: index / COLUMNS,
            index,
            piece,
        })
    }

    /// Diagonal neighbor of `square`
    ///
    /// Even rows have no eastern neighbor from the last column and odd rows
    /// have no western neighbor from the first column; the raw offset would
    /// otherwise wrap onto the wrong row.
    pub fn square_at_direction(
        &self,
        square: &Square,
        direction: Direction,
    ) -> Result<Square, SquareError> {
        let north = direction.is_north();
        if (square.y == 0 && north) || (square.y >= ROWS - 1 && !north) {
            return Err(SquareError::OutOfBounds);
        }

        let wraps = if square.y % 2 == 0 {
            square.x == COLUMNS - 1 && !direction.is_west()
        } else {
            square.x == 0 && direction.is_west()
        };
        if wraps {
            return Err(SquareError::OutOfBounds);
        }

        let index = square.index as i16 + direction.offset(square.y) as i16;
        let index = u8::try_from(index).map_err(|_| SquareError::OutOfBounds)?;
        self.square_at_index(index)
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..CELLS as u8).filter_map(move |index| self.square_at_index(index).ok())
    }

    /// Surviving pieces (plain and king) of a player
    pub fn count(&self, player: Player) -> u8 {
        self.cells
            .iter()
            .filter(|piece| piece.player() == Some(player))
            .count() as u8
    }

    /// Rows (0-based) holding at least one piece of `player`
    pub fn rows_with_pieces(&self, player: Player) -> impl Iterator<Item = u8> + '_ {
        (0..ROWS).filter(move |&row| {
            let start = (row * COLUMNS) as usize;
            self.cells[start..start + COLUMNS as usize]
                .iter()
                .any(|piece| piece.player() == Some(player))
        })
    }

    /// Reverse the board end to end, handing the view to the other player
    pub fn flip(&mut self) {
        self.cells.reverse();
    }

    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &piece in &self.cells {
            write!(f, "{}", char::from(piece))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != CELLS {
            return Err(ParseBoardError::WrongLength(len));
        }

        let mut board = Self::empty();
        for (cell, c) in board.cells.iter_mut().zip(s.chars()) {
            *cell = Piece::try_from(c)?;
        }
        Ok(board)
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
