//! Checkers Core - Rule engine for 8x4 checkers
//!
//! This crate provides the game logic only:
//! - Board geometry (32 dark squares with staggered diagonal adjacency)
//! - Move classification: steps, captures and double jumps
//! - Game state: turn sequencing, perspective flips, promotion and score
//! - The encoded game string front-ends store between requests
//!
//! Everything is synchronous and side-effect free; failures come back as
//! typed errors.

pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod snapshot;

// Re-exports for convenient access
pub use board::{Board, Direction, Piece, Player, Square, PIECES_PER_SIDE, STARTING_BOARD};
pub use error::{GameError, ParseBoardError, ParseDirectionError, ParseGameError, SelectError, SquareError};
pub use game::{Game, GameResult, Outcome, Phase};
pub use moves::{Move, MoveKind, Moves};
pub use snapshot::Snapshot;
