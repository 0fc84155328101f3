//! One-shot commands over encoded games
//!
//! Each command decodes a game string, does one thing and prints the
//! result; `apply` prints the new encoded game for the caller to store.
//!
//! ## Architecture
//!
//! - Level 1: run_*() - orchestration
//! - Level 2: apply_move() - the read-modify-write step
//! - Level 3: printing helpers

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use checkers_core::{Direction, GameResult, Moves, Outcome, Snapshot};

use crate::render::{describe_game, describe_moves, describe_outcome, render_board};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct NewArgs {
    /// Identifier of the opponent stored in the encoded game
    #[arg(long)]
    pub opponent: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Encoded game: "<opponent> <turn> <board> <selected>"
    pub game: Snapshot,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Encoded game: "<opponent> <turn> <board> <selected>"
    pub game: Snapshot,

    /// Column, 1-4
    #[arg(long)]
    pub x: u8,

    /// Row, 1-8
    #[arg(long)]
    pub y: u8,

    /// Only list captures (double jump continuation)
    #[arg(long)]
    pub jumps_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Encoded game: "<opponent> <turn> <board> <selected>"
    pub game: Snapshot,

    /// Column of the piece to move, 1-4
    #[arg(long)]
    pub x: u8,

    /// Row of the piece to move, 1-8
    #[arg(long)]
    pub y: u8,

    /// nw, ne, sw or se
    #[arg(long)]
    pub direction: Direction,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run_new(args: NewArgs) -> Result<()> {
    let snapshot = Snapshot::new(args.opponent);
    tracing::info!("New game against {}", snapshot.opponent);
    println!("{}", snapshot);
    Ok(())
}

pub fn run_show(args: ShowArgs) -> Result<()> {
    let game = &args.game.game;
    tracing::debug!("Showing game against {}", args.game.opponent);

    if args.json {
        #[derive(Serialize)]
        struct JsonShow<'a> {
            opponent: &'a str,
            turn: u8,
            board: String,
            selected: Option<u8>,
            chaining: bool,
            score: (u8, u8),
            result: GameResult,
        }

        print_json(&JsonShow {
            opponent: &args.game.opponent,
            turn: game.turn().number(),
            board: game.board().to_string(),
            selected: game.selected(),
            chaining: game.is_chaining(),
            score: game.score(),
            result: game.result(),
        })
    } else {
        println!("{}", describe_game(game));
        Ok(())
    }
}

pub fn run_moves(args: MovesArgs) -> Result<()> {
    let game = &args.game.game;
    let square = game
        .square_at_coords(args.x, args.y)
        .with_context(|| format!("No square at x={}, y={}", args.x, args.y))?;
    let moves = game
        .available_moves(&square, args.jumps_only)
        .with_context(|| format!("Cannot move {}", square.label()))?;
    tracing::debug!("{} has {} moves", square.label(), moves.possible().count());

    if args.json {
        print_json(&moves)
    } else {
        println!("{}", render_board(game.board(), Some(&moves)));
        println!("{}", describe_moves(&moves));
        Ok(())
    }
}

pub fn run_apply(args: ApplyArgs) -> Result<()> {
    let mut snapshot = args.game;
    let outcome = apply_move(&mut snapshot, args.x, args.y, args.direction)?;

    if args.json {
        #[derive(Serialize)]
        struct JsonApply<'a> {
            game: String,
            outcome: &'a Outcome,
            score: (u8, u8),
        }

        print_json(&JsonApply {
            game: snapshot.to_string(),
            outcome: &outcome,
            score: snapshot.game.score(),
        })
    } else {
        println!("{}", snapshot);
        println!("{}", describe_outcome(&outcome));
        if let Outcome::Chain(captures) = &outcome {
            print_chain(captures);
        }
        Ok(())
    }
}

// ============================================================================
// LEVEL 2 - READ-MODIFY-WRITE
// ============================================================================

/// Select the piece at (`x`, `y`) and play it toward `direction`
///
/// A game already chaining a double jump continues from its landing square;
/// the coordinates must then name that square.
pub fn apply_move(snapshot: &mut Snapshot, x: u8, y: u8, direction: Direction) -> Result<Outcome> {
    let game = &mut snapshot.game;
    let square = game
        .square_at_coords(x, y)
        .with_context(|| format!("No square at x={}, y={}", x, y))?;

    if game.is_chaining() {
        anyhow::ensure!(
            game.selected() == Some(square.index),
            "A double jump from another square must be finished first"
        );
    } else {
        game.select(x, y)
            .with_context(|| format!("Cannot select {}", square.label()))?;
    }
    tracing::debug!("Selected {}", square.label());

    let player = game.turn();
    let outcome = game
        .play(direction)
        .with_context(|| format!("Cannot move {} {}", square.label(), direction))?;

    tracing::info!(
        "Player {} moved {} {}: {}",
        player,
        square.label(),
        direction,
        outcome_name(&outcome)
    );
    Ok(outcome)
}

// ============================================================================
// LEVEL 3 - PRINTING
// ============================================================================

fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::TurnPassed => "turn passed",
        Outcome::Chain(_) => "double jump pending",
        Outcome::Won(_) => "game won",
    }
}

fn print_chain(captures: &Moves) {
    println!("{}", describe_moves(captures));
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
    println!("{}", json);
    Ok(())
}
