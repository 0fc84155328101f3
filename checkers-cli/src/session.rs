//! Interactive hot-seat play on a terminal
//!
//! Both players share one terminal. The board is always drawn from the side
//! of the player to move, so "north" is up for whoever is typing.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Args;

use checkers_core::{Direction, Game, Outcome, Snapshot};

use crate::render::{describe_game, describe_moves, describe_outcome, render_board, row_label};

const HELP: &str = "\
Commands:
  <row><column>   select a piece, e.g. f1
  nw|ne|sw|se     move the selected piece
  cancel          drop the selection (not during a double jump)
  show            draw the board again
  score           show captured pieces
  save            print the encoded game
  help            this text
  quit            leave the game";

#[derive(Args)]
pub struct PlayArgs {
    /// Resume an encoded game instead of starting a new one
    #[arg(long, value_name = "GAME")]
    pub resume: Option<Snapshot>,

    /// Opponent identifier for a new game
    #[arg(long, default_value = "guest")]
    pub opponent: String,
}

/// A parsed line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Select { x: u8, y: u8 },
    Move(Direction),
    Cancel,
    Show,
    Score,
    Save,
    Help,
    Quit,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let snapshot = args
        .resume
        .unwrap_or_else(|| Snapshot::new(args.opponent));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let final_state = run_session(snapshot, stdin.lock(), stdout.lock())?;
    tracing::info!("Session ended: {}", final_state);
    Ok(())
}

/// Drive a game from `input` until it ends, the player quits or input runs out
pub fn run_session<R: BufRead, W: Write>(mut snapshot: Snapshot, input: R, mut out: W) -> Result<Snapshot> {
    writeln!(out, "{}", describe_game(&snapshot.game))?;
    prompt(&snapshot.game, &mut out)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!("Rejected input {:?}: {}", line, e);
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        let game = &mut snapshot.game;
        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Show => writeln!(out, "{}", describe_game(game))?,
            Command::Save => writeln!(out, "{}", snapshot)?,
            Command::Score => {
                let (one, two) = game.score();
                writeln!(out, "Captured: player 1 {}, player 2 {}", one, two)?;
            }
            Command::Cancel => match game.deselect() {
                Ok(()) => writeln!(out, "Selection cleared.")?,
                Err(e) => writeln!(out, "Cannot cancel: {}", e)?,
            },
            Command::Select { x, y } => match game.select(x, y) {
                Ok(moves) => {
                    tracing::debug!("Player {} selected {}{}", game.turn(), row_label(y - 1), x);
                    writeln!(out, "{}", render_board(game.board(), Some(&moves)))?;
                    writeln!(out, "{}", describe_moves(&moves))?;
                }
                Err(e) => {
                    tracing::warn!("Selection rejected: {}", e);
                    writeln!(out, "Cannot select: {}", e)?;
                }
            },
            Command::Move(direction) => {
                let player = game.turn();
                match game.play(direction) {
                    Ok(outcome) => {
                        tracing::info!("Player {} moved {}", player, direction);
                        writeln!(out, "{}", describe_outcome(&outcome))?;
                        match outcome {
                            Outcome::Won(_) => return Ok(snapshot),
                            Outcome::Chain(captures) => {
                                writeln!(out, "{}", render_board(game.board(), Some(&captures)))?;
                                writeln!(out, "{}", describe_moves(&captures))?;
                            }
                            Outcome::TurnPassed => writeln!(out, "{}", describe_game(game))?,
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Move rejected: {}", e);
                        writeln!(out, "Cannot move: {}", e)?;
                    }
                }
            }
        }

        prompt(&snapshot.game, &mut out)?;
    }

    Ok(snapshot)
}

fn prompt<W: Write>(game: &Game, out: &mut W) -> Result<()> {
    let rows: String = game.board().rows_with_pieces(game.turn()).map(row_label).collect();
    if game.is_chaining() {
        writeln!(out, "Player {}, finish the double jump:", game.turn())?;
    } else if game.selected().is_some() {
        writeln!(out, "Player {}, pick a direction or cancel:", game.turn())?;
    } else {
        writeln!(out, "Player {}, select a piece (rows {}):", game.turn(), rows)?;
    }
    out.flush()?;
    Ok(())
}

fn parse_command(line: &str) -> Result<Command> {
    let word = line.to_ascii_lowercase();
    let command = match word.as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "help" | "?" => Command::Help,
        "show" | "board" => Command::Show,
        "score" => Command::Score,
        "save" => Command::Save,
        "cancel" | "x" => Command::Cancel,
        other => {
            if let Ok(direction) = other.parse::<Direction>() {
                Command::Move(direction)
            } else if let Some((x, y)) = parse_coordinate(other) {
                Command::Select { x, y }
            } else {
                bail!("Unrecognized command {:?}; type help for a list", line)
            }
        }
    };
    Ok(command)
}

/// `f1` -> (x = 1, y = 6), both 1-indexed
fn parse_coordinate(s: &str) -> Option<(u8, u8)> {
    let mut chars = s.chars();
    let row = chars.next()?;
    let column = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let y = match row {
        'a'..='h' => row as u8 - b'a' + 1,
        _ => return None,
    };
    let x = match column {
        '1'..='4' => column as u8 - b'0',
        _ => return None,
    };
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::Player;

    fn play_script(script: &str) -> (Snapshot, String) {
        let mut out = Vec::new();
        let snapshot = run_session(Snapshot::new("guest"), script.as_bytes(), &mut out).unwrap();
        (snapshot, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("f1"), Some((1, 6)));
        assert_eq!(parse_coordinate("a4"), Some((4, 1)));
        assert_eq!(parse_coordinate("i1"), None);
        assert_eq!(parse_coordinate("a5"), None);
        assert_eq!(parse_coordinate("a"), None);
        assert_eq!(parse_coordinate("a12"), None);
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("F1").unwrap(), Command::Select { x: 1, y: 6 });
        assert_eq!(parse_command("ne").unwrap(), Command::Move(Direction::NorthEast));
        assert_eq!(parse_command("Cancel").unwrap(), Command::Cancel);
        assert!(parse_command("jump").is_err());
    }

    #[test]
    fn test_session_plays_a_move() {
        let (snapshot, output) = play_script("f1\nne\nquit\n");
        assert_eq!(snapshot.game.turn(), Player::One);
        assert_eq!(
            snapshot.to_string(),
            "guest 1 22222222222000020000111111111111 -"
        );
        assert!(output.contains("Move sent!"));
        assert!(output.contains("Player 1, select a piece (rows FGH):"));
    }

    #[test]
    fn test_session_reports_rejections() {
        let (snapshot, output) = play_script("a1\nne\nwhat\nf1\nnw\ncancel\n");
        assert_eq!(snapshot.game.turn(), Player::Two);
        assert_eq!(snapshot.game.selected(), None);
        assert!(output.contains("Cannot select: cannot select other player's piece"));
        assert!(output.contains("Cannot move: no piece is selected"));
        assert!(output.contains("Unrecognized command \"what\""));
        assert!(output.contains("Cannot move: move nw is not possible"));
        assert!(output.contains("Selection cleared."));
    }

    #[test]
    fn test_session_save_prints_encoded_game() {
        let (_, output) = play_script("g2\nsave\n");
        assert!(output.contains("guest 2 11111111111100000000222222222222 -"));
        assert!(output.contains("Cannot select: piece has nowhere to move"));
    }
}
