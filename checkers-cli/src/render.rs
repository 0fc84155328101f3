//! Text rendering of boards, move lists and outcomes
//!
//! The engine knows nothing about glyphs; this table is the only place
//! symbols are turned into something a person looks at.

use checkers_core::board::{COLUMNS, ROWS};
use checkers_core::{Board, Game, Moves, Outcome, Piece};

/// Glyph per board symbol: empty, player 1, player 2, king 1, king 2
const PIECE_GLYPHS: [char; 5] = ['.', 'o', 'x', 'O', 'X'];

/// Destination markers, in `Direction::ALL` slot order
const MOVE_MARKERS: [char; 4] = ['↖', '↗', '↙', '↘'];

/// Light squares are never played on
const LIGHT_SQUARE: char = ' ';

pub fn glyph(piece: Piece) -> char {
    PIECE_GLYPHS[piece.symbol() as usize]
}

/// Row letter for a 0-based row
pub fn row_label(row: u8) -> char {
    char::from(b'A' + row)
}

/// Draw the board, overlaying the destinations of `moves` if given
pub fn render_board(board: &Board, moves: Option<&Moves>) -> String {
    let mut glyphs: Vec<char> = board.squares().map(|s| glyph(s.piece)).collect();
    if let Some(moves) = moves {
        for (direction, mv) in moves.possible() {
            glyphs[mv.to.index as usize] = MOVE_MARKERS[direction.slot()];
        }
    }

    let mut out = String::new();
    for (row, cells) in glyphs.chunks(COLUMNS as usize).enumerate() {
        let row = row as u8;
        let mut line: Vec<char> = Vec::with_capacity(2 * COLUMNS as usize);
        for &g in cells {
            // Even rows start on a light square, odd rows on a dark one
            if row % 2 == 0 {
                line.extend([LIGHT_SQUARE, g]);
            } else {
                line.extend([g, LIGHT_SQUARE]);
            }
        }
        let cells: Vec<String> = line.iter().map(char::to_string).collect();
        out.push_str(format!("{} {}", row_label(row), cells.join(" ")).trim_end());
        out.push('\n');
    }

    let footer: Vec<String> = (1..=COLUMNS).flat_map(|c| [c, c]).map(|c| c.to_string()).collect();
    out.push_str(&format!("  {}\n", footer.join(" ")));
    debug_assert_eq!(out.lines().count(), ROWS as usize + 1);
    out
}

/// One line per slot, impossible slots included so slot positions stay put
pub fn describe_moves(moves: &Moves) -> String {
    moves
        .iter()
        .map(|(direction, mv)| {
            let what = if mv.is_capture() {
                let jumped = mv.jumped.map(|s| s.label()).unwrap_or_default();
                format!("capture {} -> {}", jumped, mv.to.label())
            } else if mv.is_possible() {
                format!("step -> {}", mv.to.label())
            } else {
                "-".to_string()
            };
            format!("{} {}: {}", MOVE_MARKERS[direction.slot()], direction, what)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::TurnPassed => "Move sent! Waiting for the other player.".to_string(),
        Outcome::Chain(_) => "Double jump! Capture again with the same piece.".to_string(),
        Outcome::Won(player) => format!("Player {} wins!", player),
    }
}

/// Header, board and score for a game
pub fn describe_game(game: &Game) -> String {
    let (one, two) = game.score();
    let selected = game
        .selected()
        .and_then(|i| game.square_at_index(i).ok())
        .map(|s| s.label())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "Player {} to move (selected: {})\n{}Captured: player 1 {}, player 2 {}",
        game.turn(),
        selected,
        render_board(game.board(), None),
        one,
        two
    )
}
