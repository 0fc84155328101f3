//! Integration tests for the checkers rule engine
//!
//! Walks whole turns through the public API and checks board invariants on
//! seeded random positions.

use checkers_core::{
    Board, Direction, Game, GameResult, Move, MoveKind, Outcome, Phase, Piece, Player, SelectError,
    Snapshot, Square, STARTING_BOARD,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Random board with every symbol equally likely
fn random_board(rng: &mut ChaCha8Rng) -> Board {
    let symbols: String = (0..32)
        .map(|_| char::from(b'0' + rng.gen_range(0..5u8)))
        .collect();
    symbols.parse().unwrap()
}

fn random_player(rng: &mut ChaCha8Rng) -> Player {
    if rng.gen_bool(0.5) {
        Player::One
    } else {
        Player::Two
    }
}

/// Random game in any phase; a chaining game always has a capture pending
fn random_game(rng: &mut ChaCha8Rng) -> Game {
    let board = random_board(rng);
    let turn = random_player(rng);
    let chains: Vec<u8> = board
        .squares()
        .filter(|square| board.available_moves(square, turn, true).is_ok())
        .map(|square| square.index)
        .collect();

    let phase = match rng.gen_range(0..3) {
        0 => Phase::Idle,
        1 if !chains.is_empty() => Phase::Chaining(chains[rng.gen_range(0..chains.len())]),
        _ => Phase::Selected(rng.gen_range(0..32u8)),
    };
    Game::from_parts(board, turn, phase)
}

/// Every (square, direction) pair on a board
fn all_slots(board: &Board) -> Vec<(Square, Direction)> {
    board
        .squares()
        .flat_map(|square| Direction::ALL.map(|d| (square, d)))
        .collect()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_opening_selection_moves_toward_row_zero() {
    let snapshot: Snapshot = format!("rival 2 {} -", STARTING_BOARD).parse().unwrap();
    let game = snapshot.game;
    let square = game.square_at_index(20).unwrap();
    assert_eq!((square.x, square.y), (0, 5));

    let moves = game.available_moves(&square, false).unwrap();
    assert!(!moves.has_capture());
    for (_, mv) in moves.possible() {
        assert!(mv.to.y < square.y);
        assert_eq!(mv.kind, MoveKind::Step);
    }
    assert_eq!(moves.possible().count(), 1);
}

#[test]
fn test_capture_then_score() {
    let mut board = Board::empty();
    board.set(21, Piece::Man(Player::One)).unwrap();
    board.set(17, Piece::Man(Player::Two)).unwrap();
    for index in 0..11 {
        board.set(index, Piece::Man(Player::Two)).unwrap();
    }
    for index in 24..32 {
        board.set(index, Piece::Man(Player::One)).unwrap();
    }
    let game = Game::from_parts(board, Player::One, Phase::Idle);
    assert_eq!(game.score(), (0, 3));

    let square = game.square_at_index(21).unwrap();
    let mv = game.move_at_direction(&square, Direction::NorthEast, false);
    assert_eq!(mv.kind, MoveKind::Capture);
    assert_eq!(mv.jumped.map(|s| s.index), Some(17));

    let mut board = *game.board();
    board.move_piece(&square, &mv).unwrap();
    assert_eq!(board.get(21), Some(Piece::Empty));
    assert_eq!(board.get(17), Some(Piece::Empty));
    assert_eq!(board.get(mv.to.index), Some(Piece::Man(Player::One)));

    let after = Game::from_parts(board, Player::One, Phase::Idle);
    assert_eq!(after.score(), (1, 3));
}

#[test]
fn test_full_turn_cycle_through_snapshots() {
    // Player two opens, player one answers; each step goes through the
    // encoded form the way a front-end would store it.
    let mut encoded = Snapshot::new("p1").to_string();

    let mut snapshot: Snapshot = encoded.parse().unwrap();
    snapshot.game.select(2, 6).unwrap();
    encoded = snapshot.to_string();
    assert!(encoded.ends_with(" 21"));

    let mut snapshot: Snapshot = encoded.parse().unwrap();
    let outcome = snapshot.game.play(Direction::NorthWest).unwrap();
    assert_eq!(outcome, Outcome::TurnPassed);
    snapshot.opponent = "p2".to_string();
    encoded = snapshot.to_string();

    let mut snapshot: Snapshot = encoded.parse().unwrap();
    assert_eq!(snapshot.game.turn(), Player::One);
    assert_eq!(snapshot.game.selected(), None);
    // Player two's piece on 16 now sits on 15 from player one's side
    assert_eq!(snapshot.game.board().get(15), Some(Piece::Man(Player::Two)));

    snapshot.game.select(1, 6).unwrap();
    assert_eq!(
        snapshot.game.play(Direction::NorthEast).unwrap(),
        Outcome::TurnPassed
    );
    assert_eq!(snapshot.game.turn(), Player::Two);
    assert_eq!(snapshot.game.score(), (0, 0));
}

#[test]
fn test_selecting_invalid_squares() {
    let mut game = Game::new();
    assert_eq!(
        game.select(1, 4).unwrap_err().to_string(),
        SelectError::EmptySquare.to_string()
    );
    assert_eq!(
        game.select(4, 8).unwrap_err().to_string(),
        "piece has nowhere to move"
    );
    assert_eq!(game.result(), GameResult::Ongoing);
}

// ============================================================================
// INVARIANTS ON RANDOM POSITIONS
// ============================================================================

#[test]
fn test_snapshot_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut chaining = 0;
    for i in 0..200 {
        let snapshot = Snapshot {
            opponent: format!("user{}", i),
            game: random_game(&mut rng),
        };
        let decoded: Snapshot = snapshot.to_string().parse().unwrap();
        assert_eq!(decoded, snapshot);
        chaining += usize::from(decoded.game.is_chaining());
    }
    assert!(chaining > 0);
}

#[test]
fn test_swap_turn_twice_restores_game() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let original = random_game(&mut rng);
        let mut game = original.clone();
        game.swap_turn();
        assert_eq!(game.selected(), None);
        game.swap_turn();
        assert_eq!(game.board(), original.board());
        assert_eq!(game.turn(), original.turn());
        assert_eq!(game.selected(), None);
    }
}

#[test]
fn test_piece_owner_and_king_offset() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..50 {
        let board = random_board(&mut rng);
        for square in board.squares() {
            match square.player() {
                None => assert!(square.is_empty()),
                Some(player) => {
                    assert!(matches!(player.number(), 1 | 2));
                    let plain = if square.is_king() {
                        square.piece.symbol() - 2
                    } else {
                        square.piece.symbol()
                    };
                    assert_eq!(plain, player.number());
                }
            }
        }
    }
}

#[test]
fn test_impossible_moves_equal_default() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..50 {
        let board = random_board(&mut rng);
        for jump_only in [false, true] {
            for (square, direction) in all_slots(&board) {
                let mv = board.move_at_direction(&square, direction, jump_only);
                if !mv.is_possible() {
                    assert_eq!(mv, Move::default());
                }
                if jump_only {
                    assert_ne!(mv.kind, MoveKind::Step);
                }
            }
        }
    }
}

#[test]
fn test_capture_geometry() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut captures = 0;
    for _ in 0..200 {
        let board = random_board(&mut rng);
        for (square, direction) in all_slots(&board) {
            let mv = board.move_at_direction(&square, direction, false);
            if !mv.is_capture() {
                continue;
            }
            captures += 1;

            let jumped = mv.jumped.expect("capture without a jumped square");
            let first = board.square_at_direction(&square, direction).unwrap();
            assert_eq!(first, jumped);
            assert_ne!(jumped.player(), square.player());

            let second = board.square_at_direction(&first, direction).unwrap();
            assert_eq!(second, mv.to);
            assert!(mv.to.is_empty());
        }
    }
    assert!(captures > 0);
}

#[test]
fn test_plain_pieces_never_move_south() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..100 {
        let board = random_board(&mut rng);
        for (square, direction) in all_slots(&board) {
            if square.is_king() || direction.is_north() {
                continue;
            }
            assert_eq!(
                board.move_at_direction(&square, direction, false),
                Move::default()
            );
        }
    }
}

#[test]
fn test_lone_king_reaches_every_open_diagonal() {
    for index in 0..32u8 {
        let mut board = Board::empty();
        board.set(index, Piece::King(Player::One)).unwrap();
        let square = board.square_at_index(index).unwrap();
        for direction in Direction::ALL {
            let has_neighbor = board.square_at_direction(&square, direction).is_ok();
            let mv = board.move_at_direction(&square, direction, false);
            assert_eq!(mv.is_possible(), has_neighbor, "{} {}", index, direction);
        }
    }
}
