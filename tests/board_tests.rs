//! Board behaviour through the public API: moves, spawns, scoring and the
//! end condition.

use tui_2048::board::{Board, Direction, SIZE};

fn board(values: [[u32; SIZE]; SIZE]) -> Board {
    Board::from_values(values, 42).expect("valid tile values")
}

fn occupied(values: &[[u32; SIZE]; SIZE]) -> usize {
    values.iter().flatten().filter(|&&v| v != 0).count()
}

/// Cells of line `k`, starting at the edge the tiles slide toward.
fn line(direction: Direction, k: usize) -> [(usize, usize); SIZE] {
    std::array::from_fn(|i| match direction {
        Direction::Left => (k, i),
        Direction::Right => (k, SIZE - 1 - i),
        Direction::Up => (i, k),
        Direction::Down => (SIZE - 1 - i, k),
    })
}

/// Straightforward per-line model of a move: walk each line from the
/// leading edge, doubling a tile onto the previous one if that one has not
/// merged yet.  Returns the grid before any spawn and the merge points.
fn expected_move(
    values: [[u32; SIZE]; SIZE],
    direction: Direction,
) -> ([[u32; SIZE]; SIZE], u32) {
    let mut out = [[0; SIZE]; SIZE];
    let mut gained = 0;
    for k in 0..SIZE {
        let cells = line(direction, k);
        let mut stack: Vec<(u32, bool)> = Vec::new();
        for &(r, c) in &cells {
            let v = values[r][c];
            if v == 0 {
                continue;
            }
            match stack.last_mut() {
                Some((top, merged)) if *top == v && !*merged => {
                    *top *= 2;
                    *merged = true;
                    gained += *top;
                }
                _ => stack.push((v, false)),
            }
        }
        for (&(r, c), &(v, _)) in cells.iter().zip(stack.iter()) {
            out[r][c] = v;
        }
    }
    (out, gained)
}

#[test]
fn left_merge_scenario() {
    let mut b = board([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
    let outcome = b.apply_move(Direction::Left);

    assert!(outcome.changed);
    assert_eq!(outcome.gained, 12);
    assert_eq!(b.score(), 12);
    assert_eq!(&b.values()[0][..2], &[4, 8]);

    // The spawn is the only other tile on the board.
    let spawn = outcome.spawned.expect("a changed board spawns");
    assert!(spawn.row != 0 || spawn.col >= 2);
    assert_eq!(b.tile(spawn.row, spawn.col).value(), spawn.tile.value());
    assert_eq!(b.tile_sum(), 12 + spawn.tile.value());
}

#[test]
fn single_pass_merge() {
    let mut b = board([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
    b.apply_move(Direction::Right);
    assert_eq!(&b.values()[0][2..], &[4, 4]);
    assert_eq!(b.score(), 8);
}

#[test]
fn compaction_keeps_order() {
    let mut b = board([[0, 2, 0, 4], [0; 4], [0; 4], [0; 4]]);
    let outcome = b.apply_move(Direction::Right);
    assert_eq!(&b.values()[0][2..], &[2, 4]);
    assert_eq!(outcome.gained, 0);
}

#[test]
fn no_op_move_does_not_spawn() {
    let mut b = board([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
    let before = b.snapshot();
    let outcome = b.apply_move(Direction::Right);

    assert!(!outcome.changed);
    assert!(outcome.spawned.is_none());
    assert_eq!(b.snapshot(), before);

    // Up is also blocked for a tile already on the top row.
    assert!(!b.apply_move(Direction::Up).changed);
    assert_eq!(b.snapshot(), before);
}

#[test]
fn vertical_moves() {
    let mut b = board([[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0]]);
    b.apply_move(Direction::Down);
    let v = b.values();
    assert_eq!(v[3][0], 4);
    assert_eq!(v[2][0], 4);
    assert_eq!(b.score(), 4);

    let mut b = board([[0, 0, 0, 8], [0, 0, 0, 0], [0, 0, 0, 8], [0, 0, 0, 16]]);
    b.apply_move(Direction::Up);
    let v = b.values();
    assert_eq!(v[0][3], 16);
    assert_eq!(v[1][3], 16);
    assert_eq!(b.score(), 16);
}

#[test]
fn reverse_move_does_not_undo_a_merge() {
    let mut b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    b.apply_move(Direction::Left);
    b.apply_move(Direction::Right);
    assert_ne!(b.values()[0], [2, 2, 0, 0]);
    assert!(b.score() >= 4);
}

#[test]
fn checkerboard_is_terminal() {
    let b = board([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ]);
    assert!(b.is_terminal());
    for direction in Direction::ALL {
        assert!(!b.can_move(direction));
    }
}

#[test]
fn full_board_with_a_vertical_pair_is_not_terminal() {
    let b = board([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 8],
        [4, 2, 4, 8],
    ]);
    assert!(!b.is_terminal());
    assert!(b.can_move(Direction::Up));
    assert!(b.can_move(Direction::Down));
    assert!(!b.can_move(Direction::Left));
}

#[test]
fn board_with_empty_cell_is_not_terminal() {
    let b = board([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 0],
    ]);
    assert!(!b.is_terminal());
}

#[test]
fn terminal_check_leaves_board_untouched() {
    let b = board([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 8],
        [4, 2, 4, 8],
    ]);
    let before = b.snapshot();
    let _ = b.is_terminal();
    assert_eq!(b.snapshot(), before);
    assert_eq!(b.score(), 0);
}

#[test]
fn new_board_has_two_small_tiles() {
    for seed in 0..50 {
        let b = Board::new_seeded(seed);
        let v = b.values();
        assert_eq!(occupied(&v), 2);
        assert!(v.iter().flatten().all(|&x| x == 0 || x == 2 || x == 4));
        assert_eq!(b.score(), 0);
        assert!(!b.is_terminal());
    }
}

#[test]
fn spawn_fills_an_empty_cell_with_two_or_four() {
    let mut b = board([[0; 4]; 4]);
    for _ in 0..SIZE * SIZE {
        let before = b.values();
        let spawn = b.spawn().expect("room left");
        assert_eq!(before[spawn.row][spawn.col], 0);
        assert!(matches!(spawn.tile.value(), 2 | 4));
        assert_eq!(b.values()[spawn.row][spawn.col], spawn.tile.value());
    }
    assert_eq!(b.empty_count(), 0);
    assert!(b.spawn().is_none());
}

#[test]
fn spawn_odds_are_roughly_nine_to_one() {
    let mut fours = 0;
    let trials = 2000;
    for seed in 0..trials {
        let mut b = Board::from_values([[0; SIZE]; SIZE], seed).unwrap();
        if b.spawn().map(|s| s.tile.value()) == Some(4) {
            fours += 1;
        }
    }
    assert!((120..280).contains(&fours), "got {} fours", fours);
}

/// Play seeded games to the end, checking the bookkeeping of every move.
#[test]
fn invariants_hold_over_whole_games() {
    for seed in 0..20u64 {
        let mut b = Board::new_seeded(seed);
        let mut step = 0usize;
        while !b.is_terminal() && step < 5000 {
            let direction = Direction::ALL[(step * 7 + seed as usize) % 4];
            let before = b.values();
            let score_before = b.score();
            let sum_before = b.tile_sum();

            let (expected, expected_gain) = expected_move(before, direction);
            let outcome = b.apply_move(direction);
            let after = b.values();

            assert_eq!(outcome.gained, expected_gain);
            assert_eq!(b.score(), score_before + expected_gain);
            assert!(after
                .iter()
                .flatten()
                .all(|&v| v == 0 || (v >= 2 && v.is_power_of_two())));

            match outcome.spawned {
                Some(spawn) => {
                    assert!(outcome.changed);
                    let mut without_spawn = after;
                    without_spawn[spawn.row][spawn.col] = 0;
                    assert_eq!(without_spawn, expected);
                    assert_eq!(expected[spawn.row][spawn.col], 0);
                    assert_eq!(b.tile_sum(), sum_before + spawn.tile.value());
                    // Merges never add tiles; the spawn adds exactly one.
                    assert!(occupied(&after) <= occupied(&before) + 1);
                }
                None => {
                    assert!(!outcome.changed);
                    assert_eq!(expected, before);
                    assert_eq!(after, before);
                    assert_eq!(outcome.gained, 0);
                }
            }
            step += 1;
        }
    }
}
