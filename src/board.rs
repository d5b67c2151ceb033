use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::tile::Tile;

/// Width and height of the grid.
pub const SIZE: usize = 4;
/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Row-major grid of tiles; row 0 is the top row.
pub type Grid = [[Tile; SIZE]; SIZE];

/// The four directions a move can slide the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// A tile placed by [`Board::spawn`].
#[derive(Debug, Clone, Copy)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub tile: Tile,
}

/// What a single [`Board::apply_move`] did.
#[derive(Debug, Clone, Copy)]
pub struct MoveOutcome {
    /// Whether any cell changed.  Only then is a tile spawned.
    pub changed: bool,
    /// Sum of the tiles created by merges during this move.
    pub gained: u32,
    pub spawned: Option<Spawn>,
}

/// Read-only view of the board handed to the renderer once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub cells: [[u32; SIZE]; SIZE],
    pub score: u32,
}

/// The game board – the single source of truth for all game state.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Grid,
    score: u32,
    rng: SmallRng,
}

impl Board {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Start a fresh session seeded from the OS.
    pub fn new_random() -> Self {
        Self::with_initial_spawns(SmallRng::from_os_rng())
    }

    /// Start a fresh session from a specific seed (useful for reproducible games).
    pub fn new_seeded(seed: u64) -> Self {
        Self::with_initial_spawns(SmallRng::seed_from_u64(seed))
    }

    /// Build a board from raw cell values (for testing and replays).  Score
    /// starts at 0; `seed` drives later spawns.
    pub fn from_values(values: [[u32; SIZE]; SIZE], seed: u64) -> Result<Self, &'static str> {
        let mut cells = [[Tile::EMPTY; SIZE]; SIZE];
        for (row, raw) in cells.iter_mut().zip(values.iter()) {
            for (cell, &value) in row.iter_mut().zip(raw.iter()) {
                *cell = Tile::from_value(value).ok_or("Tile values must be 0 or a power of two up to 131072")?;
            }
        }

        Ok(Board {
            cells,
            score: 0,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    fn with_initial_spawns(rng: SmallRng) -> Self {
        let mut board = Board {
            cells: [[Tile::EMPTY; SIZE]; SIZE],
            score: 0,
            rng,
        };
        board.spawn();
        board.spawn();
        board
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.cells[row][col]
    }

    pub fn values(&self) -> [[u32; SIZE]; SIZE] {
        values_of(&self.cells)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.values(),
            score: self.score,
        }
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|t| t.is_empty()).count()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().map(|t| t.value()).max().unwrap_or(0)
    }

    /// Sum of every tile value on the board.
    pub fn tile_sum(&self) -> u32 {
        self.cells.iter().flatten().map(|t| t.value()).sum()
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Slide every row toward `direction`, merging equal neighbours, and
    /// spawn a new tile if anything changed.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let before = self.values();

        let (cells, gained) = slide_grid(&self.cells, direction);
        self.cells = cells;
        self.score = self.score.saturating_add(gained);

        let changed = self.values() != before;
        let spawned = if changed { self.spawn() } else { None };

        MoveOutcome {
            changed,
            gained,
            spawned,
        }
    }

    /// Would a move in `direction` change the board?  Does not touch the
    /// live grid or the score.
    pub fn can_move(&self, direction: Direction) -> bool {
        let (cells, _) = slide_grid(&self.cells, direction);
        values_of(&cells) != self.values()
    }

    /// Place a 2 (or, with [`FOUR_PROBABILITY`], a 4) on a uniformly chosen
    /// empty cell.  Returns `None` when the board is full.
    pub fn spawn(&mut self) -> Option<Spawn> {
        let empty: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| Tile::equals(self.cells[row][col], Tile::EMPTY))
            .collect();

        let &(row, col) = empty.choose(&mut self.rng)?;
        let tile = if self.rng.random_bool(FOUR_PROBABILITY) {
            Tile::FOUR
        } else {
            Tile::TWO
        };
        self.cells[row][col] = tile;

        Some(Spawn { row, col, tile })
    }

    // -------------------------------------------------------------------------
    // End Condition
    // -------------------------------------------------------------------------

    /// The game is over when no cell is empty and no direction would change
    /// anything.
    pub fn is_terminal(&self) -> bool {
        self.empty_count() == 0 && Direction::ALL.iter().all(|&d| !self.can_move(d))
    }
}

// -----------------------------------------------------------------------------
// Grid transforms
// -----------------------------------------------------------------------------

fn values_of(cells: &Grid) -> [[u32; SIZE]; SIZE] {
    cells.map(|row| row.map(Tile::value))
}

fn identity(cells: &Grid) -> Grid {
    *cells
}

/// Mirror each row left-to-right.
pub fn flip_horizontal(cells: &Grid) -> Grid {
    let mut out = *cells;
    for row in out.iter_mut() {
        row.reverse();
    }
    out
}

/// Quarter turn counter-clockwise: the rightmost column becomes the top row.
pub fn rotate_90(cells: &Grid) -> Grid {
    let mut out = [[Tile::EMPTY; SIZE]; SIZE];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = cells[j][SIZE - 1 - i];
        }
    }
    out
}

/// Three quarter turns counter-clockwise (one clockwise).
pub fn rotate_270(cells: &Grid) -> Grid {
    let mut out = [[Tile::EMPTY; SIZE]; SIZE];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = cells[SIZE - 1 - j][i];
        }
    }
    out
}

/// Apply a move to a copy of the grid.  Returns the new grid and the points
/// gained from merges.
fn slide_grid(cells: &Grid, direction: Direction) -> (Grid, u32) {
    let (pre, post): (fn(&Grid) -> Grid, fn(&Grid) -> Grid) = match direction {
        Direction::Right => (identity, identity),
        Direction::Left => (flip_horizontal, flip_horizontal),
        Direction::Down => (rotate_90, rotate_270),
        Direction::Up => (rotate_270, rotate_90),
    };

    let mut grid = pre(cells);
    let mut gained = 0;
    for row in grid.iter_mut() {
        let (slid, points) = slide_row_right(*row);
        *row = slid;
        gained += points;
    }

    (post(&grid), gained)
}

/// Compact a row toward its right end and merge equal neighbours once.
///
/// Merging starts at the right edge, so `[2, 2, 2, 2]` becomes
/// `[0, 0, 4, 4]`: a tile produced by a merge never merges again in the
/// same pass.
pub fn slide_row_right(row: [Tile; SIZE]) -> ([Tile; SIZE], u32) {
    // packed[0] is the rightmost occupied tile.
    let mut packed = [Tile::EMPTY; SIZE];
    let mut len = 0;
    for &tile in row.iter().rev() {
        if !tile.is_empty() {
            packed[len] = tile;
            len += 1;
        }
    }

    let mut gained = 0;
    let mut i = 0;
    while i + 1 < len {
        if Tile::can_combine(packed[i], packed[i + 1]) {
            let merged = Tile::combine(packed[i], packed[i + 1]);
            gained += merged.value();
            packed[i] = merged;
            packed.copy_within(i + 2..len, i + 1);
            len -= 1;
            packed[len] = Tile::EMPTY;
        }
        i += 1;
    }

    let mut out = [Tile::EMPTY; SIZE];
    for (k, &tile) in packed.iter().enumerate() {
        out[SIZE - 1 - k] = tile;
    }
    (out, gained)
}
