use std::fmt;

use arrayvec::ArrayVec;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Direction in which tiles slide on a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

/// Grid coordinates, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Spawn probability profile: a new tile is a 2 with probability `p2`,
/// otherwise a 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRates {
    p2: f64,
}

impl SpawnRates {
    #[must_use]
    pub const fn new(p2: f64) -> Self {
        Self { p2 }
    }

    /// Probability of spawning a 2. Clamped to `0.0..=1.0` so a hand-edited
    /// config file can never make the spawn roll panic.
    #[must_use]
    pub fn p2(&self) -> f64 {
        self.p2.clamp(0.0, 1.0)
    }

    /// Probability of spawning a 4.
    #[must_use]
    pub fn p4(&self) -> f64 {
        1.0 - self.p2()
    }

    /// The raw configured value, unclamped, for validation.
    #[must_use]
    pub const fn raw_p2(&self) -> f64 {
        self.p2
    }
}

/// Outcome of a single move.
///
/// `score_delta` is the sum of all values created by merges during the move.
/// At the board level it is the raw sum; [`GameSession`](crate::GameSession)
/// reports it multiplier-adjusted. `merged` lists the post-compaction cells
/// that received a merged tile, in grid coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub moved: bool,
    pub score_delta: u64,
    pub merged: Vec<Position>,
}

/// N×N tile grid with value semantics.
///
/// Cells hold 0 (empty) or a power of two ≥ 2. The grid is stored row-major
/// in an owned `Vec`, and boards compare by value (`PartialEq`), so change
/// detection and undo snapshots never depend on identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
}

type LineBuf = ArrayVec<u32, { Board::MAX_SIZE }>;
type LineCoords = ArrayVec<Position, { Board::MAX_SIZE }>;

impl Board {
    pub const MIN_SIZE: usize = 2;
    pub const MAX_SIZE: usize = 8;

    /// Creates an all-empty board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is outside `MIN_SIZE..=MAX_SIZE`; session start
    /// validates the configured size before constructing a board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(
            (Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size),
            "board size {size} out of range"
        );
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Creates a board with exactly two tiles spawned via the spawn rule.
    #[must_use]
    pub fn initialize<R: Rng + ?Sized>(size: usize, rates: SpawnRates, rng: &mut R) -> Self {
        let mut board = Self::new(size);
        for _ in 0..2 {
            board.spawn_tile(rates, rng);
        }
        board
    }

    /// Builds a board from explicit rows, mainly for tests and debugging.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square grid of a supported size.
    #[must_use]
    pub fn from_rows(rows: &[&[u32]]) -> Self {
        let size = rows.len();
        let mut board = Self::new(size);
        for (row, values) in rows.iter().enumerate() {
            assert_eq!(values.len(), size, "row {row} is not {size} cells wide");
            for (col, &value) in values.iter().enumerate() {
                board.set(Position::new(row, col), value);
            }
        }
        board
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> u32 {
        self.cells[pos.row * self.size + pos.col]
    }

    pub fn set(&mut self, pos: Position, value: u32) {
        self.cells[pos.row * self.size + pos.col] = value;
    }

    /// Iterates rows top to bottom, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks_exact(self.size)
    }

    #[must_use]
    pub fn empty_cells(&self) -> Vec<Position> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| Position::new(row, col)))
            .filter(|&pos| self.get(pos) == 0)
            .collect()
    }

    /// Largest tile value on the board; 0 on an empty board.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Slides and merges tiles in `direction` without spawning.
    ///
    /// Each line (row for Left/Right, column for Up/Down) is compacted toward
    /// the move direction preserving relative order, then adjacent equal
    /// pairs merge left-to-right. A tile participates in at most one merge
    /// per move: `[2, 2, 2, 2]` resolves to `[4, 4, 0, 0]`, never
    /// `[8, 0, 0, 0]`. Merging a pair of value `v` produces `2v` and
    /// contributes `2v` to `score_delta`.
    pub fn shift(&mut self, direction: Direction) -> MoveResult {
        let mut result = MoveResult::default();
        for line in 0..self.size {
            let coords = self.line_coords(direction, line);
            let before: LineBuf = coords.iter().map(|&pos| self.get(pos)).collect();
            let (after, delta, merged_at) = merge_line(&before);
            if after != before {
                result.moved = true;
                for (&pos, &value) in coords.iter().zip(&after) {
                    self.set(pos, value);
                }
            }
            result.score_delta += delta;
            result.merged.extend(merged_at.iter().map(|&i| coords[i]));
        }
        result
    }

    /// Executes a full move: shift, then spawn exactly one tile if the board
    /// changed. A no-op move never spawns.
    pub fn make_move<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rates: SpawnRates,
        rng: &mut R,
    ) -> MoveResult {
        let result = self.shift(direction);
        if result.moved {
            self.spawn_tile(rates, rng);
        }
        result
    }

    /// Places a new tile (2 with probability `p2`, else 4) into a uniformly
    /// random empty cell. Returns the written cell, or `None` without
    /// mutating anything when the board is full.
    pub fn spawn_tile<R: Rng + ?Sized>(
        &mut self,
        rates: SpawnRates,
        rng: &mut R,
    ) -> Option<Position> {
        let empties = self.empty_cells();
        if empties.is_empty() {
            return None;
        }
        let pos = empties[rng.random_range(0..empties.len())];
        let value = if rng.random_bool(rates.p2()) { 2 } else { 4 };
        self.set(pos, value);
        Some(pos)
    }

    /// Clears an occupied cell. Fails (returning `false`, board untouched)
    /// on out-of-bounds coordinates or an already-empty cell.
    pub fn clear_tile(&mut self, pos: Position) -> bool {
        if pos.row >= self.size || pos.col >= self.size || self.get(pos) == 0 {
            return false;
        }
        self.set(pos, 0);
        true
    }

    /// True iff no empty cell exists and no two edge-adjacent cells hold
    /// equal nonzero values.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        if self.cells.contains(&0) {
            return false;
        }
        for row in 0..self.size {
            for col in 0..self.size {
                let value = self.get(Position::new(row, col));
                if col + 1 < self.size && self.get(Position::new(row, col + 1)) == value {
                    return false;
                }
                if row + 1 < self.size && self.get(Position::new(row + 1, col)) == value {
                    return false;
                }
            }
        }
        true
    }

    /// Cells of one line in compaction order (index 0 is the edge tiles
    /// slide toward). Line order is reversed for Right/Down so the merge
    /// scan is uniform across directions.
    fn line_coords(&self, direction: Direction, line: usize) -> LineCoords {
        let n = self.size;
        let mut coords: LineCoords = match direction {
            Direction::Left | Direction::Right => {
                (0..n).map(|col| Position::new(line, col)).collect()
            }
            Direction::Up | Direction::Down => (0..n).map(|row| Position::new(row, line)).collect(),
        };
        if matches!(direction, Direction::Right | Direction::Down) {
            coords.reverse();
        }
        coords
    }
}

/// Compacts and merges one line toward index 0.
///
/// Returns the resolved line (zero-padded to the input length), the raw score
/// delta, and the indices of cells holding a freshly merged tile.
fn merge_line(line: &[u32]) -> (LineBuf, u64, ArrayVec<usize, { Board::MAX_SIZE }>) {
    let mut out = LineBuf::new();
    let mut merged_at = ArrayVec::new();
    let mut delta = 0u64;

    let mut tiles = line.iter().copied().filter(|&v| v != 0).peekable();
    while let Some(value) = tiles.next() {
        if tiles.peek() == Some(&value) {
            tiles.next();
            let fused = value * 2;
            delta += u64::from(fused);
            merged_at.push(out.len());
            out.push(fused);
        } else {
            out.push(value);
        }
    }
    while out.len() < line.len() {
        out.push(0);
    }
    (out, delta, merged_at)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &value in row {
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{value:>6}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const RATES: SpawnRates = SpawnRates::new(0.9);

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn shift_left_merges_each_tile_at_most_once() {
        let mut board = Board::from_rows(&[
            &[2, 2, 2, 2],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]);
        let result = board.shift(Direction::Left);

        assert!(result.moved);
        assert_eq!(result.score_delta, 8);
        assert_eq!(
            board,
            Board::from_rows(&[
                &[4, 4, 0, 0],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ])
        );
        assert_eq!(
            result.merged,
            vec![Position::new(0, 0), Position::new(0, 1)]
        );
    }

    #[test]
    fn shift_left_merges_first_adjacent_pair_only() {
        let mut board = Board::from_rows(&[
            &[0, 2, 2, 4],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]);
        let result = board.shift(Direction::Left);

        assert!(result.moved);
        assert_eq!(result.score_delta, 4);
        assert_eq!(board.rows().next().unwrap(), &[4, 4, 0, 0]);
    }

    #[test]
    fn shift_right_compacts_toward_the_right_edge() {
        let mut board = Board::from_rows(&[
            &[2, 0, 2, 4],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]);
        let result = board.shift(Direction::Right);

        assert!(result.moved);
        assert_eq!(result.score_delta, 4);
        assert_eq!(board.rows().next().unwrap(), &[0, 0, 4, 4]);
        assert_eq!(result.merged, vec![Position::new(0, 2)]);
    }

    #[test]
    fn shift_up_and_down_operate_on_columns() {
        let mut board = Board::from_rows(&[
            &[2, 0, 0, 0],
            &[2, 0, 0, 0],
            &[4, 0, 0, 0],
            &[4, 0, 0, 0],
        ]);
        let result = board.shift(Direction::Up);

        assert!(result.moved);
        assert_eq!(result.score_delta, 12);
        assert_eq!(board.get(Position::new(0, 0)), 4);
        assert_eq!(board.get(Position::new(1, 0)), 8);
        assert_eq!(board.get(Position::new(2, 0)), 0);

        let mut board = Board::from_rows(&[
            &[2, 0, 0, 0],
            &[2, 0, 0, 0],
            &[4, 0, 0, 0],
            &[4, 0, 0, 0],
        ]);
        let result = board.shift(Direction::Down);

        assert!(result.moved);
        assert_eq!(result.score_delta, 12);
        assert_eq!(board.get(Position::new(3, 0)), 8);
        assert_eq!(board.get(Position::new(2, 0)), 4);
        assert_eq!(board.get(Position::new(1, 0)), 0);
    }

    #[test]
    fn noop_shift_reports_unmoved_and_zero_delta() {
        let mut board = Board::from_rows(&[
            &[2, 4, 0, 0],
            &[8, 2, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]);
        let before = board.clone();
        let result = board.shift(Direction::Left);

        assert!(!result.moved);
        assert_eq!(result.score_delta, 0);
        assert!(result.merged.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn make_move_spawns_exactly_one_tile_after_a_change() {
        let mut board = Board::from_rows(&[
            &[2, 2, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]);
        let result = board.make_move(Direction::Left, RATES, &mut rng());

        assert!(result.moved);
        // One merged tile plus one spawned tile.
        let occupied = board.rows().flatten().filter(|&&v| v != 0).count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn make_move_never_spawns_on_a_noop() {
        let mut board = Board::from_rows(&[
            &[2, 4, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]);
        let before = board.clone();
        let result = board.make_move(Direction::Left, RATES, &mut rng());

        assert!(!result.moved);
        assert_eq!(board, before);
    }

    #[test]
    fn spawn_writes_only_into_a_previously_empty_cell() {
        let mut board = Board::from_rows(&[
            &[2, 4, 8, 16],
            &[32, 64, 128, 256],
            &[2, 4, 8, 16],
            &[32, 64, 128, 0],
        ]);
        let mut rng = rng();
        let pos = board.spawn_tile(RATES, &mut rng).unwrap();

        assert_eq!(pos, Position::new(3, 3));
        assert!(matches!(board.get(pos), 2 | 4));
    }

    #[test]
    fn spawn_on_full_board_fails_without_mutation() {
        let mut board = Board::from_rows(&[
            &[2, 4, 8, 16],
            &[32, 64, 128, 256],
            &[2, 4, 8, 16],
            &[32, 64, 128, 256],
        ]);
        let before = board.clone();

        assert!(board.spawn_tile(RATES, &mut rng()).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn spawn_rate_extremes_are_deterministic() {
        let mut board = Board::new(4);
        let pos = board.spawn_tile(SpawnRates::new(1.0), &mut rng()).unwrap();
        assert_eq!(board.get(pos), 2);

        let mut board = Board::new(4);
        let pos = board.spawn_tile(SpawnRates::new(0.0), &mut rng()).unwrap();
        assert_eq!(board.get(pos), 4);
    }

    #[test]
    fn game_over_requires_full_board_and_no_equal_neighbors() {
        // Strictly alternating values, no equal neighbors anywhere.
        let board = Board::from_rows(&[
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
        ]);
        assert!(board.is_game_over());

        // Same board with one equal adjacent pair.
        let mut board = board;
        board.set(Position::new(0, 1), 2);
        assert!(!board.is_game_over());
    }

    #[test]
    fn board_with_an_empty_cell_is_never_game_over() {
        let mut board = Board::from_rows(&[
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
        ]);
        board.set(Position::new(2, 2), 0);
        assert!(!board.is_game_over());
    }

    #[test]
    fn max_tile_on_empty_board_is_zero() {
        assert_eq!(Board::new(4).max_tile(), 0);
    }

    #[test]
    fn max_tile_returns_the_largest_value() {
        let board = Board::from_rows(&[
            &[2, 4, 2, 4],
            &[4, 1024, 4, 2],
            &[2, 4, 2, 4],
            &[0, 0, 0, 0],
        ]);
        assert_eq!(board.max_tile(), 1024);
    }

    #[test]
    fn clear_tile_rejects_out_of_bounds_and_empty_cells() {
        let mut board = Board::from_rows(&[
            &[2, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]);

        assert!(!board.clear_tile(Position::new(4, 0)));
        assert!(!board.clear_tile(Position::new(0, 4)));
        assert!(!board.clear_tile(Position::new(1, 1)));
        assert!(board.clear_tile(Position::new(0, 0)));
        assert_eq!(board.get(Position::new(0, 0)), 0);
        // A second clear of the same cell fails.
        assert!(!board.clear_tile(Position::new(0, 0)));
    }

    #[test]
    fn initialize_spawns_exactly_two_tiles() {
        let board = Board::initialize(5, RATES, &mut rng());
        let occupied = board.rows().flatten().filter(|&&v| v != 0).count();
        assert_eq!(occupied, 2);
        assert!(board.rows().flatten().all(|&v| matches!(v, 0 | 2 | 4)));
    }

    #[test]
    fn five_by_five_moves_use_the_whole_line() {
        let mut board = Board::from_rows(&[
            &[2, 2, 4, 4, 8],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let result = board.shift(Direction::Left);

        assert!(result.moved);
        assert_eq!(result.score_delta, 12);
        assert_eq!(board.rows().next().unwrap(), &[4, 8, 8, 0, 0]);
    }
}
