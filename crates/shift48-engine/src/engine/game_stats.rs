/// Session scoring and move counters.
///
/// Tracks the metrics a single session accumulates:
///
/// - **Score**: sum of all merge values, multiplier-adjusted; only `undo`
///   can lower it, and only back to a previously recorded value
/// - **Moves**: number of board-changing moves applied
/// - **Merges**: total merged pairs across all moves
/// - **Highest tile**: largest tile value seen so far this session
///
/// # Example
///
/// ```
/// use shift48_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// let applied = stats.apply_move(8, 2, 2); // two merges worth 8, x2 multiplier
///
/// assert_eq!(applied, 16);
/// assert_eq!(stats.score(), 16);
/// assert_eq!(stats.moves(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    moves: u64,
    merges: u64,
    highest_tile: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            moves: 0,
            merges: 0,
            highest_tile: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Number of board-changing moves applied this session.
    #[must_use]
    pub const fn moves(&self) -> u64 {
        self.moves
    }

    #[must_use]
    pub const fn merges(&self) -> u64 {
        self.merges
    }

    /// Largest tile seen this session. Unlike
    /// [`Board::max_tile`](crate::Board::max_tile) this survives the tile
    /// being cleared or undone away.
    #[must_use]
    pub const fn highest_tile(&self) -> u32 {
        self.highest_tile
    }

    /// Records one board-changing move and returns the multiplier-adjusted
    /// score delta that was added.
    pub const fn apply_move(&mut self, raw_delta: u64, multiplier: u64, merged_pairs: usize) -> u64 {
        let adjusted = raw_delta * multiplier;
        self.score += adjusted;
        self.moves += 1;
        self.merges += merged_pairs as u64;
        adjusted
    }

    pub const fn observe_max_tile(&mut self, tile: u32) {
        if tile > self.highest_tile {
            self.highest_tile = tile;
        }
    }

    /// Rolls the score back to an undo snapshot value. Move and merge
    /// counters are deliberately left alone; they count work performed, not
    /// the surviving state.
    pub(crate) const fn restore_score(&mut self, score: u64) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_move_accumulates_adjusted_deltas() {
        let mut stats = GameStats::new();

        assert_eq!(stats.apply_move(4, 1, 1), 4);
        assert_eq!(stats.apply_move(8, 2, 2), 16);
        assert_eq!(stats.score(), 20);
        assert_eq!(stats.moves(), 2);
        assert_eq!(stats.merges(), 3);
    }

    #[test]
    fn highest_tile_never_decreases() {
        let mut stats = GameStats::new();
        stats.observe_max_tile(64);
        stats.observe_max_tile(32);
        assert_eq!(stats.highest_tile(), 64);
    }

    #[test]
    fn restore_score_leaves_counters_untouched() {
        let mut stats = GameStats::new();
        stats.apply_move(4, 1, 1);
        stats.restore_score(0);

        assert_eq!(stats.score(), 0);
        assert_eq!(stats.moves(), 1);
    }
}
