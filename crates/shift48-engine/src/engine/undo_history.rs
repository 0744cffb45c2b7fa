use std::collections::VecDeque;

use crate::{Board, GameStats};

/// One restorable snapshot of (board, score), stored by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub board: Board,
    pub score: u64,
}

impl UndoEntry {
    #[must_use]
    pub fn capture(board: &Board, stats: &GameStats) -> Self {
        Self {
            board: board.clone(),
            score: stats.score(),
        }
    }
}

/// Bounded history of session snapshots plus the session undo budget.
///
/// The newest entry always mirrors the live session state: one entry is
/// recorded at session start and one after every board-changing move, so the
/// entry below the top is the state one move ago. The deque is capped at
/// `budget + 1` entries, evicting the oldest, which is exactly enough to
/// spend the whole budget back-to-back.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: VecDeque<UndoEntry>,
    budget: u32,
    used: u32,
}

impl UndoHistory {
    #[must_use]
    pub fn new(budget: u32) -> Self {
        Self {
            entries: VecDeque::with_capacity(budget as usize + 1),
            budget,
            used: 0,
        }
    }

    /// Appends a snapshot, evicting the oldest entry beyond the cap.
    pub fn record(&mut self, entry: UndoEntry) {
        if self.entries.len() > self.budget as usize {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Discards the newest snapshot and returns a copy of the one beneath it
    /// for restoration. `None` (and no mutation) when the history holds no
    /// prior state or the budget is spent; the caller gates on session state.
    pub fn undo(&mut self) -> Option<UndoEntry> {
        if self.entries.len() <= 1 || self.used >= self.budget {
            return None;
        }
        self.entries.pop_back();
        let restored = self.entries.back().cloned();
        debug_assert!(restored.is_some());
        self.used += 1;
        restored
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn budget(&self) -> u32 {
        self.budget
    }

    #[must_use]
    pub const fn used(&self) -> u32 {
        self.used
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.budget - self.used
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1 && self.used < self.budget
    }
}
