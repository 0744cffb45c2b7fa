//! Game engine logic and state management.
//!
//! This module provides the high-level logic that orchestrates the core grid
//! into a full merge-puzzle session:
//!
//! - [`GameSession`] - Top-level state machine running the move pipeline
//! - [`GameStats`] - Session score, move and merge counters
//! - [`UndoHistory`] - Bounded snapshot history with an undo budget
//! - [`PowerUpSystem`] - Limited-use abilities and timed multiplier effects
//! - [`AchievementEvaluator`] - Named-predicate achievement catalog
//! - [`NotificationQueue`] - Transient display events with time-based expiry
//! - [`GameConfig`] - Difficulty profiles and initial budgets
//!
//! # Move Pipeline
//!
//! Each accepted move runs as one atomic unit:
//!
//! 1. Shift and merge tiles, spawn one new tile if the board changed
//! 2. Apply the multiplier-adjusted score delta
//! 3. Age active power-up effects
//! 4. Record an undo snapshot
//! 5. Scan locked achievements and enqueue unlock notifications
//! 6. Check for game over and transition the session state
//!
//! A no-op move (no line changed) short-circuits after step 1 with nothing
//! spawned, scored, or recorded.
//!
//! # Example
//!
//! ```
//! use shift48_engine::{Difficulty, Direction, GameConfig, GameSession};
//!
//! let mut session = GameSession::new(GameConfig::default()).unwrap();
//! session.start(Difficulty::Medium);
//!
//! for direction in Direction::ALL {
//!     let result = session.apply_move(direction);
//!     if result.moved {
//!         break;
//!     }
//! }
//! ```

pub use self::{
    achievement::*, config::*, game_session::*, game_stats::*, notification::*, power_up::*,
    undo_history::*,
};

mod achievement;
mod config;
mod game_session;
mod game_stats;
mod notification;
mod power_up;
mod undo_history;
