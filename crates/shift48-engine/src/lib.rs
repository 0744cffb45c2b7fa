pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected values found while validating a [`GameConfig`](engine::GameConfig)
/// at startup. Configuration problems are surfaced here, before a session
/// starts; nothing in the move pipeline can fail on them afterwards.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("spawn probability {p2} out of range (expected 0.0..=1.0)")]
    SpawnRateOutOfRange { p2: f64 },
    #[display(
        "board size {size} out of range (expected {}..={})",
        Board::MIN_SIZE,
        Board::MAX_SIZE
    )]
    BoardSizeOutOfRange { size: usize },
}
