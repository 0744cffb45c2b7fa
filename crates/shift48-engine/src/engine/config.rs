use serde::{Deserialize, Serialize};

use crate::{Board, ConfigError, SpawnRates};

/// Named difficulty profile selecting board size and spawn probabilities.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

/// Per-difficulty session parameters, fixed for the session lifetime.
///
/// `time_limit_secs` arms timed mode: when set, the session counts down from
/// this limit and forces a game over at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub board_size: usize,
    pub spawn_rates: SpawnRates,
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

/// Initial per-kind power-up use counts handed to each new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpCounts {
    pub undo: u32,
    pub clear_tile: u32,
    pub score_multiplier: u32,
}

impl Default for PowerUpCounts {
    fn default() -> Self {
        Self {
            undo: 3,
            clear_tile: 2,
            score_multiplier: 1,
        }
    }
}

/// Session configuration supplied by the config collaborator at startup.
///
/// Every field carries a serde default, so a partial config file overrides
/// only the keys it names and inherits the rest from [`GameConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
    pub undo_budget: u32,
    pub power_ups: PowerUpCounts,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile {
                board_size: 4,
                spawn_rates: SpawnRates::new(0.95),
                time_limit_secs: None,
            },
            medium: DifficultyProfile {
                board_size: 4,
                spawn_rates: SpawnRates::new(0.90),
                time_limit_secs: None,
            },
            hard: DifficultyProfile {
                board_size: 5,
                spawn_rates: SpawnRates::new(0.85),
                time_limit_secs: None,
            },
            undo_budget: 3,
            power_ups: PowerUpCounts::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Checks every profile for out-of-range board sizes and spawn
    /// probabilities. Run once at startup; the move pipeline assumes a
    /// validated configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            let profile = self.profile(difficulty);
            if !(Board::MIN_SIZE..=Board::MAX_SIZE).contains(&profile.board_size) {
                return Err(ConfigError::BoardSizeOutOfRange {
                    size: profile.board_size,
                });
            }
            let p2 = profile.spawn_rates.raw_p2();
            if !(0.0..=1.0).contains(&p2) {
                return Err(ConfigError::SpawnRateOutOfRange { p2 });
            }
        }
        Ok(())
    }
}
