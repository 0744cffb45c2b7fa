//! Local profile persistence for shift48.
//!
//! Stores score history, achievement-unlock records, and lifetime statistics
//! as JSON files under a data directory. There is a single local profile and
//! no network semantics. Every operation returns `anyhow::Result`; the
//! frontend treats writes as fire-and-forget and logs failures without ever
//! touching in-memory session state — this crate is the collaborator
//! boundary, not part of the rule engine.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use shift48_engine::{AchievementId, Difficulty};

const SCORES_FILE: &str = "scores.json";
const ACHIEVEMENTS_FILE: &str = "achievements.json";
const STATS_FILE: &str = "stats.json";

/// One finished game in the score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u64,
    pub difficulty: Difficulty,
    pub timestamp: DateTime<Utc>,
}

/// A persisted achievement unlock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub id: AchievementId,
    pub timestamp: DateTime<Utc>,
}

/// Lifetime counters across all sessions of the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub games_played: u64,
    pub total_score: u64,
    pub highest_tile: u32,
    pub time_played_secs: u64,
    pub moves_made: u64,
}

/// Summary of one finished game, as reported by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub score: u64,
    pub difficulty: Difficulty,
    pub duration_secs: u64,
    pub moves: u64,
    pub highest_tile: u32,
}

/// JSON-file-backed store for a single local profile.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    data_dir: PathBuf,
}

impl ProfileStore {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Appends the game to the score history and folds it into the lifetime
    /// statistics.
    pub fn record_game_result(&self, result: &GameResult) -> anyhow::Result<()> {
        let mut scores: Vec<ScoreRecord> = self.read_or_default(SCORES_FILE)?;
        scores.push(ScoreRecord {
            score: result.score,
            difficulty: result.difficulty,
            timestamp: Utc::now(),
        });
        self.write(SCORES_FILE, &scores)?;

        let mut stats = self.load_statistics()?;
        stats.games_played += 1;
        stats.total_score += result.score;
        stats.time_played_secs += result.duration_secs;
        stats.moves_made += result.moves;
        stats.highest_tile = stats.highest_tile.max(result.highest_tile);
        self.save_statistics(&stats)?;

        debug!(
            "recorded game result: score={} difficulty={}",
            result.score, result.difficulty
        );
        Ok(())
    }

    /// The most recent `limit` score records, newest first.
    pub fn recent_scores(&self, limit: usize) -> anyhow::Result<Vec<ScoreRecord>> {
        let scores: Vec<ScoreRecord> = self.read_or_default(SCORES_FILE)?;
        Ok(scores.into_iter().rev().take(limit).collect())
    }

    /// Records an unlock with its timestamp. Recording an already-persisted
    /// id again is a no-op; the first timestamp wins.
    pub fn record_achievement_unlock(
        &self,
        id: AchievementId,
        timestamp: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let mut unlocks: Vec<UnlockRecord> = self.read_or_default(ACHIEVEMENTS_FILE)?;
        if unlocks.iter().any(|record| record.id == id) {
            return Ok(());
        }
        unlocks.push(UnlockRecord { id, timestamp });
        self.write(ACHIEVEMENTS_FILE, &unlocks)?;
        debug!("recorded achievement unlock: {id}");
        Ok(())
    }

    pub fn unlocked_achievements(&self) -> anyhow::Result<Vec<UnlockRecord>> {
        self.read_or_default(ACHIEVEMENTS_FILE)
    }

    pub fn load_statistics(&self) -> anyhow::Result<Statistics> {
        self.read_or_default(STATS_FILE)
    }

    pub fn save_statistics(&self, stats: &Statistics) -> anyhow::Result<()> {
        self.write(STATS_FILE, stats)
    }

    /// Reads a JSON file from the data directory, treating a missing file as
    /// the type's default (a fresh profile).
    fn read_or_default<T>(&self, name: &str) -> anyhow::Result<T>
    where
        T: Default + DeserializeOwned,
    {
        let path = self.data_dir.join(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let file =
            File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> anyhow::Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create directory {}", self.data_dir.display())
        })?;
        let path = self.data_dir.join(name);
        let file =
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)
            .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> ProfileStore {
        let dir = std::env::temp_dir().join(format!("shift48-store-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        ProfileStore::new(dir)
    }

    fn result(score: u64) -> GameResult {
        GameResult {
            score,
            difficulty: Difficulty::Medium,
            duration_secs: 120,
            moves: 50,
            highest_tile: 256,
        }
    }

    #[test]
    fn fresh_profile_reads_as_defaults() {
        let store = temp_store("fresh");

        assert_eq!(store.load_statistics().unwrap(), Statistics::default());
        assert!(store.unlocked_achievements().unwrap().is_empty());
        assert!(store.recent_scores(10).unwrap().is_empty());
    }

    #[test]
    fn game_results_fold_into_statistics() {
        let store = temp_store("fold");
        store.record_game_result(&result(100)).unwrap();
        store.record_game_result(&result(250)).unwrap();

        let stats = store.load_statistics().unwrap();
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_score, 350);
        assert_eq!(stats.moves_made, 100);
        assert_eq!(stats.time_played_secs, 240);
        assert_eq!(stats.highest_tile, 256);

        let scores = store.recent_scores(1).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 250);
    }

    #[test]
    fn achievement_unlocks_are_recorded_once() {
        let store = temp_store("unlocks");
        let first = Utc::now();
        store
            .record_achievement_unlock(AchievementId::FirstMerge, first)
            .unwrap();
        store
            .record_achievement_unlock(AchievementId::FirstMerge, Utc::now())
            .unwrap();
        store
            .record_achievement_unlock(AchievementId::Master, Utc::now())
            .unwrap();

        let unlocks = store.unlocked_achievements().unwrap();
        assert_eq!(unlocks.len(), 2);
        assert_eq!(unlocks[0].id, AchievementId::FirstMerge);
        assert_eq!(unlocks[0].timestamp, first);
    }

    #[test]
    fn statistics_survive_a_save_load_round_trip() {
        let store = temp_store("roundtrip");
        let stats = Statistics {
            games_played: 3,
            total_score: 999,
            highest_tile: 1024,
            time_played_secs: 600,
            moves_made: 321,
        };
        store.save_statistics(&stats).unwrap();
        assert_eq!(store.load_statistics().unwrap(), stats);
    }

    #[test]
    fn corrupt_files_surface_as_errors_not_panics() {
        let store = temp_store("corrupt");
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.data_dir().join(STATS_FILE), "not json").unwrap();

        assert!(store.load_statistics().is_err());
    }
}
