use std::time::Duration;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    AchievementEvaluator, AchievementId, Board, ConfigError, Difficulty, Direction, GameConfig,
    GameStats, MoveResult, Notification, NotificationQueue, PowerUpAction, PowerUpSystem,
    PredicateContext, SpawnRates, SpawnSeed, UndoEntry, UndoHistory,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    MainMenu,
    Playing,
    GameOver,
}

/// Facts the session core hands outward for persistence.
///
/// The core never performs I/O; it appends events here and the frontend
/// drains them each frame and forwards them fire-and-forget to the store. A
/// failed write on that side never flows back into session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    AchievementUnlocked {
        id: AchievementId,
    },
    GameFinished {
        score: u64,
        difficulty: Difficulty,
        duration: Duration,
        moves: u64,
        highest_tile: u32,
    },
}

/// What a per-frame time update produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub expired_notifications: Vec<Notification>,
    pub time_remaining: Option<Duration>,
}

/// Read-only view of the session for rendering.
#[derive(Debug)]
pub struct SessionSnapshot<'a> {
    pub board: &'a Board,
    pub stats: &'a GameStats,
    pub state: &'a SessionState,
    pub difficulty: Difficulty,
    pub power_ups: &'a PowerUpSystem,
    pub achievements: &'a AchievementEvaluator,
    pub notifications: Vec<&'a Notification>,
    pub time_remaining: Option<Duration>,
    pub undos_remaining: u32,
}

/// Top-level session state machine.
///
/// Owns the board and every bookkeeping subsystem and runs the atomic move
/// pipeline (see the [module docs](crate::engine)). All mutation enters
/// through `apply_move`, `undo`, `use_power_up`, `tick` and the state
/// transitions; the renderer observes via [`snapshot`](Self::snapshot).
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    rng: Pcg32,
    state: SessionState,
    difficulty: Difficulty,
    spawn_rates: SpawnRates,
    board: Board,
    stats: GameStats,
    undo_history: UndoHistory,
    power_ups: PowerUpSystem,
    achievements: AchievementEvaluator,
    notifications: NotificationQueue,
    elapsed: Duration,
    time_remaining: Option<Duration>,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Creates a session in the main menu with a random spawn seed.
    ///
    /// The configuration is validated here, once; the move pipeline relies
    /// on it afterwards.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic spawns.
    pub fn with_seed(config: GameConfig, seed: SpawnSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        let difficulty = Difficulty::Medium;
        let profile = config.profile(difficulty);
        Ok(Self {
            rng: Pcg32::from_seed(seed.0),
            state: SessionState::MainMenu,
            difficulty,
            spawn_rates: profile.spawn_rates,
            board: Board::new(profile.board_size),
            stats: GameStats::new(),
            undo_history: UndoHistory::new(config.undo_budget),
            power_ups: PowerUpSystem::new(config.power_ups),
            achievements: AchievementEvaluator::new(),
            notifications: NotificationQueue::new(),
            elapsed: Duration::ZERO,
            time_remaining: None,
            events: Vec::new(),
            config,
        })
    }

    /// Marks persisted unlocks so they cannot fire again. Call once at
    /// program start, before any session begins.
    pub fn preload_achievements(&mut self, unlocked: &[AchievementId]) {
        self.achievements = AchievementEvaluator::with_unlocked(unlocked);
    }

    /// Begins a fresh game: new board with two spawned tiles, score, undo
    /// history and power-up counts reset to configured values. Achievements
    /// persist across sessions and are deliberately not reset.
    pub fn start(&mut self, difficulty: Difficulty) {
        let profile = self.config.profile(difficulty);
        self.difficulty = difficulty;
        self.spawn_rates = profile.spawn_rates;
        self.board = Board::initialize(profile.board_size, profile.spawn_rates, &mut self.rng);
        self.stats = GameStats::new();
        self.undo_history = UndoHistory::new(self.config.undo_budget);
        self.power_ups = PowerUpSystem::new(self.config.power_ups);
        self.notifications.clear();
        self.elapsed = Duration::ZERO;
        self.time_remaining = profile.time_limit_secs.map(Duration::from_secs);
        self.stats.observe_max_tile(self.board.max_tile());
        self.undo_history
            .record(UndoEntry::capture(&self.board, &self.stats));
        self.state = SessionState::Playing;
    }

    /// Runs the full move pipeline. Outside the `Playing` state, and for
    /// moves that change nothing, this is a no-op reporting `moved: false`
    /// with a zero score delta.
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        if !self.state.is_playing() {
            return MoveResult::default();
        }
        let result = self
            .board
            .make_move(direction, self.spawn_rates, &mut self.rng);
        if !result.moved {
            return result;
        }

        let multiplier = self.power_ups.multiplier();
        let adjusted = self
            .stats
            .apply_move(result.score_delta, multiplier, result.merged.len());
        self.power_ups.decay();
        self.stats.observe_max_tile(self.board.max_tile());
        self.undo_history
            .record(UndoEntry::capture(&self.board, &self.stats));
        self.scan_achievements();
        if self.board.is_game_over() {
            self.finish_game();
        }

        MoveResult {
            score_delta: adjusted,
            ..result
        }
    }

    /// Reverts the last board-changing move. Fails (returning `false`,
    /// nothing mutated) when not playing, when no prior state exists, or
    /// when the undo budget is spent. Restoration is by value.
    pub fn undo(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        match self.undo_history.undo() {
            Some(entry) => {
                self.board = entry.board;
                self.stats.restore_score(entry.score);
                true
            }
            None => false,
        }
    }

    /// Applies a power-up. The use count decrements only when the effect
    /// actually lands; every failure path returns `false` with counts and
    /// state untouched.
    pub fn use_power_up(&mut self, action: PowerUpAction) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let kind = action.kind();
        if !self.power_ups.is_available(kind) {
            return false;
        }
        let applied = match action {
            PowerUpAction::Undo => self.undo(),
            PowerUpAction::ClearTile(pos) => self.board.clear_tile(pos),
            PowerUpAction::ScoreMultiplier => {
                self.power_ups.activate_multiplier();
                true
            }
        };
        if applied {
            self.power_ups.consume(kind);
        }
        applied
    }

    /// Advances the session clock by one frame's elapsed wall-clock time.
    ///
    /// While playing this ages the timed-mode countdown (forcing a game over
    /// at zero, independent of the move pipeline) and the notification
    /// queue. Outside `Playing` the clock is frozen; only already-expired
    /// notifications are still collected.
    pub fn tick(&mut self, delta: Duration) -> TickOutcome {
        if self.state.is_playing() {
            self.elapsed += delta;
            if let Some(remaining) = self.time_remaining {
                let remaining = remaining.saturating_sub(delta);
                self.time_remaining = Some(remaining);
                if remaining.is_zero() {
                    self.finish_game();
                }
            }
        }
        TickOutcome {
            expired_notifications: self.notifications.expire(self.elapsed),
            time_remaining: self.time_remaining,
        }
    }

    /// GameOver → MainMenu. No-op in any other state; a new game then
    /// starts via [`start`](Self::start).
    pub fn restart(&mut self) {
        if self.state.is_game_over() {
            self.state = SessionState::MainMenu;
        }
    }

    /// Hands out all pending persistence events, emptying the queue.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            board: &self.board,
            stats: &self.stats,
            state: &self.state,
            difficulty: self.difficulty,
            power_ups: &self.power_ups,
            achievements: &self.achievements,
            notifications: self.notifications.pending().collect(),
            time_remaining: self.time_remaining,
            undos_remaining: self.undo_history.remaining(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn power_ups(&self) -> &PowerUpSystem {
        &self.power_ups
    }

    #[must_use]
    pub fn achievements(&self) -> &AchievementEvaluator {
        &self.achievements
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn time_remaining(&self) -> Option<Duration> {
        self.time_remaining
    }

    #[must_use]
    pub fn undos_used(&self) -> u32 {
        self.undo_history.used()
    }

    fn scan_achievements(&mut self) {
        let ctx = PredicateContext {
            max_tile: self.board.max_tile(),
            elapsed: self.elapsed,
            undos_used: self.undo_history.used(),
        };
        for id in self.achievements.evaluate(&ctx) {
            self.notifications
                .push(format!("Achievement unlocked: {}", id.title()), self.elapsed);
            self.events.push(SessionEvent::AchievementUnlocked { id });
        }
    }

    fn finish_game(&mut self) {
        self.state = SessionState::GameOver;
        self.events.push(SessionEvent::GameFinished {
            score: self.stats.score(),
            difficulty: self.difficulty,
            duration: self.elapsed,
            moves: self.stats.moves(),
            highest_tile: self.stats.highest_tile(),
        });
    }
}
