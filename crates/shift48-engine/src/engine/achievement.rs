use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The closed set of achievement identifiers.
///
/// Serialized by name in persistence records; parsing an unknown name fails
/// at the store boundary, never during play.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum AchievementId {
    FirstMerge,
    Apprentice,
    Journeyman,
    Adept,
    Master,
    Sprinter,
    Purist,
}

impl AchievementId {
    pub const ALL: [AchievementId; 7] = [
        AchievementId::FirstMerge,
        AchievementId::Apprentice,
        AchievementId::Journeyman,
        AchievementId::Adept,
        AchievementId::Master,
        AchievementId::Sprinter,
        AchievementId::Purist,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            AchievementId::FirstMerge => "First Merge",
            AchievementId::Apprentice => "Apprentice",
            AchievementId::Journeyman => "Journeyman",
            AchievementId::Adept => "Adept",
            AchievementId::Master => "Master",
            AchievementId::Sprinter => "Sprinter",
            AchievementId::Purist => "Purist",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            AchievementId::FirstMerge => "Build a tile of 8",
            AchievementId::Apprentice => "Build a tile of 256",
            AchievementId::Journeyman => "Build a tile of 512",
            AchievementId::Adept => "Build a tile of 1024",
            AchievementId::Master => "Build a tile of 2048",
            AchievementId::Sprinter => "Build a tile of 1024 within three minutes",
            AchievementId::Purist => "Build a tile of 2048 without undoing",
        }
    }
}

/// Session facts a predicate may observe. Building the context is the only
/// coupling between the evaluator and the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateContext {
    pub max_tile: u32,
    pub elapsed: Duration,
    pub undos_used: u32,
}

/// Named, pure comparison selected per achievement.
///
/// Predicates are data, not code: the set is statically enumerable and
/// evaluation can never run anything caller-supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    MaxTileAtLeast(u32),
    MaxTileWithin { tile: u32, limit: Duration },
    MaxTileWithoutUndo { tile: u32 },
}

impl Predicate {
    #[must_use]
    pub fn eval(self, ctx: &PredicateContext) -> bool {
        match self {
            Predicate::MaxTileAtLeast(tile) => ctx.max_tile >= tile,
            Predicate::MaxTileWithin { tile, limit } => {
                ctx.max_tile >= tile && ctx.elapsed <= limit
            }
            Predicate::MaxTileWithoutUndo { tile } => ctx.max_tile >= tile && ctx.undos_used == 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Achievement {
    id: AchievementId,
    predicate: Predicate,
    unlocked: bool,
}

impl Achievement {
    #[must_use]
    pub const fn id(&self) -> AchievementId {
        self.id
    }

    #[must_use]
    pub const fn predicate(&self) -> Predicate {
        self.predicate
    }

    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

const fn catalog_predicate(id: AchievementId) -> Predicate {
    match id {
        AchievementId::FirstMerge => Predicate::MaxTileAtLeast(8),
        AchievementId::Apprentice => Predicate::MaxTileAtLeast(256),
        AchievementId::Journeyman => Predicate::MaxTileAtLeast(512),
        AchievementId::Adept => Predicate::MaxTileAtLeast(1024),
        AchievementId::Master => Predicate::MaxTileAtLeast(2048),
        AchievementId::Sprinter => Predicate::MaxTileWithin {
            tile: 1024,
            limit: Duration::from_secs(180),
        },
        AchievementId::Purist => Predicate::MaxTileWithoutUndo { tile: 2048 },
    }
}

/// Evaluates the fixed achievement catalog against session state.
///
/// Unlocks are monotonic: an unlocked achievement is skipped by every later
/// scan, so it can neither re-lock nor re-notify, even while its predicate
/// stays true. The evaluator outlives individual sessions; persisted unlocks
/// are seeded via [`with_unlocked`](Self::with_unlocked) at program start.
#[derive(Debug, Clone)]
pub struct AchievementEvaluator {
    achievements: Vec<Achievement>,
}

impl Default for AchievementEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementEvaluator {
    #[must_use]
    pub fn new() -> Self {
        let achievements = AchievementId::ALL
            .into_iter()
            .map(|id| Achievement {
                id,
                predicate: catalog_predicate(id),
                unlocked: false,
            })
            .collect();
        Self { achievements }
    }

    /// Like [`Self::new`], but with the given achievements already unlocked
    /// (from persisted unlock records).
    #[must_use]
    pub fn with_unlocked(ids: &[AchievementId]) -> Self {
        let mut this = Self::new();
        for achievement in &mut this.achievements {
            if ids.contains(&achievement.id) {
                achievement.unlocked = true;
            }
        }
        this
    }

    /// Evaluates every still-locked achievement and unlocks those whose
    /// predicate holds. Returns the newly unlocked ids, in catalog order.
    pub fn evaluate(&mut self, ctx: &PredicateContext) -> Vec<AchievementId> {
        let mut unlocked = Vec::new();
        for achievement in &mut self.achievements {
            if !achievement.unlocked && achievement.predicate.eval(ctx) {
                achievement.unlocked = true;
                unlocked.push(achievement.id);
            }
        }
        unlocked
    }

    #[must_use]
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievements
            .iter()
            .any(|achievement| achievement.id == id && achievement.unlocked)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(max_tile: u32, elapsed_secs: u64, undos_used: u32) -> PredicateContext {
        PredicateContext {
            max_tile,
            elapsed: Duration::from_secs(elapsed_secs),
            undos_used,
        }
    }

    #[test]
    fn unlocks_fire_once_and_stay_unlocked() {
        let mut evaluator = AchievementEvaluator::new();

        let unlocked = evaluator.evaluate(&ctx(2048, 600, 2));
        assert!(unlocked.contains(&AchievementId::FirstMerge));
        assert!(unlocked.contains(&AchievementId::Master));
        assert!(evaluator.is_unlocked(AchievementId::Master));

        // Predicate still true on the next scan; nothing re-unlocks.
        assert!(evaluator.evaluate(&ctx(2048, 700, 2)).is_empty());
        assert!(evaluator.is_unlocked(AchievementId::Master));
    }

    #[test]
    fn unlock_survives_predicate_turning_false() {
        let mut evaluator = AchievementEvaluator::new();
        evaluator.evaluate(&ctx(8, 10, 0));
        assert!(evaluator.is_unlocked(AchievementId::FirstMerge));

        // Max tile dropped (cleared or undone away); the unlock remains.
        evaluator.evaluate(&ctx(4, 20, 0));
        assert!(evaluator.is_unlocked(AchievementId::FirstMerge));
    }

    #[test]
    fn sprinter_requires_the_time_window() {
        let mut evaluator = AchievementEvaluator::new();
        evaluator.evaluate(&ctx(1024, 181, 0));
        assert!(!evaluator.is_unlocked(AchievementId::Sprinter));

        let mut evaluator = AchievementEvaluator::new();
        evaluator.evaluate(&ctx(1024, 179, 0));
        assert!(evaluator.is_unlocked(AchievementId::Sprinter));
    }

    #[test]
    fn purist_requires_zero_undos() {
        let mut evaluator = AchievementEvaluator::new();
        evaluator.evaluate(&ctx(2048, 60, 1));
        assert!(!evaluator.is_unlocked(AchievementId::Purist));
        assert!(evaluator.is_unlocked(AchievementId::Master));

        let mut evaluator = AchievementEvaluator::new();
        evaluator.evaluate(&ctx(2048, 60, 0));
        assert!(evaluator.is_unlocked(AchievementId::Purist));
    }

    #[test]
    fn preseeded_unlocks_do_not_fire_again() {
        let mut evaluator = AchievementEvaluator::with_unlocked(&[AchievementId::FirstMerge]);
        assert!(evaluator.is_unlocked(AchievementId::FirstMerge));

        let unlocked = evaluator.evaluate(&ctx(8, 5, 0));
        assert!(!unlocked.contains(&AchievementId::FirstMerge));
    }

    #[test]
    fn id_round_trips_through_its_name() {
        for id in AchievementId::ALL {
            assert_eq!(id.to_string().parse::<AchievementId>().unwrap(), id);
        }
    }
}
