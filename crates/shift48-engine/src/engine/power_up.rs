use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Position, PowerUpCounts};

/// Score multiplier applied by the `ScoreMultiplier` power-up.
pub const MULTIPLIER_FACTOR: u64 = 2;
/// Number of completed moves a multiplier effect lasts.
pub const MULTIPLIER_MOVES: u32 = 5;

/// The closed set of power-up identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Undo,
    ClearTile,
    ScoreMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Undo,
        PowerUpKind::ClearTile,
        PowerUpKind::ScoreMultiplier,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PowerUpKind::Undo => "Undo",
            PowerUpKind::ClearTile => "Clear Tile",
            PowerUpKind::ScoreMultiplier => "Score x2",
        }
    }
}

/// A power-up invocation together with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpAction {
    Undo,
    ClearTile(Position),
    ScoreMultiplier,
}

impl PowerUpAction {
    #[must_use]
    pub const fn kind(self) -> PowerUpKind {
        match self {
            PowerUpAction::Undo => PowerUpKind::Undo,
            PowerUpAction::ClearTile(_) => PowerUpKind::ClearTile,
            PowerUpAction::ScoreMultiplier => PowerUpKind::ScoreMultiplier,
        }
    }
}

/// A timed score-multiplier effect, counted down in completed moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    factor: u64,
    remaining_moves: u32,
}

impl ActiveEffect {
    #[must_use]
    pub const fn factor(&self) -> u64 {
        self.factor
    }

    #[must_use]
    pub const fn remaining_moves(&self) -> u32 {
        self.remaining_moves
    }
}

/// Catalog of limited-use abilities and the currently active timed effects.
///
/// The system only does bookkeeping: availability, use counting, and
/// multiplier decay. Applying an effect to the board or the undo history is
/// the session's job, which reports back via [`consume`](Self::consume) only
/// after the effect actually landed — a failed application never costs a use.
#[derive(Debug, Clone)]
pub struct PowerUpSystem {
    uses: BTreeMap<PowerUpKind, u32>,
    effects: Vec<ActiveEffect>,
}

impl PowerUpSystem {
    #[must_use]
    pub fn new(counts: PowerUpCounts) -> Self {
        let uses = BTreeMap::from([
            (PowerUpKind::Undo, counts.undo),
            (PowerUpKind::ClearTile, counts.clear_tile),
            (PowerUpKind::ScoreMultiplier, counts.score_multiplier),
        ]);
        Self {
            uses,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn remaining_uses(&self, kind: PowerUpKind) -> u32 {
        self.uses.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_available(&self, kind: PowerUpKind) -> bool {
        self.remaining_uses(kind) > 0
    }

    /// Decrements the use count by exactly one. Returns `false` (count
    /// untouched) when already exhausted.
    pub(crate) fn consume(&mut self, kind: PowerUpKind) -> bool {
        match self.uses.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn activate_multiplier(&mut self) {
        self.effects.push(ActiveEffect {
            factor: MULTIPLIER_FACTOR,
            remaining_moves: MULTIPLIER_MOVES,
        });
    }

    /// Product of all active multiplier factors; 1 when none are active.
    #[must_use]
    pub fn multiplier(&self) -> u64 {
        self.effects.iter().map(ActiveEffect::factor).product()
    }

    #[must_use]
    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    /// Ages every active effect by one completed move and drops the expired
    /// ones. Called once per successfully applied move, after scoring.
    pub(crate) fn decay(&mut self) {
        for effect in &mut self.effects {
            effect.remaining_moves = effect.remaining_moves.saturating_sub(1);
        }
        self.effects.retain(|effect| effect.remaining_moves > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> PowerUpSystem {
        PowerUpSystem::new(PowerUpCounts {
            undo: 2,
            clear_tile: 1,
            score_multiplier: 1,
        })
    }

    #[test]
    fn consume_decrements_until_exhausted() {
        let mut system = system();

        assert!(system.consume(PowerUpKind::Undo));
        assert!(system.consume(PowerUpKind::Undo));
        assert_eq!(system.remaining_uses(PowerUpKind::Undo), 0);
        assert!(!system.consume(PowerUpKind::Undo));
        // Other kinds are unaffected.
        assert!(system.is_available(PowerUpKind::ClearTile));
    }

    #[test]
    fn multiplier_defaults_to_one() {
        assert_eq!(system().multiplier(), 1);
    }

    #[test]
    fn stacked_multipliers_compose_multiplicatively() {
        let mut system = system();
        system.activate_multiplier();
        system.activate_multiplier();

        assert_eq!(system.multiplier(), MULTIPLIER_FACTOR * MULTIPLIER_FACTOR);
    }

    #[test]
    fn effects_expire_after_their_move_budget() {
        let mut system = system();
        system.activate_multiplier();

        for _ in 0..MULTIPLIER_MOVES - 1 {
            system.decay();
            assert_eq!(system.multiplier(), MULTIPLIER_FACTOR);
        }
        system.decay();
        assert_eq!(system.multiplier(), 1);
        assert!(system.active_effects().is_empty());
    }
}
