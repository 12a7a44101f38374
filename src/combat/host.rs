//! The orchestrator seen from inside a combat.
//!
//! A combat never stores a link to whatever drives it. Operations that need
//! the outside world take a `&mut dyn CombatHost` for the duration of the
//! call instead.

use serde::{Deserialize, Serialize};

use crate::cards::CardLibrary;
use crate::enemy::Enemy;

/// How a combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// Result of a finished combat, reported to the host once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSummary {
    pub outcome: CombatOutcome,
    /// Turn counter when the combat ended.
    pub turns: u32,
    /// Gold credited to the player.
    pub gold: i32,
}

impl CombatSummary {
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.outcome == CombatOutcome::Victory
    }
}

/// Services a combat consumes from its orchestrator.
pub trait CombatHost: CardLibrary {
    /// A fresh enemy instance for a summon, or `None` if the id is unknown.
    fn spawn_enemy(&mut self, enemy_id: &str) -> Option<Enemy>;

    /// Called exactly once when the combat ends.
    fn combat_ended(&mut self, summary: &CombatSummary) {
        let _ = summary;
    }
}
