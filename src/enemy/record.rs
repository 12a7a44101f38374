//! Enemy data records.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

use super::{Enemy, Intent};

/// One entry of an enemy's move catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: String,
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Raw effect data attached to the move (e.g. summon targets).
    #[serde(default)]
    pub effects: Vec<serde_json::Value>,
}

fn default_min_gold() -> i32 {
    10
}

fn default_max_gold() -> i32 {
    20
}

/// Enemy definition as loaded from data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyRecord {
    pub id: String,
    pub name: String,
    pub max_health: i32,
    #[serde(default)]
    pub current_health: Option<i32>,
    #[serde(default)]
    pub is_elite: bool,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default = "default_min_gold")]
    pub min_gold: i32,
    #[serde(default = "default_max_gold")]
    pub max_gold: i32,
    /// Starting statuses, e.g. `{"strength": 2}`.
    #[serde(default)]
    pub status_effects: FxHashMap<String, i32>,
    #[serde(default)]
    pub moves: Vec<MoveRecord>,
}

impl EnemyRecord {
    /// Check the record can produce a usable enemy.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.moves.is_empty() {
            return Err(ContentError::NoMoves(self.id.clone()));
        }
        if let Some(bad) = self.moves.iter().find(|m| m.intent.is_none()) {
            return Err(ContentError::MissingIntent {
                enemy_id: self.id.clone(),
                move_id: bad.id.clone(),
            });
        }
        Ok(())
    }

    /// Build a fresh enemy. Fails if the record has no moves or a move
    /// lacks an intent.
    pub fn build(&self) -> Result<Enemy, ContentError> {
        self.validate()?;

        let mut enemy = Enemy::new(self.id.clone(), self.name.clone(), self.max_health)
            .with_elite(self.is_elite)
            .with_boss(self.is_boss)
            .with_gold(self.min_gold, self.max_gold);

        if let Some(health) = self.current_health {
            enemy.set_health(health);
        }
        for (status, stacks) in &self.status_effects {
            enemy.add_status(status, *stacks);
        }

        for record in &self.moves {
            let Some(intent) = &record.intent else {
                continue;
            };
            let mut intent = intent.clone();
            intent.effects.extend(record.effects.iter().cloned());
            enemy.add_move(record.id.clone(), intent);
        }

        Ok(enemy)
    }
}
