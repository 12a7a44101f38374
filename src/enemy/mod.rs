//! Enemy combatants and their AI.
//!
//! Each enemy owns a catalog of move ids and a map from move id to a static
//! `Intent`. Every turn the enemy commits to one move, chosen uniformly at
//! random from the catalog, then executes it on its next turn.

mod intent;
mod record;

use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::character::{status, Character};
use crate::core::{CombatConfig, GameRng};
use crate::player::Player;

pub use intent::{Intent, IntentKind};
pub use record::{EnemyRecord, MoveRecord};

/// A request to add freshly spawned enemies to the combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummonRequest {
    pub enemy_id: String,
    pub count: usize,
}

/// An enemy.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::core::{CombatConfig, GameRng};
/// use rust_deckbattler::enemy::{Enemy, Intent};
/// use rust_deckbattler::player::{Player, PlayerClass};
///
/// let mut worm = Enemy::new("jaw_worm", "Jaw Worm", 40).with_move("chomp", Intent::attack(11));
/// let mut player = Player::new("p", "P", PlayerClass::Ironclad, 80, 3, 5);
/// let mut rng = GameRng::new(5);
///
/// worm.choose_next_move(&mut rng);
/// worm.take_turn(&mut player, &CombatConfig::default());
///
/// assert_eq!(player.health(), 69);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    character: Character,
    elite: bool,
    boss: bool,
    min_gold: i32,
    max_gold: i32,
    moves: Vec<String>,
    intents: FxHashMap<String, Intent>,
    intent: Intent,
}

impl Deref for Enemy {
    type Target = Character;

    fn deref(&self) -> &Character {
        &self.character
    }
}

impl DerefMut for Enemy {
    fn deref_mut(&mut self) -> &mut Character {
        &mut self.character
    }
}

impl Enemy {
    /// Create an enemy with no moves and a 10-20 gold reward.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_health: i32) -> Self {
        Self {
            character: Character::new(id, name, max_health, 0),
            elite: false,
            boss: false,
            min_gold: 10,
            max_gold: 20,
            moves: Vec::new(),
            intents: FxHashMap::default(),
            intent: Intent::default(),
        }
    }

    #[must_use]
    pub fn with_move(mut self, move_id: impl Into<String>, intent: Intent) -> Self {
        self.add_move(move_id, intent);
        self
    }

    #[must_use]
    pub fn with_elite(mut self, elite: bool) -> Self {
        self.elite = elite;
        self
    }

    #[must_use]
    pub fn with_boss(mut self, boss: bool) -> Self {
        self.boss = boss;
        self
    }

    #[must_use]
    pub fn with_gold(mut self, min: i32, max: i32) -> Self {
        self.set_gold_reward(min, max);
        self
    }

    #[must_use]
    pub fn character(&self) -> &Character {
        &self.character
    }

    #[must_use]
    pub fn is_elite(&self) -> bool {
        self.elite
    }

    #[must_use]
    pub fn is_boss(&self) -> bool {
        self.boss
    }

    // === Moves ===

    /// Register a move. Re-adding a move id replaces its intent.
    pub fn add_move(&mut self, move_id: impl Into<String>, intent: Intent) {
        let move_id = move_id.into();
        if !self.moves.contains(&move_id) {
            self.moves.push(move_id.clone());
        }
        self.intents.insert(move_id, intent);
    }

    #[must_use]
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    #[must_use]
    pub fn move_intent(&self, move_id: &str) -> Option<&Intent> {
        self.intents.get(move_id)
    }

    /// The committed next action.
    #[must_use]
    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = intent;
    }

    /// Commit to a move chosen uniformly at random.
    ///
    /// Selection ignores player and combat state.
    pub fn choose_next_move(&mut self, rng: &mut GameRng) {
        let Some(move_id) = rng.choose(&self.moves).cloned() else {
            error!(enemy = self.name(), "enemy has no moves");
            self.intent = Intent::default();
            return;
        };

        match self.intents.get(&move_id) {
            Some(intent) => {
                debug!(
                    enemy = self.name(),
                    move_id = %move_id,
                    kind = %intent.kind,
                    value = intent.value,
                    "intent chosen"
                );
                self.intent = intent.clone();
            }
            None => {
                error!(enemy = self.name(), move_id = %move_id, "move has no intent");
                self.intent = Intent::default();
            }
        }
    }

    // === Turn ===

    /// Start of this enemy's turn: block expires, then statuses tick.
    pub fn start_turn(&mut self) {
        self.character.reset_block();
        self.character.start_turn();
    }

    pub fn end_turn(&mut self) {
        self.character.end_turn();
    }

    /// Execute the committed intent against the player.
    ///
    /// Dead enemies do nothing. A summon is returned as a request for the
    /// combat to fulfil, since the enemy cannot touch the roster itself.
    pub fn take_turn(&mut self, player: &mut Player, config: &CombatConfig) -> Option<SummonRequest> {
        if !self.is_alive() {
            return None;
        }

        let intent = self.intent.clone();
        match intent.kind {
            IntentKind::Attack => {
                self.attack(player, intent.value, config);
            }
            IntentKind::AttackDefend => {
                self.attack(player, intent.value, config);
                self.add_block(intent.secondary_value);
            }
            IntentKind::Buff => {
                if let Some(effect) = &intent.effect {
                    self.add_status(effect, intent.value);
                }
                if intent.secondary_value > 0 {
                    self.add_block(intent.secondary_value);
                }
            }
            IntentKind::Defend => {
                self.add_block(intent.value);
            }
            IntentKind::Debuff => {
                if let Some(effect) = &intent.effect {
                    player.add_status(effect, intent.value);
                }
            }
            IntentKind::AttackDebuff => {
                self.attack(player, intent.value, config);
                if let Some(effect) = &intent.effect {
                    player.add_status(effect, intent.secondary_value);
                }
            }
            IntentKind::DefendDebuff => {
                self.add_block(intent.value);
                if let Some(effect) = &intent.effect {
                    player.add_status(effect, intent.secondary_value);
                }
            }
            IntentKind::Summon => {
                let Some(enemy_id) = intent.summon_type() else {
                    warn!(enemy = self.name(), "summon intent without a summon type");
                    return None;
                };
                return Some(SummonRequest {
                    enemy_id: enemy_id.to_string(),
                    count: usize::try_from(intent.value).unwrap_or(0),
                });
            }
            IntentKind::Unknown(ref raw) => {
                warn!(enemy = self.name(), intent = %raw, "unknown intent type");
            }
        }
        None
    }

    /// Hit the player, reduced while this enemy is weak.
    fn attack(&self, player: &mut Player, damage: i32, config: &CombatConfig) {
        let damage = if self.has_status(status::WEAK) {
            config.weakened(damage)
        } else {
            damage
        };
        player.take_damage_with(damage, config.vulnerable_percent);
    }

    // === Rewards ===

    #[must_use]
    pub fn gold_range(&self) -> (i32, i32) {
        (self.min_gold, self.max_gold)
    }

    pub fn set_gold_reward(&mut self, min: i32, max: i32) {
        self.min_gold = min.max(0);
        self.max_gold = max.max(0);
    }

    /// Gold dropped by this enemy: uniform in `[min, max]` once dead, 0
    /// while alive.
    pub fn roll_gold_reward(&self, rng: &mut GameRng) -> i32 {
        if self.is_alive() {
            return 0;
        }
        rng.gen_inclusive(self.min_gold, self.max_gold)
    }
}
