//! Combat session: the turn state machine.
//!
//! ```text
//! NotStarted -> PlayerTurn <-> EnemyTurn -> Ended(Victory | Defeat)
//! ```
//!
//! A `Combat` owns the player, the enemy roster, the delayed-action queue
//! and the session RNG. Every operation runs to completion synchronously.
//! The orchestrator is passed in per call as a `CombatHost`.

mod delayed;
mod host;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{self, PlayOutcome, PlayRejection};
use crate::core::{CombatConfig, GameRng};
use crate::enemy::Enemy;
use crate::player::Player;

pub use delayed::{DelayedAction, DelayedFn, DelayedQueue};
pub use host::{CombatHost, CombatOutcome, CombatSummary};

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatPhase {
    NotStarted,
    PlayerTurn,
    EnemyTurn,
    Ended(CombatOutcome),
}

/// A combat session.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::cards::{Card, CardTarget, CardType};
/// use rust_deckbattler::combat::Combat;
/// use rust_deckbattler::content::ContentLibrary;
/// use rust_deckbattler::core::CombatConfig;
/// use rust_deckbattler::enemy::{Enemy, Intent};
/// use rust_deckbattler::player::{PileKind, Player, PlayerClass};
///
/// let mut player = Player::new("p", "Ironclad", PlayerClass::Ironclad, 80, 3, 5);
/// for _ in 0..5 {
///     let strike = Card::new("strike", "Strike", CardType::Attack, CardTarget::SingleEnemy, 1);
///     player.add_card(strike, PileKind::Draw);
/// }
/// let slime = Enemy::new("slime", "Slime", 12).with_move("tackle", Intent::attack(3));
///
/// let mut host = ContentLibrary::new();
/// let mut combat = Combat::new(player, vec![slime], CombatConfig::new(42));
/// combat.deal_opening_hand(true);
/// assert!(combat.start());
///
/// // No card data is loaded, so strikes fall back to 6 damage.
/// assert!(combat.play_card(0, Some(0), &mut host).is_success());
/// assert!(combat.play_card(0, Some(0), &mut host).is_success());
/// assert!(combat.are_all_enemies_defeated());
/// assert!(combat.is_combat_over());
/// ```
pub struct Combat {
    config: CombatConfig,
    rng: GameRng,
    player: Player,
    enemies: Vec<Enemy>,
    turn: u32,
    phase: CombatPhase,
    delayed: DelayedQueue,
    summary: Option<CombatSummary>,
}

impl std::fmt::Debug for Combat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combat")
            .field("turn", &self.turn)
            .field("phase", &self.phase)
            .field("player", &self.player.name())
            .field("enemies", &self.enemies.len())
            .field("delayed", &self.delayed.len())
            .finish_non_exhaustive()
    }
}

impl Combat {
    /// Create a session. The RNG is seeded from `config.seed`.
    #[must_use]
    pub fn new(player: Player, enemies: Vec<Enemy>, config: CombatConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            config,
            player,
            enemies,
            turn: 0,
            phase: CombatPhase::NotStarted,
            delayed: DelayedQueue::new(),
            summary: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Give the player back, e.g. to carry it into the next combat.
    #[must_use]
    pub fn into_player(self) -> Player {
        self.player
    }

    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    #[must_use]
    pub fn enemy(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index)
    }

    pub fn enemy_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.enemies.get_mut(index)
    }

    #[must_use]
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Add an enemy to the roster. Mid-combat additions act from the next
    /// enemy phase.
    pub fn add_enemy(&mut self, enemy: Enemy) {
        debug!(enemy = enemy.name(), "enemy joins combat");
        self.enemies.push(enemy);
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.phase == CombatPhase::PlayerTurn
    }

    /// Started and not yet ended.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, CombatPhase::PlayerTurn | CombatPhase::EnemyTurn)
    }

    #[must_use]
    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            CombatPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<&CombatSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn delayed_actions(&self) -> &DelayedQueue {
        &self.delayed
    }

    // === Win/loss ===

    /// Non-empty roster with every enemy dead.
    #[must_use]
    pub fn are_all_enemies_defeated(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|e| !e.is_alive())
    }

    #[must_use]
    pub fn is_player_defeated(&self) -> bool {
        !self.player.is_alive()
    }

    #[must_use]
    pub fn is_combat_over(&self) -> bool {
        !self.is_active() || self.are_all_enemies_defeated() || self.is_player_defeated()
    }

    // === Lifecycle ===

    /// Let the player gather its deck and draw the opening hand with the
    /// session RNG. Call before [`Combat::start`].
    pub fn deal_opening_hand(&mut self, shuffle: bool) -> usize {
        self.player.begin_combat(&mut self.rng, shuffle)
    }

    /// Enter the first player turn.
    ///
    /// Requires a non-empty roster and a session that has not started.
    /// Every enemy commits to its first intent. The player's turn-start
    /// hook does not run: the opening hand is already dealt.
    pub fn start(&mut self) -> bool {
        if self.phase != CombatPhase::NotStarted {
            warn!(phase = ?self.phase, "combat already started");
            return false;
        }
        if self.enemies.is_empty() {
            warn!("cannot start combat without enemies");
            return false;
        }

        self.turn = 1;
        self.delayed.clear();
        for enemy in &mut self.enemies {
            enemy.choose_next_move(&mut self.rng);
        }
        self.phase = CombatPhase::PlayerTurn;

        info!(enemies = self.enemies.len(), "combat started");
        true
    }

    /// Play the card at `hand_index`, aimed at enemy `target` if given.
    ///
    /// Rejected plays change nothing. After any accepted play the session
    /// checks for victory or defeat.
    pub fn play_card(
        &mut self,
        hand_index: usize,
        target: Option<usize>,
        host: &mut dyn CombatHost,
    ) -> PlayOutcome {
        if !self.is_active() {
            debug!(hand_index, "play rejected: combat not active");
            return PlayOutcome::Rejected(PlayRejection::CombatInactive);
        }
        if !self.is_player_turn() {
            debug!(hand_index, "play rejected: not the player's turn");
            return PlayOutcome::Rejected(PlayRejection::NotPlayerTurn);
        }

        let outcome = cards::play(self, hand_index, target, host);
        if let PlayOutcome::Rejected(reason) = outcome {
            debug!(hand_index, ?target, ?reason, "play rejected");
            return outcome;
        }

        self.check_for_end(host);
        outcome
    }

    /// Finish the player's turn and run the enemy phase.
    ///
    /// Order: player end-of-turn, each enemy in roster order (tick, act,
    /// tick; a player death stops the phase), player block reset, surviving
    /// enemies pick new intents, delayed actions, victory check, then the
    /// next player turn begins.
    pub fn end_player_turn(&mut self, host: &mut dyn CombatHost) -> bool {
        if !self.is_player_turn() {
            debug!(phase = ?self.phase, "end turn rejected");
            return false;
        }

        self.player.end_turn(&mut self.rng);
        self.phase = CombatPhase::EnemyTurn;
        info!(turn = self.turn, "enemy phase");

        if !self.run_enemy_turns(host) {
            return true;
        }

        self.player.reset_block();

        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.choose_next_move(&mut self.rng);
        }

        self.process_delayed_actions(host);
        if !self.is_active() {
            return true;
        }
        if self.are_all_enemies_defeated() {
            self.end(true, host);
            return true;
        }

        self.turn += 1;
        self.phase = CombatPhase::PlayerTurn;
        self.player.start_turn(&mut self.rng);
        info!(turn = self.turn, hand = self.player.hand().len(), "player turn");

        // Poison can kill at turn start.
        self.check_for_end(host);
        true
    }

    /// Each enemy present at the start of the phase acts once. Returns
    /// false if the combat ended.
    fn run_enemy_turns(&mut self, host: &mut dyn CombatHost) -> bool {
        let acting = self.enemies.len();
        for index in 0..acting {
            if !self.enemies[index].is_alive() {
                continue;
            }

            let enemy = &mut self.enemies[index];
            enemy.start_turn();
            let summon = enemy.take_turn(&mut self.player, &self.config);
            enemy.end_turn();

            if let Some(request) = summon {
                for _ in 0..request.count {
                    match host.spawn_enemy(&request.enemy_id) {
                        Some(spawned) => self.add_enemy(spawned),
                        None => warn!(enemy_id = %request.enemy_id, "summon target unavailable"),
                    }
                }
            }

            if self.is_player_defeated() {
                info!(enemy = self.enemies[index].name(), "player defeated");
                self.end(false, host);
                return false;
            }
        }
        true
    }

    fn check_for_end(&mut self, host: &mut dyn CombatHost) {
        if self.are_all_enemies_defeated() {
            self.end(true, host);
        } else if self.is_player_defeated() {
            self.end(false, host);
        }
    }

    /// Called the moment an enemy's health reaches 0.
    pub fn handle_enemy_death(&mut self, index: usize, host: &mut dyn CombatHost) {
        let Some(enemy) = self.enemies.get(index) else {
            return;
        };
        info!(enemy = enemy.name(), index, "enemy defeated");

        if self.are_all_enemies_defeated() {
            self.end(true, host);
        }
    }

    /// Terminal transition. Runs once; later calls are no-ops.
    ///
    /// Fires the player's end-of-combat relics, credits gold rolled from
    /// defeated enemies on victory, then notifies the host.
    pub fn end(&mut self, victorious: bool, host: &mut dyn CombatHost) {
        if !self.is_active() {
            return;
        }

        let outcome = if victorious {
            CombatOutcome::Victory
        } else {
            CombatOutcome::Defeat
        };
        self.phase = CombatPhase::Ended(outcome);

        self.player.end_combat(victorious, &mut self.rng);

        let gold: i32 = if victorious {
            let rng = &mut self.rng;
            self.enemies.iter().map(|e| e.roll_gold_reward(rng)).sum()
        } else {
            0
        };
        self.player.add_gold(gold);

        let summary = CombatSummary {
            outcome,
            turns: self.turn,
            gold,
        };
        info!(?outcome, turns = self.turn, gold, "combat ended");

        self.summary = Some(summary.clone());
        host.combat_ended(&summary);
    }

    // === Delayed actions ===

    /// Schedule `action` to run after `delay` turn boundaries.
    pub fn add_delayed_action<F>(&mut self, action: F, delay: i32, priority: i32, source: &str)
    where
        F: FnOnce(&mut Combat, &mut dyn CombatHost) + 'static,
    {
        debug!(delay, priority, source, "delayed action scheduled");
        self.delayed.push(Box::new(action), delay, priority, source);
    }

    /// Run every ready action, then count the rest down by one.
    ///
    /// Actions scheduled as ready by a running action run in the same pass.
    pub fn process_delayed_actions(&mut self, host: &mut dyn CombatHost) {
        while let Some(action) = self.delayed.pop_ready() {
            debug!(source = action.source(), priority = action.priority(), "running delayed action");
            action.run(self, host);
        }
        self.delayed.tick();
    }

    // === Helpers for card effects ===

    /// Draw for the player with the session RNG.
    pub fn player_draw(&mut self, count: usize) -> usize {
        self.player.draw_cards(count, &mut self.rng)
    }
}
