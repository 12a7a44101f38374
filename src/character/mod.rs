//! Combatant state shared by the player and enemies.
//!
//! `Character` owns health, block, energy and the status ledger. `Player` and
//! `Enemy` embed one and deref to it, so ledger logic lives in one place.

pub mod status;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::scale_rounded;

pub use status::StatusLedger;

/// Vulnerable multiplier used when no combat configuration is at hand.
pub const DEFAULT_VULNERABLE_PERCENT: u32 = 150;

/// Health, block, energy and statuses of one combatant.
///
/// Invariants: `0 <= health <= max_health`, `block >= 0`, `energy >= 0`.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::character::Character;
///
/// let mut c = Character::new("jaw_worm", "Jaw Worm", 40, 0);
/// c.add_block(5);
///
/// // Block soaks first; the requested amount is returned.
/// assert_eq!(c.take_damage(8), 8);
/// assert_eq!(c.block(), 0);
/// assert_eq!(c.health(), 37);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    id: String,
    name: String,
    max_health: i32,
    health: i32,
    block: i32,
    base_energy: i32,
    energy: i32,
    statuses: StatusLedger,
}

impl Character {
    /// Create a character at full health with no energy.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_health: i32, base_energy: i32) -> Self {
        let max_health = max_health.max(1);
        Self {
            id: id.into(),
            name: name.into(),
            max_health,
            health: max_health,
            block: 0,
            base_energy: base_energy.max(0),
            energy: 0,
            statuses: StatusLedger::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // === Health ===

    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Set health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Set max health (at least 1), clamping current health down.
    pub fn set_max_health(&mut self, max_health: i32) {
        self.max_health = max_health.max(1);
        self.health = self.health.min(self.max_health);
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage with the default vulnerable multiplier.
    ///
    /// See [`Character::take_damage_with`].
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.take_damage_with(amount, DEFAULT_VULNERABLE_PERCENT)
    }

    /// Apply damage: vulnerable scaling, then block, then health.
    ///
    /// Returns the requested `amount`, not the health actually lost. Callers
    /// rely on this for their own kill and area bookkeeping. Non-positive
    /// amounts are ignored and return 0.
    pub fn take_damage_with(&mut self, amount: i32, vulnerable_percent: u32) -> i32 {
        if amount <= 0 {
            return 0;
        }

        let mut incoming = amount;
        if self.statuses.has(status::VULNERABLE) {
            incoming = scale_rounded(amount, vulnerable_percent);
        }

        let absorbed = self.block.min(incoming);
        self.block -= absorbed;
        let remaining = incoming - absorbed;

        let before = self.health;
        if remaining > 0 {
            self.health = (self.health - remaining).max(0);
        }

        debug!(
            character = %self.name,
            requested = amount,
            incoming,
            absorbed,
            health_lost = before - self.health,
            health = self.health,
            "damage taken"
        );

        amount
    }

    /// Heal up to max health. Dead characters cannot be healed.
    ///
    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 || !self.is_alive() {
            return 0;
        }

        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    // === Block ===

    #[must_use]
    pub fn block(&self) -> i32 {
        self.block
    }

    /// Add block; non-positive amounts are ignored. No cap.
    pub fn add_block(&mut self, amount: i32) {
        if amount > 0 {
            self.block = self.block.saturating_add(amount);
        }
    }

    pub fn reset_block(&mut self) {
        self.block = 0;
    }

    // === Energy ===

    #[must_use]
    pub fn base_energy(&self) -> i32 {
        self.base_energy
    }

    pub fn set_base_energy(&mut self, base_energy: i32) {
        self.base_energy = base_energy.max(0);
    }

    #[must_use]
    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn set_energy(&mut self, energy: i32) {
        self.energy = energy.max(0);
    }

    /// Spend energy if enough is available.
    ///
    /// Non-positive costs always succeed without spending anything.
    pub fn use_energy(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return true;
        }
        if self.energy < amount {
            return false;
        }
        self.energy -= amount;
        true
    }

    pub fn reset_energy(&mut self) {
        self.energy = self.base_energy;
    }

    // === Statuses ===

    /// Add stacks to a status. A result of zero or less removes it.
    pub fn add_status(&mut self, name: &str, stacks: i32) -> i32 {
        self.statuses.add(name, stacks)
    }

    #[must_use]
    pub fn status(&self, name: &str) -> i32 {
        self.statuses.get(name)
    }

    #[must_use]
    pub fn has_status(&self, name: &str) -> bool {
        self.statuses.has(name)
    }

    #[must_use]
    pub fn statuses(&self) -> &StatusLedger {
        &self.statuses
    }

    pub fn clear_statuses(&mut self) {
        self.statuses.clear();
    }

    // === Turn hooks ===

    /// Start-of-turn status tick: poison deals its stacks then decays by one.
    pub fn start_turn(&mut self) {
        let poison = self.statuses.get(status::POISON);
        if poison > 0 {
            self.take_damage(poison);
            self.statuses.add(status::POISON, -1);
        }
    }

    /// End-of-turn status tick: temporary strength is stripped.
    pub fn end_turn(&mut self) {
        let temporary = self.statuses.get(status::TEMPORARY_STRENGTH);
        if temporary > 0 {
            self.statuses.add(status::STRENGTH, -temporary);
            self.statuses.add(status::TEMPORARY_STRENGTH, -temporary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::status::{POISON, STRENGTH, TEMPORARY_STRENGTH, VULNERABLE};
    use super::*;
    use proptest::prelude::*;

    fn dummy() -> Character {
        Character::new("dummy", "Dummy", 50, 3)
    }

    #[test]
    fn test_new_is_full_health() {
        let c = dummy();
        assert_eq!(c.health(), 50);
        assert_eq!(c.max_health(), 50);
        assert_eq!(c.energy(), 0);
        assert!(c.is_alive());
    }

    #[test]
    fn test_block_absorbs_first() {
        let mut c = dummy();
        c.add_block(5);

        assert_eq!(c.take_damage(8), 8);
        assert_eq!(c.block(), 0);
        assert_eq!(c.health(), 47);
    }

    #[test]
    fn test_block_fully_absorbs() {
        let mut c = dummy();
        c.add_block(10);

        assert_eq!(c.take_damage(4), 4);
        assert_eq!(c.block(), 6);
        assert_eq!(c.health(), 50);
    }

    #[test]
    fn test_vulnerable_scales_and_rounds() {
        let mut c = dummy();
        c.add_status(VULNERABLE, 1);

        // 5 * 1.5 = 7.5 -> 8
        assert_eq!(c.take_damage(5), 5);
        assert_eq!(c.health(), 42);

        let mut c = dummy();
        c.add_status(VULNERABLE, 2);
        c.take_damage_with(10, 200);
        assert_eq!(c.health(), 30);
    }

    #[test]
    fn test_health_floors_at_zero() {
        let mut c = dummy();
        assert_eq!(c.take_damage(500), 500);
        assert_eq!(c.health(), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_heal() {
        let mut c = dummy();
        c.take_damage(10);

        assert_eq!(c.heal(4), 4);
        assert_eq!(c.heal(100), 6);
        assert_eq!(c.health(), 50);
        assert_eq!(c.heal(-3), 0);
    }

    #[test]
    fn test_dead_cannot_heal() {
        let mut c = dummy();
        c.take_damage(50);
        assert_eq!(c.heal(10), 0);
        assert_eq!(c.health(), 0);
    }

    #[test]
    fn test_energy() {
        let mut c = dummy();
        c.reset_energy();
        assert_eq!(c.energy(), 3);

        assert!(c.use_energy(2));
        assert!(!c.use_energy(2));
        assert_eq!(c.energy(), 1);
        assert!(c.use_energy(0));

        c.set_energy(-4);
        assert_eq!(c.energy(), 0);
    }

    #[test]
    fn test_set_health_clamps() {
        let mut c = dummy();
        c.set_health(80);
        assert_eq!(c.health(), 50);
        c.set_health(-1);
        assert_eq!(c.health(), 0);

        let mut c = dummy();
        c.set_max_health(20);
        assert_eq!(c.health(), 20);
        c.set_max_health(0);
        assert_eq!(c.max_health(), 1);
    }

    #[test]
    fn test_poison_ticks_then_decays() {
        let mut c = dummy();
        c.add_status(POISON, 3);

        c.start_turn();
        assert_eq!(c.health(), 47);
        assert_eq!(c.status(POISON), 2);

        c.start_turn();
        c.start_turn();
        assert_eq!(c.health(), 42);
        assert!(!c.has_status(POISON));
    }

    #[test]
    fn test_temporary_strength_stripped() {
        let mut c = dummy();
        c.add_status(STRENGTH, 2);
        c.add_status(TEMPORARY_STRENGTH, 3);
        c.add_status(STRENGTH, 3);

        c.end_turn();
        assert_eq!(c.status(STRENGTH), 2);
        assert!(!c.has_status(TEMPORARY_STRENGTH));
    }

    proptest! {
        #[test]
        fn prop_non_positive_damage_is_noop(amount in -100i32..=0, block in 0i32..20) {
            let mut c = dummy();
            c.add_block(block);
            prop_assert_eq!(c.take_damage(amount), 0);
            prop_assert_eq!(c.health(), 50);
            prop_assert_eq!(c.block(), block);
        }

        #[test]
        fn prop_block_then_health(block in 0i32..40, damage in 1i32..80) {
            let mut c = dummy();
            c.add_block(block);

            prop_assert_eq!(c.take_damage(damage), damage);
            prop_assert_eq!(c.block(), (block - damage).max(0));
            prop_assert_eq!(c.health(), (50 - (damage - block).max(0)).max(0));
            prop_assert!(c.health() >= 0 && c.block() >= 0);
        }
    }
}
