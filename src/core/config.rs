//! Combat configuration.
//!
//! Orchestrators configure a combat session at creation time by providing a
//! `CombatConfig`:
//! - `seed`: the single RNG seed for the session
//! - `fallback`: the minimal effects used when a card's data record is missing
//! - damage multipliers for the "vulnerable" and "weak" statuses
//!
//! All values have defaults matching the standard ruleset, so most callers
//! only set the seed.

use serde::{Deserialize, Serialize};

/// Hardcoded card effects used when a card's data record cannot be loaded.
///
/// Keyed on (card type, target): attacks deal damage, self-targeted skills
/// grant block. Anything else has no fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackEffects {
    /// Damage dealt by an attack without data.
    pub attack_damage: i32,
    /// Damage dealt by an upgraded attack without data.
    pub upgraded_attack_damage: i32,
    /// Block granted by a self-targeted skill without data.
    pub skill_block: i32,
    /// Block granted by an upgraded self-targeted skill without data.
    pub upgraded_skill_block: i32,
}

impl Default for FallbackEffects {
    fn default() -> Self {
        Self {
            attack_damage: 6,
            upgraded_attack_damage: 9,
            skill_block: 5,
            upgraded_skill_block: 8,
        }
    }
}

impl FallbackEffects {
    /// Damage for an attack, taking the upgrade state into account.
    #[must_use]
    pub fn damage(&self, upgraded: bool) -> i32 {
        if upgraded {
            self.upgraded_attack_damage
        } else {
            self.attack_damage
        }
    }

    /// Block for a skill, taking the upgrade state into account.
    #[must_use]
    pub fn block(&self, upgraded: bool) -> i32 {
        if upgraded {
            self.upgraded_skill_block
        } else {
            self.skill_block
        }
    }
}

/// Complete combat configuration.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::core::CombatConfig;
///
/// let config = CombatConfig::new(7).with_weak_percent(50);
///
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.weakened(10), 5);
/// assert_eq!(config.vulnerable(10), 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Seed for the session's RNG.
    pub seed: u64,

    /// Effects used when a card has no data record.
    #[serde(default)]
    pub fallback: FallbackEffects,

    /// Incoming damage multiplier (percent) while "vulnerable".
    #[serde(default = "default_vulnerable_percent")]
    pub vulnerable_percent: u32,

    /// Outgoing damage multiplier (percent) while "weak".
    #[serde(default = "default_weak_percent")]
    pub weak_percent: u32,
}

fn default_vulnerable_percent() -> u32 {
    150
}

fn default_weak_percent() -> u32 {
    75
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

impl CombatConfig {
    /// Create a configuration with default rules and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            fallback: FallbackEffects::default(),
            vulnerable_percent: default_vulnerable_percent(),
            weak_percent: default_weak_percent(),
        }
    }

    /// Set the fallback effects.
    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackEffects) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set the vulnerable multiplier, in percent.
    #[must_use]
    pub fn with_vulnerable_percent(mut self, percent: u32) -> Self {
        self.vulnerable_percent = percent;
        self
    }

    /// Set the weak multiplier, in percent.
    #[must_use]
    pub fn with_weak_percent(mut self, percent: u32) -> Self {
        self.weak_percent = percent;
        self
    }

    /// Scale damage taken by a vulnerable target.
    #[must_use]
    pub fn vulnerable(&self, amount: i32) -> i32 {
        scale_rounded(amount, self.vulnerable_percent)
    }

    /// Scale damage dealt by a weakened attacker.
    #[must_use]
    pub fn weakened(&self, amount: i32) -> i32 {
        scale_rounded(amount, self.weak_percent)
    }
}

/// Multiply `amount` by `percent / 100`, rounding halves away from zero.
///
/// `scale_rounded(10, 75) == 8`, `scale_rounded(5, 150) == 8`.
#[must_use]
pub fn scale_rounded(amount: i32, percent: u32) -> i32 {
    let scaled = i64::from(amount) * i64::from(percent);
    let rounded = if scaled >= 0 {
        (scaled + 50) / 100
    } else {
        (scaled - 50) / 100
    };
    rounded.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
