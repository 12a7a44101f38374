//! Relics and their triggers.
//!
//! A relic reacts to a closed set of lifecycle hooks (`RelicHook`) with a
//! closed set of effects (`RelicEffect`). Triggers normally come from the
//! relic's data record; relics whose behavior predates data fall back to a
//! built-in lookup table.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelicRarity {
    Starter,
    #[default]
    Common,
    Uncommon,
    Rare,
    Boss,
    Shop,
    Event,
}

/// Lifecycle points a relic can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelicHook {
    /// The relic was added to the player.
    Obtain,
    CombatStart,
    TurnStart,
    TurnEnd,
    /// Combat ended, won or lost.
    CombatEnd,
    /// Combat ended in victory. Fires after `CombatEnd`.
    Victory,
}

/// What a relic does when triggered. Always applied to its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RelicEffect {
    Heal(i32),
    GainBlock(i32),
    GainEnergy(i32),
    GainGold(i32),
    ApplyStatus { status: String, stacks: i32 },
    DrawCards(usize),
}

/// A (hook, effect) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicTrigger {
    pub hook: RelicHook,
    pub effect: RelicEffect,
}

impl RelicTrigger {
    #[must_use]
    pub fn new(hook: RelicHook, effect: RelicEffect) -> Self {
        Self { hook, effect }
    }
}

type Triggers = SmallVec<[RelicTrigger; 2]>;

/// Triggers for relics whose behavior is not described by their data.
// TODO: move the burning_blood victory heal into its relic record and drop this table.
fn builtin_triggers(relic_id: &str) -> Triggers {
    match relic_id {
        "burning_blood" => smallvec![RelicTrigger::new(RelicHook::Victory, RelicEffect::Heal(6))],
        _ => SmallVec::new(),
    }
}

/// A relic owned by the player.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::relics::{Relic, RelicEffect, RelicHook};
///
/// let blood = Relic::new("burning_blood", "Burning Blood");
///
/// assert_eq!(blood.effects_for(RelicHook::Victory).as_slice(), &[RelicEffect::Heal(6)]);
/// assert!(blood.effects_for(RelicHook::TurnStart).is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub flavor_text: String,
    #[serde(default)]
    pub rarity: RelicRarity,
    #[serde(default)]
    counter: i32,
    #[serde(default)]
    triggers: Triggers,
}

impl Relic {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            flavor_text: String::new(),
            rarity: RelicRarity::default(),
            counter: 0,
            triggers: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: RelicRarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, hook: RelicHook, effect: RelicEffect) -> Self {
        self.triggers.push(RelicTrigger::new(hook, effect));
        self
    }

    /// Triggers from data, or the built-in table when data has none.
    #[must_use]
    pub fn triggers(&self) -> Triggers {
        if self.triggers.is_empty() {
            builtin_triggers(&self.id)
        } else {
            self.triggers.clone()
        }
    }

    /// Effects to apply for `hook`, in declaration order.
    #[must_use]
    pub fn effects_for(&self, hook: RelicHook) -> SmallVec<[RelicEffect; 2]> {
        self.triggers()
            .into_iter()
            .filter(|t| t.hook == hook)
            .map(|t| t.effect)
            .collect()
    }

    #[must_use]
    pub fn counter(&self) -> i32 {
        self.counter
    }

    pub fn set_counter(&mut self, counter: i32) {
        self.counter = counter;
    }

    /// Add to the counter, returning the new value.
    pub fn increment_counter(&mut self, amount: i32) -> i32 {
        self.counter += amount;
        self.counter
    }

    pub fn reset_counter(&mut self) {
        self.counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_only_when_data_is_silent() {
        let blood = Relic::new("burning_blood", "Burning Blood");
        assert_eq!(blood.triggers().len(), 1);

        let custom = Relic::new("burning_blood", "Burning Blood")
            .with_trigger(RelicHook::Victory, RelicEffect::Heal(12));
        assert_eq!(custom.effects_for(RelicHook::Victory).as_slice(), &[RelicEffect::Heal(12)]);
    }

    #[test]
    fn test_effects_for_filters_by_hook() {
        let relic = Relic::new("anchor", "Anchor")
            .with_trigger(RelicHook::CombatStart, RelicEffect::GainBlock(10))
            .with_trigger(RelicHook::TurnStart, RelicEffect::DrawCards(1))
            .with_trigger(RelicHook::CombatStart, RelicEffect::GainEnergy(1));

        let start = relic.effects_for(RelicHook::CombatStart);
        assert_eq!(start.as_slice(), &[RelicEffect::GainBlock(10), RelicEffect::GainEnergy(1)]);
        assert!(relic.effects_for(RelicHook::Victory).is_empty());
    }

    #[test]
    fn test_counter() {
        let mut relic = Relic::new("pen_nib", "Pen Nib");
        assert_eq!(relic.increment_counter(3), 3);
        assert_eq!(relic.increment_counter(2), 5);
        relic.reset_counter();
        assert_eq!(relic.counter(), 0);
        relic.set_counter(9);
        assert_eq!(relic.counter(), 9);
    }

    #[test]
    fn test_parse_record() {
        let json = r#"{
            "id": "vajra",
            "name": "Vajra",
            "rarity": "COMMON",
            "triggers": [
                { "hook": "combat_start", "effect": { "type": "apply_status", "value": { "status": "strength", "stacks": 1 } } },
                { "hook": "victory", "effect": { "type": "gain_gold", "value": 5 } }
            ]
        }"#;
        let relic: Relic = serde_json::from_str(json).unwrap();

        assert_eq!(relic.rarity, RelicRarity::Common);
        assert_eq!(
            relic.effects_for(RelicHook::CombatStart).as_slice(),
            &[RelicEffect::ApplyStatus { status: "strength".into(), stacks: 1 }]
        );
        assert_eq!(relic.effects_for(RelicHook::Victory).as_slice(), &[RelicEffect::GainGold(5)]);
    }
}
