//! Card data records.
//!
//! A `CardRecord` is the externally loaded definition of a card template.
//! The interpreter consults a card's record by id at play time for its
//! ordered effect list; the in-memory `Card` never bakes those effects in.

use serde::{Deserialize, Serialize};

use crate::core::CardInstanceId;

use super::card::{Card, CardRarity, CardTarget, CardType, CardUpgrade};

/// Known effect descriptor types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Damage,
    Block,
    ApplyVulnerable,
    ApplyWeak,
    GainStrength,
    Draw,
    /// Named status with an explicit target.
    StatusEffect,
}

impl EffectKind {
    /// Parse a descriptor `type` string. Unknown strings yield `None`.
    #[must_use]
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "damage" => Some(Self::Damage),
            "block" => Some(Self::Block),
            "apply_vulnerable" => Some(Self::ApplyVulnerable),
            "apply_weak" => Some(Self::ApplyWeak),
            "gain_strength" => Some(Self::GainStrength),
            "draw" => Some(Self::Draw),
            "status_effect" => Some(Self::StatusEffect),
            _ => None,
        }
    }

    /// Status-apply kinds fall back to the card's magic number.
    #[must_use]
    pub fn uses_magic_number(self) -> bool {
        matches!(
            self,
            Self::ApplyVulnerable | Self::ApplyWeak | Self::GainStrength | Self::StatusEffect
        )
    }
}

/// One entry of a card's effect list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    /// Raw type string; unknown values are reported at play time.
    #[serde(rename = "type")]
    pub kind: String,
    /// "self", "player", "enemy" or "all_enemies". Empty means "use the
    /// card's own target category".
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub upgraded_value: Option<i32>,
    /// Status name for `status_effect`.
    #[serde(default)]
    pub effect: Option<String>,
}

impl EffectDescriptor {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_upgraded_value(mut self, value: i32) -> Self {
        self.upgraded_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    /// Value this descriptor supplies for the given upgrade state.
    #[must_use]
    pub fn value_for(&self, upgraded: bool) -> Option<i32> {
        match (upgraded, self.upgraded_value) {
            (true, Some(v)) => Some(v),
            _ => self.value,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Card definition as loaded from data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default)]
    pub rarity: CardRarity,
    pub target: CardTarget,
    #[serde(default)]
    pub cost: i32,
    #[serde(default = "default_true")]
    pub upgradable: bool,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub block: i32,
    #[serde(default)]
    pub magic_number: i32,
    #[serde(default, rename = "class")]
    pub class_restriction: String,
    #[serde(default)]
    pub upgrade_details: Option<CardUpgrade>,
    #[serde(default)]
    pub effects: Vec<EffectDescriptor>,
}

impl CardRecord {
    /// Build a fresh, un-upgraded card instance from this record.
    #[must_use]
    pub fn instantiate(&self, instance_id: CardInstanceId) -> Card {
        let mut card = Card::new(
            self.id.clone(),
            self.name.clone(),
            self.card_type,
            self.target,
            self.cost,
        )
        .with_instance_id(instance_id)
        .with_description(self.description.clone())
        .with_rarity(self.rarity)
        .with_upgradable(self.upgradable)
        .with_class(&self.class_restriction)
        .with_damage(self.damage)
        .with_block(self.block)
        .with_magic_number(self.magic_number);

        if let Some(details) = &self.upgrade_details {
            card = card.with_upgrade(details.clone());
        }
        card
    }
}
