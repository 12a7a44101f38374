//! Cards: template properties plus per-instance upgrade state.
//!
//! A `Card` is cloned from a shared template for every copy in a deck, and
//! each copy gets its own `CardInstanceId`. Upgrading mutates the instance,
//! never the template.

use serde::{Deserialize, Serialize};

use crate::core::CardInstanceId;

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Attack,
    Skill,
    /// Played once, then exhausted.
    Power,
    Status,
    Curse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardRarity {
    Basic,
    #[default]
    Common,
    Uncommon,
    Rare,
    Special,
}

/// What a card may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardTarget {
    #[serde(rename = "NONE")]
    NoTarget,
    #[serde(rename = "SELF")]
    SelfTarget,
    #[serde(rename = "SINGLE_ENEMY")]
    SingleEnemy,
    #[serde(rename = "ALL_ENEMIES")]
    AllEnemies,
    /// Not playable yet.
    #[serde(rename = "SINGLE_ALLY")]
    SingleAlly,
    /// Not playable yet.
    #[serde(rename = "ALL_ALLIES")]
    AllAllies,
}

impl CardTarget {
    /// Whether a target index must be supplied.
    #[must_use]
    pub fn needs_target(self) -> bool {
        self == Self::SingleEnemy
    }
}

/// Explicit upgrade overrides. `None` means "no change".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardUpgrade {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost: Option<i32>,
    pub damage: Option<i32>,
    pub block: Option<i32>,
    pub magic_number: Option<i32>,
}

/// Class restriction value meaning "any class".
pub const ANY_CLASS: &str = "ALL";

/// A card instance.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::cards::{Card, CardTarget, CardType};
///
/// let mut bash = Card::new("bash", "Bash", CardType::Attack, CardTarget::SingleEnemy, 2)
///     .with_upgradable(true);
///
/// assert!(bash.upgrade());
/// assert_eq!(bash.cost(), 1);
/// assert_eq!(bash.name(), "Bash+");
/// assert!(!bash.upgrade());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    instance_id: CardInstanceId,
    id: String,
    name: String,
    description: String,
    card_type: CardType,
    rarity: CardRarity,
    target: CardTarget,
    cost: i32,
    upgradable: bool,
    upgraded: bool,
    class_restriction: String,
    damage: i32,
    block: i32,
    magic_number: i32,
    upgrade_details: Option<CardUpgrade>,
}

impl Card {
    /// Create a card with an unassigned instance id.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        card_type: CardType,
        target: CardTarget,
        cost: i32,
    ) -> Self {
        Self {
            instance_id: CardInstanceId::UNASSIGNED,
            id: id.into(),
            name: name.into(),
            description: String::new(),
            card_type,
            rarity: CardRarity::default(),
            target,
            cost: cost.max(0),
            upgradable: true,
            upgraded: false,
            class_restriction: String::new(),
            damage: 0,
            block: 0,
            magic_number: 0,
            upgrade_details: None,
        }
    }

    // === Builders ===

    #[must_use]
    pub fn with_instance_id(mut self, instance_id: CardInstanceId) -> Self {
        self.instance_id = instance_id;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: CardRarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_upgradable(mut self, upgradable: bool) -> Self {
        self.upgradable = upgradable;
        self
    }

    /// Restrict to a class. Stored uppercase; "ALL" or empty means any.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.class_restriction = class.to_uppercase();
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: i32) -> Self {
        self.block = block;
        self
    }

    #[must_use]
    pub fn with_magic_number(mut self, magic_number: i32) -> Self {
        self.magic_number = magic_number;
        self
    }

    #[must_use]
    pub fn with_upgrade(mut self, upgrade: CardUpgrade) -> Self {
        self.upgrade_details = Some(upgrade);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn instance_id(&self) -> CardInstanceId {
        self.instance_id
    }

    pub(crate) fn set_instance_id(&mut self, instance_id: CardInstanceId) {
        self.instance_id = instance_id;
    }

    /// Template id; the join key to the card's data record.
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

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    #[must_use]
    pub fn rarity(&self) -> CardRarity {
        self.rarity
    }

    #[must_use]
    pub fn target(&self) -> CardTarget {
        self.target
    }

    #[must_use]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Set the cost, floored at 0.
    pub fn set_cost(&mut self, cost: i32) {
        self.cost = cost.max(0);
    }

    #[must_use]
    pub fn is_upgradable(&self) -> bool {
        self.upgradable
    }

    #[must_use]
    pub fn is_upgraded(&self) -> bool {
        self.upgraded
    }

    #[must_use]
    pub fn damage(&self) -> i32 {
        self.damage
    }

    #[must_use]
    pub fn block(&self) -> i32 {
        self.block
    }

    #[must_use]
    pub fn magic_number(&self) -> i32 {
        self.magic_number
    }

    #[must_use]
    pub fn class_restriction(&self) -> &str {
        &self.class_restriction
    }

    #[must_use]
    pub fn upgrade_details(&self) -> Option<&CardUpgrade> {
        self.upgrade_details.as_ref()
    }

    /// Whether a player of `class` may own this card.
    #[must_use]
    pub fn can_use(&self, class: &str) -> bool {
        self.class_restriction.is_empty()
            || self.class_restriction == ANY_CLASS
            || self.class_restriction.eq_ignore_ascii_case(class)
    }

    /// Upgrade this instance. One-shot.
    ///
    /// Returns false, changing nothing, if the card is not upgradable or is
    /// already upgraded. Explicit overrides win; without them the cost drops
    /// by one and a "+" is appended to the name.
    pub fn upgrade(&mut self) -> bool {
        if !self.upgradable || self.upgraded {
            return false;
        }
        self.upgraded = true;

        match self.upgrade_details.clone() {
            Some(details) => {
                if let Some(name) = details.name {
                    self.name = name;
                }
                if let Some(description) = details.description {
                    self.description = description;
                }
                if let Some(cost) = details.cost {
                    self.set_cost(cost);
                }
                if let Some(damage) = details.damage {
                    self.damage = damage;
                }
                if let Some(block) = details.block {
                    self.block = block;
                }
                if let Some(magic_number) = details.magic_number {
                    self.magic_number = magic_number;
                }
            }
            None => {
                self.set_cost(self.cost - 1);
                if !self.name.ends_with('+') {
                    self.name.push('+');
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strike() -> Card {
        Card::new("strike", "Strike", CardType::Attack, CardTarget::SingleEnemy, 1)
            .with_damage(6)
            .with_description("Deal 6 damage.")
    }

    #[test]
    fn test_default_upgrade() {
        let mut card = strike();
        assert!(card.upgrade());
        assert!(card.is_upgraded());
        assert_eq!(card.cost(), 0);
        assert_eq!(card.name(), "Strike+");
    }

    #[test]
    fn test_default_upgrade_keeps_single_plus() {
        let mut card = Card::new("x", "Zap+", CardType::Skill, CardTarget::NoTarget, 0);
        assert!(card.upgrade());
        assert_eq!(card.name(), "Zap+");
        assert_eq!(card.cost(), 0);
    }

    #[test]
    fn test_override_upgrade() {
        let mut card = strike().with_upgrade(CardUpgrade {
            damage: Some(9),
            description: Some("Deal 9 damage.".into()),
            ..CardUpgrade::default()
        });

        assert!(card.upgrade());
        assert_eq!(card.damage(), 9);
        assert_eq!(card.description(), "Deal 9 damage.");
        // Unspecified fields are untouched
        assert_eq!(card.name(), "Strike");
        assert_eq!(card.cost(), 1);
    }

    #[test]
    fn test_override_cost_is_clamped() {
        let mut card = strike().with_upgrade(CardUpgrade {
            cost: Some(-3),
            ..CardUpgrade::default()
        });
        assert!(card.upgrade());
        assert_eq!(card.cost(), 0);
    }

    #[test]
    fn test_not_upgradable() {
        let mut card = strike().with_upgradable(false);
        let before = card.clone();
        assert!(!card.upgrade());
        assert_eq!(card, before);
    }

    #[test]
    fn test_class_restriction() {
        let any = strike();
        assert!(any.can_use("SILENT"));

        let all = strike().with_class("all");
        assert!(all.can_use("DEFECT"));

        let ironclad = strike().with_class("ironclad");
        assert_eq!(ironclad.class_restriction(), "IRONCLAD");
        assert!(ironclad.can_use("IRONCLAD"));
        assert!(!ironclad.can_use("SILENT"));
    }

    #[test]
    fn test_target_serde_names() {
        let json = serde_json::to_string(&CardTarget::SelfTarget).unwrap();
        assert_eq!(json, r#""SELF""#);
        let t: CardTarget = serde_json::from_str(r#""ALL_ENEMIES""#).unwrap();
        assert_eq!(t, CardTarget::AllEnemies);
        let ty: CardType = serde_json::from_str(r#""POWER""#).unwrap();
        assert_eq!(ty, CardType::Power);
    }

    proptest! {
        #[test]
        fn prop_second_upgrade_fails_and_changes_nothing(cost in 0i32..5, with_override in any::<bool>()) {
            let mut card = Card::new("c", "C", CardType::Skill, CardTarget::SelfTarget, cost);
            if with_override {
                card = card.with_upgrade(CardUpgrade { block: Some(8), ..CardUpgrade::default() });
            }
            prop_assert!(card.upgrade());
            let after_first = card.clone();
            prop_assert!(!card.upgrade());
            prop_assert_eq!(card, after_first);
        }

        #[test]
        fn prop_cost_never_negative(cost in -5i32..5, set_to in -10i32..10, override_cost in proptest::option::of(-10i32..10)) {
            let mut card = Card::new("c", "C", CardType::Attack, CardTarget::SingleEnemy, cost);
            prop_assert!(card.cost() >= 0);
            if override_cost.is_some() {
                card = card.with_upgrade(CardUpgrade { cost: override_cost, ..CardUpgrade::default() });
            }
            card.upgrade();
            prop_assert!(card.cost() >= 0);
            card.set_cost(set_to);
            prop_assert!(card.cost() >= 0);
        }
    }
}
