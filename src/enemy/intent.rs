//! Enemy intents.
//!
//! An `Intent` is the committed next action of an enemy, visible to the
//! player before it executes.

use serde::{Deserialize, Serialize};

/// Intent category.
///
/// Unrecognized strings from data are kept as `Unknown` so the enemy can
/// still be loaded; executing one logs a warning and does nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntentKind {
    Attack,
    AttackDefend,
    Buff,
    Defend,
    Debuff,
    AttackDebuff,
    DefendDebuff,
    Summon,
    Unknown(String),
}

impl IntentKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Attack => "attack",
            Self::AttackDefend => "attack_defend",
            Self::Buff => "buff",
            Self::Defend => "defend",
            Self::Debuff => "debuff",
            Self::AttackDebuff => "attack_debuff",
            Self::DefendDebuff => "defend_debuff",
            Self::Summon => "summon",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for IntentKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "attack" => Self::Attack,
            "attack_defend" => Self::AttackDefend,
            "buff" => Self::Buff,
            "defend" => Self::Defend,
            "debuff" => Self::Debuff,
            "attack_debuff" | "debuff_attack" => Self::AttackDebuff,
            "defend_debuff" => Self::DefendDebuff,
            "summon" => Self::Summon,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for IntentKind {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<IntentKind> for String {
    fn from(kind: IntentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_target() -> String {
    "player".to_string()
}

/// An enemy's next action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub kind: IntentKind,
    /// Damage, block or status stacks, depending on `kind`.
    #[serde(default)]
    pub value: i32,
    /// Block for `attack_defend`/`buff`, debuff stacks for compound debuffs.
    #[serde(default)]
    pub secondary_value: i32,
    #[serde(default = "default_target")]
    pub target: String,
    /// Status applied by buffs and debuffs.
    #[serde(default)]
    pub effect: Option<String>,
    /// Raw effect data of the move, e.g. what a summon spawns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<serde_json::Value>,
}

impl Default for Intent {
    fn default() -> Self {
        Self::new(IntentKind::Unknown(String::from("unknown")), 0)
    }
}

impl Intent {
    #[must_use]
    pub fn new(kind: impl Into<IntentKind>, value: i32) -> Self {
        Self {
            kind: kind.into(),
            value,
            secondary_value: 0,
            target: default_target(),
            effect: None,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn attack(damage: i32) -> Self {
        Self::new(IntentKind::Attack, damage)
    }

    #[must_use]
    pub fn defend(block: i32) -> Self {
        Self::new(IntentKind::Defend, block)
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary_value: i32) -> Self {
        self.secondary_value = secondary_value;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    #[must_use]
    pub fn with_raw_effect(mut self, effect: serde_json::Value) -> Self {
        self.effects.push(effect);
        self
    }

    /// Enemy id a summon spawns, read from the raw effect data.
    ///
    /// Looks for the first effect object carrying a `summon_type` (or
    /// `enemy`) string.
    #[must_use]
    pub fn summon_type(&self) -> Option<&str> {
        self.effects.iter().find_map(|effect| {
            effect
                .get("summon_type")
                .or_else(|| effect.get("enemy"))
                .and_then(serde_json::Value::as_str)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_parsing() {
        assert_eq!(IntentKind::from("attack_defend"), IntentKind::AttackDefend);
        assert_eq!(IntentKind::from("debuff_attack"), IntentKind::AttackDebuff);
        assert_eq!(IntentKind::from("sleep"), IntentKind::Unknown("sleep".into()));
        assert_eq!(IntentKind::from("sleep").as_str(), "sleep");
    }

    #[test]
    fn test_parse_intent() {
        let intent: Intent = serde_json::from_value(json!({
            "type": "buff",
            "value": 3,
            "secondary_value": 6,
            "effect": "strength"
        }))
        .unwrap();

        assert_eq!(intent.kind, IntentKind::Buff);
        assert_eq!(intent.secondary_value, 6);
        assert_eq!(intent.target, "player");
        assert_eq!(intent.effect.as_deref(), Some("strength"));
    }

    #[test]
    fn test_summon_type() {
        let intent = Intent::new(IntentKind::Summon, 2)
            .with_raw_effect(json!({ "type": "noise" }))
            .with_raw_effect(json!({ "type": "summon", "summon_type": "acid_slime_s" }));
        assert_eq!(intent.summon_type(), Some("acid_slime_s"));

        let legacy = Intent::new(IntentKind::Summon, 1).with_raw_effect(json!({ "enemy": "louse" }));
        assert_eq!(legacy.summon_type(), Some("louse"));

        assert_eq!(Intent::new(IntentKind::Summon, 1).summon_type(), None);
    }

    #[test]
    fn test_kind_serializes_as_string() {
        let json = serde_json::to_string(&Intent::attack(7)).unwrap();
        assert!(json.contains(r#""type":"attack""#));
        assert!(!json.contains("effects"));
    }
}
