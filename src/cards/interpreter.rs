//! Card play validation and effect resolution.
//!
//! A play is checked with [`can_play`], pays its cost, then resolves the
//! card's effect list looked up by id from the host's [`CardLibrary`]. When
//! the card has no usable data a fixed fallback effect keyed on the card's
//! type and target applies instead. Unknown descriptors are logged and
//! skipped; they never abort the remaining effects.
//!
//! [`CardLibrary`]: super::CardLibrary

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::character::status;
use crate::combat::{Combat, CombatHost};

use super::card::{Card, CardTarget, CardType};
use super::library::CardLibrary;
use super::record::{EffectDescriptor, EffectKind};

/// Why a play was refused. A refused play changes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayRejection {
    CombatInactive,
    NotPlayerTurn,
    InvalidHandIndex,
    NotEnoughEnergy,
    InvalidTarget,
}

impl std::fmt::Display for PlayRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::CombatInactive => "combat is not active",
            Self::NotPlayerTurn => "not the player's turn",
            Self::InvalidHandIndex => "no card at that hand index",
            Self::NotEnoughEnergy => "not enough energy",
            Self::InvalidTarget => "invalid target",
        };
        f.write_str(reason)
    }
}

/// Tally of one effect resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectReport {
    pub applied: usize,
    pub failed: usize,
    /// The card had no usable data and the fixed fallback ran.
    pub used_fallback: bool,
}

impl EffectReport {
    /// Some effects applied and some did not.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.applied > 0 && self.failed > 0
    }

    fn record(&mut self, ok: bool) {
        if ok {
            self.applied += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Result of [`play`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    /// Validation failed; nothing changed.
    Rejected(PlayRejection),
    /// At least one effect applied; the card left the hand.
    Played(EffectReport),
    /// Energy was spent but no effect applied; the card stays in hand.
    Fizzled(EffectReport),
}

impl PlayOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Played(_))
    }

    #[must_use]
    pub fn report(&self) -> Option<&EffectReport> {
        match self {
            Self::Rejected(_) => None,
            Self::Played(report) | Self::Fizzled(report) => Some(report),
        }
    }
}

/// Check energy and target validity for `card`.
///
/// Single-enemy cards need an index naming a living enemy. Ally-targeted
/// cards are never playable.
pub fn can_play(card: &Card, combat: &Combat, target: Option<usize>) -> Result<(), PlayRejection> {
    if combat.player().energy() < card.cost() {
        return Err(PlayRejection::NotEnoughEnergy);
    }

    match card.target() {
        CardTarget::SingleAlly | CardTarget::AllAllies => Err(PlayRejection::InvalidTarget),
        kind if kind.needs_target() => match target.and_then(|i| combat.enemy(i)) {
            Some(enemy) if enemy.is_alive() => Ok(()),
            _ => Err(PlayRejection::InvalidTarget),
        },
        _ => Ok(()),
    }
}

/// Play the card at `hand_index`.
///
/// Phase checks are the caller's job; see [`Combat::play_card`].
pub fn play(
    combat: &mut Combat,
    hand_index: usize,
    target: Option<usize>,
    host: &mut dyn CombatHost,
) -> PlayOutcome {
    let Some(card) = combat.player().hand().get(hand_index).cloned() else {
        return PlayOutcome::Rejected(PlayRejection::InvalidHandIndex);
    };
    if let Err(reason) = can_play(&card, combat, target) {
        return PlayOutcome::Rejected(reason);
    }

    combat.player_mut().use_energy(card.cost());
    debug!(card = card.id(), cost = card.cost(), ?target, "playing card");

    let report = resolve(&card, combat, target, host);
    if report.applied == 0 {
        warn!(card = card.id(), failed = report.failed, "card had no effect");
        return PlayOutcome::Fizzled(report);
    }
    if report.failed > 0 {
        warn!(card = card.id(), applied = report.applied, failed = report.failed, "card partially applied");
    }

    // Effects may have drawn or discarded, so find the card again.
    let player = combat.player_mut();
    if let Some(index) = player.hand_index_of(card.instance_id()) {
        if card.card_type() == CardType::Power {
            player.exhaust_card(index);
        } else {
            player.discard_card(index);
        }
    }

    PlayOutcome::Played(report)
}

fn resolve(card: &Card, combat: &mut Combat, target: Option<usize>, host: &mut dyn CombatHost) -> EffectReport {
    let lookup = host.card_record(card.id()).map(|record| record.effects.clone());
    let effects = match lookup {
        Ok(effects) if !effects.is_empty() => effects,
        Ok(_) => return fallback(card, combat, target, host),
        Err(err) => {
            warn!(card = card.id(), error = %err, "card data unavailable, using fallback");
            return fallback(card, combat, target, host);
        }
    };

    let mut report = EffectReport::default();
    for descriptor in &effects {
        // A kill may have ended the combat; later effects must not touch
        // the settled state.
        if !combat.is_active() {
            debug!(card = card.id(), "combat ended mid-card, skipping remaining effects");
            break;
        }
        let ok = apply(descriptor, card, combat, target, host);
        report.record(ok);
    }
    report
}

/// Which enemies a damage or debuff effect hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EnemyTargets {
    One(usize),
    All,
    Nothing,
}

fn enemy_targets(descriptor: &EffectDescriptor, card: &Card, target: Option<usize>) -> EnemyTargets {
    if descriptor.target == "all_enemies" || card.target() == CardTarget::AllEnemies {
        return EnemyTargets::All;
    }
    match (card.target(), target) {
        (CardTarget::SingleEnemy, Some(index)) => EnemyTargets::One(index),
        _ => EnemyTargets::Nothing,
    }
}

fn targets_player(descriptor: &EffectDescriptor) -> bool {
    matches!(descriptor.target.as_str(), "self" | "player")
}

fn apply(
    descriptor: &EffectDescriptor,
    card: &Card,
    combat: &mut Combat,
    target: Option<usize>,
    host: &mut dyn CombatHost,
) -> bool {
    let Some(kind) = EffectKind::parse(&descriptor.kind) else {
        warn!(card = card.id(), effect = %descriptor.kind, "unknown effect type");
        return false;
    };

    let value = descriptor.value_for(card.is_upgraded()).unwrap_or(match kind {
        _ if kind.uses_magic_number() => card.magic_number(),
        EffectKind::Damage => card.damage(),
        EffectKind::Block => card.block(),
        _ => 0,
    });

    match kind {
        EffectKind::Damage => {
            let amount = if combat.player().has_status(status::WEAK) {
                combat.config().weakened(value)
            } else {
                value
            };
            deal_damage(combat, host, enemy_targets(descriptor, card, target), amount)
        }
        EffectKind::Block => {
            combat.player_mut().add_block(value);
            true
        }
        EffectKind::Draw => {
            let count = usize::try_from(value).unwrap_or(0);
            let drawn = combat.player_draw(count);
            debug!(requested = count, drawn, "draw effect");
            true
        }
        EffectKind::ApplyVulnerable | EffectKind::ApplyWeak => {
            let name = if kind == EffectKind::ApplyVulnerable {
                status::VULNERABLE
            } else {
                status::WEAK
            };
            if targets_player(descriptor) {
                combat.player_mut().add_status(name, value);
                true
            } else {
                apply_to_enemies(combat, enemy_targets(descriptor, card, target), name, value)
            }
        }
        EffectKind::GainStrength => match descriptor.target.as_str() {
            "enemy" | "all_enemies" => {
                apply_to_enemies(combat, enemy_targets(descriptor, card, target), status::STRENGTH, value)
            }
            _ => {
                combat.player_mut().add_status(status::STRENGTH, value);
                true
            }
        },
        EffectKind::StatusEffect => {
            let Some(name) = descriptor.effect.as_deref() else {
                warn!(card = card.id(), "status_effect without an effect name");
                return false;
            };
            match descriptor.target.as_str() {
                "self" | "player" => {
                    combat.player_mut().add_status(name, value);
                    true
                }
                "enemy" => match target {
                    Some(index) => apply_to_enemies(combat, EnemyTargets::One(index), name, value),
                    None => false,
                },
                "all_enemies" => apply_to_enemies(combat, EnemyTargets::All, name, value),
                other => {
                    warn!(card = card.id(), target = other, "unknown status_effect target");
                    false
                }
            }
        }
    }
}

/// Damage the selected enemies, notifying the combat of each kill.
///
/// A single target must exist but may already be dead.
fn deal_damage(combat: &mut Combat, host: &mut dyn CombatHost, targets: EnemyTargets, amount: i32) -> bool {
    let percent = combat.config().vulnerable_percent;
    match targets {
        EnemyTargets::One(index) => {
            let Some(enemy) = combat.enemy_mut(index) else {
                return false;
            };
            let was_alive = enemy.is_alive();
            enemy.take_damage_with(amount, percent);
            if was_alive && !enemy.is_alive() {
                combat.handle_enemy_death(index, host);
            }
            true
        }
        EnemyTargets::All => {
            for index in 0..combat.enemy_count() {
                let Some(enemy) = combat.enemy_mut(index) else {
                    continue;
                };
                if !enemy.is_alive() {
                    continue;
                }
                enemy.take_damage_with(amount, percent);
                if !enemy.is_alive() {
                    combat.handle_enemy_death(index, host);
                }
            }
            true
        }
        EnemyTargets::Nothing => false,
    }
}

/// Add stacks to the selected living enemies. Missing or dead targets are
/// skipped without failing the effect.
fn apply_to_enemies(combat: &mut Combat, targets: EnemyTargets, name: &str, stacks: i32) -> bool {
    match targets {
        EnemyTargets::One(index) => {
            if let Some(enemy) = combat.enemy_mut(index).filter(|e| e.is_alive()) {
                enemy.add_status(name, stacks);
            }
        }
        EnemyTargets::All => {
            for index in 0..combat.enemy_count() {
                if let Some(enemy) = combat.enemy_mut(index).filter(|e| e.is_alive()) {
                    enemy.add_status(name, stacks);
                }
            }
        }
        EnemyTargets::Nothing => {}
    }
    true
}

/// Fixed effect for cards without data: attacks deal damage, self-targeted
/// skills grant block, anything else fails.
fn fallback(card: &Card, combat: &mut Combat, target: Option<usize>, host: &mut dyn CombatHost) -> EffectReport {
    let upgraded = card.is_upgraded();
    let fixed = combat.config().fallback;
    debug!(card = card.id(), "applying fallback effect");

    let ok = match (card.card_type(), card.target()) {
        (CardType::Attack, CardTarget::SingleEnemy) => match target {
            Some(index) => deal_damage(combat, host, EnemyTargets::One(index), fixed.damage(upgraded)),
            None => false,
        },
        (CardType::Attack, CardTarget::AllEnemies) => {
            deal_damage(combat, host, EnemyTargets::All, fixed.damage(upgraded))
        }
        (CardType::Skill, CardTarget::SelfTarget) => {
            combat.player_mut().add_block(fixed.block(upgraded));
            true
        }
        _ => false,
    };

    let mut report = EffectReport {
        used_fallback: true,
        ..EffectReport::default()
    };
    report.record(ok);
    report
}
