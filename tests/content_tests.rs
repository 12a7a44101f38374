//! Content-driven combat tests.
//!
//! Cards, enemies and relics come from a JSON content directory; the
//! `ContentLibrary` doubles as the combat host.

use std::fs;
use std::path::Path;

use rust_deckbattler::cards::{Card, CardLibrary, CardTarget, CardType};
use rust_deckbattler::character::status::{STRENGTH, VULNERABLE};
use rust_deckbattler::combat::{Combat, CombatOutcome};
use rust_deckbattler::content::ContentLibrary;
use rust_deckbattler::core::{CardInstanceId, CombatConfig, GameRng};
use rust_deckbattler::enemy::{Enemy, Intent};
use rust_deckbattler::player::{PileKind, Player, PlayerClass};

fn write(root: &Path, sub: &str, id: &str, json: &str) {
    let dir = root.join(sub);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{id}.json")), json).unwrap();
}

fn content_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "cards", "bash", r#"{
        "id": "bash", "name": "Bash", "type": "ATTACK", "rarity": "BASIC", "target": "SINGLE_ENEMY",
        "cost": 2, "class": "IRONCLAD", "damage": 8, "magic_number": 2,
        "upgrade_details": { "name": "Bash+", "damage": 10, "magic_number": 3 },
        "effects": [
            { "type": "damage", "value": 8, "upgraded_value": 10 },
            { "type": "apply_vulnerable", "value": 2, "upgraded_value": 3 }
        ]
    }"#);
    write(root, "cards", "zap", r#"{
        "id": "zap", "name": "Zap", "type": "SKILL", "target": "NONE", "cost": 1, "class": "DEFECT"
    }"#);
    write(root, "enemies", "acid_slime", r#"{
        "id": "acid_slime", "name": "Acid Slime", "max_health": 30, "min_gold": 8, "max_gold": 12,
        "moves": [
            { "id": "corrosive_spit", "intent": { "type": "attack_debuff", "value": 7, "secondary_value": 1, "effect": "weak" } }
        ]
    }"#);
    write(root, "relics", "vajra", r#"{
        "id": "vajra", "name": "Vajra", "rarity": "COMMON",
        "triggers": [{ "hook": "combat_start", "effect": { "type": "apply_status", "value": { "status": "strength", "stacks": 1 } } }]
    }"#);

    dir
}

fn assert_bash_record(library: &ContentLibrary) {
    let record = library.cards().get("bash").unwrap();
    assert_eq!(record.effects.len(), 2);
    assert_eq!(record.class_restriction, "IRONCLAD");
}

/// A content-built deck plays data-driven effects, including upgrades.
#[test]
fn test_combat_from_content() {
    let dir = content_root();
    let mut library = ContentLibrary::load_dir(dir.path()).unwrap();
    assert_bash_record(&library);

    let mut player = Player::new("player", "Ironclad", PlayerClass::Ironclad, 80, 3, 5);
    let mut bash = library.card("bash", CardInstanceId::UNASSIGNED).unwrap();
    assert!(bash.upgrade());
    assert_eq!(bash.name(), "Bash+");
    player.add_card(bash, PileKind::Draw);
    player.add_relic(library.relic("vajra").unwrap(), &mut GameRng::new(0));

    // Class-restricted cards are refused.
    let zap = library.card("zap", CardInstanceId::UNASSIGNED).unwrap();
    assert!(player.add_card(zap, PileKind::Draw).is_none());

    let slime = library.enemy("acid_slime").unwrap();
    let mut combat = Combat::new(player, vec![slime], CombatConfig::new(11));
    combat.deal_opening_hand(false);
    assert_eq!(combat.player().status(STRENGTH), 1);
    assert!(combat.start());

    let hand = combat.player().hand();
    assert_eq!(hand.len(), 1);
    assert_eq!(hand[0].card_type(), CardType::Attack);

    assert!(combat.play_card(0, Some(0), &mut library).is_success());

    let slime = combat.enemy(0).unwrap();
    assert_eq!(slime.health(), 20);
    assert_eq!(slime.status(VULNERABLE), 3);
    assert_eq!(combat.player().energy(), 1);

    // Slime spits: 7 damage and 1 weak.
    assert!(combat.end_player_turn(&mut library));
    assert_eq!(combat.player().health(), 73);
    assert_eq!(combat.player().status("weak"), 1);

    // Weak bash: 10 * 0.75 = 7.5 -> 8, vulnerable 8 * 1.5 = 12.
    assert!(combat.play_card(0, Some(0), &mut library).is_success());
    assert_eq!(combat.enemy(0).unwrap().health(), 8);
    assert!(!combat.is_combat_over());

    assert!(combat.end_player_turn(&mut library));
    assert!(combat.play_card(0, Some(0), &mut library).is_success());
    assert_eq!(combat.outcome(), Some(CombatOutcome::Victory));

    let gold = combat.summary().unwrap().gold;
    assert!((8..=12).contains(&gold));
    assert_eq!(combat.into_player().gold(), gold);
}

/// A card file that fails to parse is skipped; the rest of the content loads
/// and the skipped card plays its fixed fallback.
#[test]
fn test_unparseable_card_falls_back() {
    let dir = content_root();
    write(dir.path(), "cards", "odd", r#"{
        "id": "odd", "name": "Odd Strike", "type": "ATTACK", "rarity": "STARTER",
        "target": "SINGLE_ENEMY", "cost": 1, "effects": [{ "type": "damage", "value": 20 }]
    }"#);

    let mut library = ContentLibrary::load_dir(dir.path()).unwrap();
    assert_bash_record(&library);
    assert!(library.enemy_record("acid_slime").is_some());
    assert!(library.card_record("odd").is_err());

    let mut player = Player::new("player", "Ironclad", PlayerClass::Ironclad, 80, 3, 5);
    player.add_card(
        Card::new("odd", "Odd Strike", CardType::Attack, CardTarget::SingleEnemy, 1),
        PileKind::Hand,
    );
    let louse = Enemy::new("louse", "Red Louse", 15).with_move("bite", Intent::attack(5));
    let mut combat = Combat::new(player, vec![louse], CombatConfig::new(5));
    assert!(combat.start());
    combat.player_mut().reset_energy();

    let outcome = combat.play_card(0, Some(0), &mut library);

    assert!(outcome.report().unwrap().used_fallback);
    assert_eq!(combat.enemy(0).unwrap().health(), 9);
}
