//! The player combatant: card piles, gold, relics and turn hooks.
//!
//! The four piles (draw, discard, hand, exhaust) partition the deck; a card
//! instance is in at most one of them. Piles are persistent vectors so a
//! combat snapshot is a cheap clone.

use std::ops::{Deref, DerefMut};

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::character::Character;
use crate::core::{CardInstanceAllocator, CardInstanceId, GameRng};
use crate::relics::{Relic, RelicEffect, RelicHook};

/// Playable classes. Matched against card class restrictions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerClass {
    #[default]
    Ironclad,
    Silent,
    Defect,
    Watcher,
    Custom,
}

impl PlayerClass {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ironclad => "IRONCLAD",
            Self::Silent => "SILENT",
            Self::Defect => "DEFECT",
            Self::Watcher => "WATCHER",
            Self::Custom => "CUSTOM",
        }
    }
}

impl std::fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card pile identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PileKind {
    Draw,
    Discard,
    Hand,
    Exhaust,
}

/// The player.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::cards::{Card, CardTarget, CardType};
/// use rust_deckbattler::core::GameRng;
/// use rust_deckbattler::player::{PileKind, Player, PlayerClass};
///
/// let mut player = Player::new("p1", "Ironclad", PlayerClass::Ironclad, 80, 3, 5);
/// for _ in 0..10 {
///     let strike = Card::new("strike", "Strike", CardType::Attack, CardTarget::SingleEnemy, 1);
///     player.add_card(strike, PileKind::Draw);
/// }
///
/// let mut rng = GameRng::new(1);
/// player.begin_combat(&mut rng, true);
///
/// assert_eq!(player.hand().len(), 5);
/// assert_eq!(player.energy(), 3);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    character: Character,
    class: PlayerClass,
    gold: i32,
    initial_hand_size: usize,
    draw_pile: Vector<Card>,
    discard_pile: Vector<Card>,
    hand: Vector<Card>,
    exhaust_pile: Vector<Card>,
    relics: Vec<Relic>,
    instances: CardInstanceAllocator,
}

impl Deref for Player {
    type Target = Character;

    fn deref(&self) -> &Character {
        &self.character
    }
}

impl DerefMut for Player {
    fn deref_mut(&mut self) -> &mut Character {
        &mut self.character
    }
}

impl Player {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: PlayerClass,
        max_health: i32,
        base_energy: i32,
        initial_hand_size: usize,
    ) -> Self {
        Self {
            character: Character::new(id, name, max_health, base_energy),
            class,
            gold: 0,
            initial_hand_size,
            draw_pile: Vector::new(),
            discard_pile: Vector::new(),
            hand: Vector::new(),
            exhaust_pile: Vector::new(),
            relics: Vec::new(),
            instances: CardInstanceAllocator::new(),
        }
    }

    #[must_use]
    pub fn character(&self) -> &Character {
        &self.character
    }

    #[must_use]
    pub fn class(&self) -> PlayerClass {
        self.class
    }

    #[must_use]
    pub fn initial_hand_size(&self) -> usize {
        self.initial_hand_size
    }

    pub fn set_initial_hand_size(&mut self, size: usize) {
        self.initial_hand_size = size;
    }

    // === Gold ===

    #[must_use]
    pub fn gold(&self) -> i32 {
        self.gold
    }

    /// Add gold; non-positive amounts are ignored.
    pub fn add_gold(&mut self, amount: i32) {
        if amount > 0 {
            self.gold = self.gold.saturating_add(amount);
        }
    }

    /// Spend gold if enough is available.
    pub fn spend_gold(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return true;
        }
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    // === Piles ===

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    #[must_use]
    pub fn exhaust_pile(&self) -> &Vector<Card> {
        &self.exhaust_pile
    }

    #[must_use]
    pub fn pile(&self, kind: PileKind) -> &Vector<Card> {
        match kind {
            PileKind::Draw => &self.draw_pile,
            PileKind::Discard => &self.discard_pile,
            PileKind::Hand => &self.hand,
            PileKind::Exhaust => &self.exhaust_pile,
        }
    }

    fn pile_mut(&mut self, kind: PileKind) -> &mut Vector<Card> {
        match kind {
            PileKind::Draw => &mut self.draw_pile,
            PileKind::Discard => &mut self.discard_pile,
            PileKind::Hand => &mut self.hand,
            PileKind::Exhaust => &mut self.exhaust_pile,
        }
    }

    /// Total cards across all four piles.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len() + self.hand.len() + self.exhaust_pile.len()
    }

    /// Add a card to a pile.
    ///
    /// Cards without an instance id get one. Returns `None`, adding
    /// nothing, if the card is restricted to another class.
    pub fn add_card(&mut self, mut card: Card, destination: PileKind) -> Option<CardInstanceId> {
        if !card.can_use(self.class.as_str()) {
            warn!(
                card = card.name(),
                class = %self.class,
                restriction = card.class_restriction(),
                "card restricted to another class"
            );
            return None;
        }

        if !card.instance_id().is_assigned() {
            card.set_instance_id(self.instances.next_id());
        }
        let instance_id = card.instance_id();

        // A card moving to discard or exhaust leaves the hand.
        if matches!(destination, PileKind::Discard | PileKind::Exhaust) {
            if let Some(index) = self.hand_index_of(instance_id) {
                self.hand.remove(index);
            }
        }

        self.pile_mut(destination).push_back(card);
        Some(instance_id)
    }

    /// Position of a card instance in hand.
    #[must_use]
    pub fn hand_index_of(&self, instance_id: CardInstanceId) -> Option<usize> {
        self.hand.iter().position(|c| c.instance_id() == instance_id)
    }

    /// Draw up to `count` cards, never exceeding the initial hand size.
    ///
    /// Reshuffles the discard pile into the draw pile when it runs dry.
    /// Returns the number of cards drawn.
    pub fn draw_cards(&mut self, count: usize, rng: &mut GameRng) -> usize {
        let room = self.initial_hand_size.saturating_sub(self.hand.len());
        let target = count.min(room);
        if target == 0 {
            return 0;
        }

        let mut drawn = 0;
        while drawn < target {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.shuffle_discard_into_draw(rng);
            }
            match self.draw_pile.pop_back() {
                Some(card) => {
                    self.hand.push_back(card);
                    drawn += 1;
                }
                None => break,
            }
        }

        if drawn < target {
            debug!(drawn, requested = target, "ran out of cards to draw");
        }
        drawn
    }

    /// Move the card at `index` from hand to the discard pile.
    pub fn discard_card(&mut self, index: usize) -> bool {
        if index >= self.hand.len() {
            return false;
        }
        let card = self.hand.remove(index);
        self.discard_pile.push_back(card);
        true
    }

    /// Discard several hand positions. Invalid indices are skipped.
    ///
    /// Returns the number of cards discarded.
    pub fn discard_cards(&mut self, indices: &[usize]) -> usize {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        sorted.into_iter().filter(|&i| self.discard_card(i)).count()
    }

    /// Move the whole hand to the discard pile, in hand order.
    pub fn discard_hand(&mut self) -> usize {
        let count = self.hand.len();
        let hand = std::mem::take(&mut self.hand);
        self.discard_pile.append(hand);
        count
    }

    /// Move the card at `index` from hand to the exhaust pile.
    pub fn exhaust_card(&mut self, index: usize) -> bool {
        if index >= self.hand.len() {
            return false;
        }
        let card = self.hand.remove(index);
        self.exhaust_pile.push_back(card);
        true
    }

    /// Move the discard pile into the draw pile and shuffle it.
    pub fn shuffle_discard_into_draw(&mut self, rng: &mut GameRng) {
        let discard = std::mem::take(&mut self.discard_pile);
        self.draw_pile.append(discard);
        self.shuffle_draw_pile(rng);
    }

    pub fn shuffle_draw_pile(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.draw_pile.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.draw_pile = cards.into_iter().collect();
    }

    // === Relics ===

    #[must_use]
    pub fn relics(&self) -> &[Relic] {
        &self.relics
    }

    pub fn relics_mut(&mut self) -> &mut [Relic] {
        &mut self.relics
    }

    /// Add a relic and fire its `Obtain` triggers.
    pub fn add_relic(&mut self, relic: Relic, rng: &mut GameRng) {
        let effects = relic.effects_for(RelicHook::Obtain);
        self.relics.push(relic);
        for effect in effects {
            self.apply_relic_effect(effect, rng);
        }
    }

    /// Fire every relic's triggers for `hook`, in relic order.
    pub fn fire_relics(&mut self, hook: RelicHook, rng: &mut GameRng) {
        let effects: Vec<RelicEffect> = self
            .relics
            .iter()
            .flat_map(|relic| relic.effects_for(hook))
            .collect();

        for effect in effects {
            self.apply_relic_effect(effect, rng);
        }
    }

    fn apply_relic_effect(&mut self, effect: RelicEffect, rng: &mut GameRng) {
        debug!(?effect, "relic effect");
        match effect {
            RelicEffect::Heal(amount) => {
                self.heal(amount);
            }
            RelicEffect::GainBlock(amount) => self.add_block(amount),
            RelicEffect::GainEnergy(amount) => {
                let energy = self.energy().saturating_add(amount);
                self.set_energy(energy);
            }
            RelicEffect::GainGold(amount) => self.add_gold(amount),
            RelicEffect::ApplyStatus { status, stacks } => {
                self.add_status(&status, stacks);
            }
            RelicEffect::DrawCards(count) => {
                self.draw_cards(count, rng);
            }
        }
    }

    // === Combat lifecycle ===

    /// Prepare for a new combat.
    ///
    /// Gathers every card back into the draw pile, optionally shuffles,
    /// resets energy and block, draws the opening hand and fires
    /// `CombatStart` relics. Returns the number of cards drawn.
    pub fn begin_combat(&mut self, rng: &mut GameRng, shuffle: bool) -> usize {
        self.reset_energy();
        self.reset_block();

        let hand = std::mem::take(&mut self.hand);
        let discard = std::mem::take(&mut self.discard_pile);
        let exhaust = std::mem::take(&mut self.exhaust_pile);
        self.draw_pile.append(hand);
        self.draw_pile.append(discard);
        self.draw_pile.append(exhaust);

        if shuffle {
            self.shuffle_draw_pile(rng);
        }

        let drawn = self.draw_cards(self.initial_hand_size, rng);
        self.fire_relics(RelicHook::CombatStart, rng);

        info!(
            hand = self.hand.len(),
            draw_pile = self.draw_pile.len(),
            deck = self.deck_size(),
            "player ready for combat"
        );
        drawn
    }

    /// Start of a player turn after the first.
    ///
    /// Ticks statuses, resets energy and block, draws to hand size and
    /// fires `TurnStart` relics.
    pub fn start_turn(&mut self, rng: &mut GameRng) {
        self.character.start_turn();
        self.reset_energy();
        self.reset_block();
        self.draw_cards(self.initial_hand_size, rng);
        self.fire_relics(RelicHook::TurnStart, rng);
    }

    /// End of a player turn: status decay, discard hand, `TurnEnd` relics.
    pub fn end_turn(&mut self, rng: &mut GameRng) {
        self.character.end_turn();
        let discarded = self.discard_hand();
        debug!(discarded, "hand discarded at end of turn");
        self.fire_relics(RelicHook::TurnEnd, rng);
    }

    /// Combat is over: fire `CombatEnd` (and `Victory`) relics, clear block
    /// and energy.
    pub fn end_combat(&mut self, victorious: bool, rng: &mut GameRng) {
        self.fire_relics(RelicHook::CombatEnd, rng);
        if victorious {
            self.fire_relics(RelicHook::Victory, rng);
        }
        self.reset_block();
        self.set_energy(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTarget, CardType};
    use proptest::prelude::*;

    fn strike() -> Card {
        Card::new("strike", "Strike", CardType::Attack, CardTarget::SingleEnemy, 1)
    }

    fn player_with_deck(cards: usize) -> Player {
        let mut player = Player::new("p", "P", PlayerClass::Ironclad, 80, 3, 5);
        for _ in 0..cards {
            player.add_card(strike(), PileKind::Draw);
        }
        player
    }

    #[test]
    fn test_add_card_assigns_ids() {
        let player = player_with_deck(3);
        let ids: Vec<_> = player.draw_pile().iter().map(|c| c.instance_id()).collect();

        assert_eq!(ids, vec![CardInstanceId(1), CardInstanceId(2), CardInstanceId(3)]);
    }

    #[test]
    fn test_add_card_respects_class() {
        let mut player = player_with_deck(0);
        let silent_only = strike().with_class("SILENT");

        assert_eq!(player.add_card(silent_only, PileKind::Draw), None);
        assert_eq!(player.deck_size(), 0);
        assert!(player.add_card(strike().with_class("ALL"), PileKind::Hand).is_some());
    }

    #[test]
    fn test_add_to_discard_leaves_hand() {
        let mut player = player_with_deck(0);
        let id = player.add_card(strike(), PileKind::Hand).unwrap();
        let card = player.hand()[0].clone();

        player.add_card(card, PileKind::Discard);
        assert!(player.hand().is_empty());
        assert_eq!(player.discard_pile()[0].instance_id(), id);
    }

    #[test]
    fn test_draw_respects_hand_size() {
        let mut player = player_with_deck(10);
        let mut rng = GameRng::new(1);

        assert_eq!(player.draw_cards(8, &mut rng), 5);
        assert_eq!(player.hand().len(), 5);
        assert_eq!(player.draw_cards(1, &mut rng), 0);
    }

    #[test]
    fn test_draw_reshuffles_discard() {
        let mut player = player_with_deck(3);
        let mut rng = GameRng::new(1);

        player.draw_cards(3, &mut rng);
        player.discard_hand();
        assert!(player.draw_pile().is_empty());
        assert_eq!(player.discard_pile().len(), 3);

        assert_eq!(player.draw_cards(2, &mut rng), 2);
        assert_eq!(player.draw_pile().len(), 1);
        assert!(player.discard_pile().is_empty());
    }

    #[test]
    fn test_discard_and_exhaust() {
        let mut player = player_with_deck(5);
        let mut rng = GameRng::new(1);
        player.draw_cards(5, &mut rng);

        assert!(player.exhaust_card(0));
        assert!(!player.exhaust_card(9));
        assert_eq!(player.discard_cards(&[0, 2, 2, 7]), 2);
        assert_eq!(player.hand().len(), 2);
        assert_eq!(player.discard_pile().len(), 2);
        assert_eq!(player.exhaust_pile().len(), 1);
        assert_eq!(player.deck_size(), 5);
    }

    #[test]
    fn test_gold() {
        let mut player = player_with_deck(0);
        player.add_gold(10);
        player.add_gold(-5);
        assert_eq!(player.gold(), 10);

        assert!(!player.spend_gold(11));
        assert!(player.spend_gold(4));
        assert_eq!(player.gold(), 6);
    }

    #[test]
    fn test_begin_combat_gathers_piles() {
        let mut player = player_with_deck(8);
        let mut rng = GameRng::new(3);
        player.draw_cards(5, &mut rng);
        player.exhaust_card(0);
        player.discard_card(0);

        let drawn = player.begin_combat(&mut rng, true);

        assert_eq!(drawn, 5);
        assert_eq!(player.hand().len(), 5);
        assert_eq!(player.draw_pile().len(), 3);
        assert!(player.exhaust_pile().is_empty());
        assert!(player.discard_pile().is_empty());
        assert_eq!(player.energy(), 3);
    }

    #[test]
    fn test_turn_cycle() {
        let mut player = player_with_deck(12);
        let mut rng = GameRng::new(3);
        player.begin_combat(&mut rng, false);
        player.use_energy(2);
        player.add_block(7);

        player.end_turn(&mut rng);
        assert!(player.hand().is_empty());
        assert_eq!(player.discard_pile().len(), 5);

        player.start_turn(&mut rng);
        assert_eq!(player.hand().len(), 5);
        assert_eq!(player.energy(), 3);
        assert_eq!(player.block(), 0);
    }

    #[test]
    fn test_relic_hooks() {
        let mut player = player_with_deck(0);
        let mut rng = GameRng::new(3);
        player.add_relic(
            Relic::new("bag", "Bag").with_trigger(RelicHook::Obtain, RelicEffect::GainGold(25)),
            &mut rng,
        );
        player.add_relic(Relic::new("burning_blood", "Burning Blood"), &mut rng);
        assert_eq!(player.gold(), 25);

        player.take_damage(20);
        player.end_combat(false, &mut rng);
        assert_eq!(player.health(), 60);

        player.end_combat(true, &mut rng);
        assert_eq!(player.health(), 66);
        assert_eq!(player.energy(), 0);
    }

    proptest! {
        #[test]
        fn prop_draw_bounds(deck in 0usize..15, in_discard in 0usize..15, hand_size in 0usize..8, request in 0usize..20) {
            let mut player = Player::new("p", "P", PlayerClass::Custom, 50, 3, hand_size);
            for _ in 0..deck {
                player.add_card(strike(), PileKind::Draw);
            }
            for _ in 0..in_discard {
                player.add_card(strike(), PileKind::Discard);
            }
            let mut rng = GameRng::new(9);

            let drawn = player.draw_cards(request, &mut rng);

            prop_assert!(player.hand().len() <= hand_size);
            prop_assert!(drawn <= deck + in_discard);
            prop_assert_eq!(player.deck_size(), deck + in_discard);
        }
    }
}
