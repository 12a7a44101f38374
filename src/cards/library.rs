//! Card record lookup.
//!
//! `CardLibrary` is the read-only lookup the interpreter uses to find a
//! card's effect list by id. `CardRegistry` is the in-memory implementation.

use rustc_hash::FxHashMap;

use crate::error::ContentError;

use super::record::CardRecord;

/// Read-only access to card records by template id.
pub trait CardLibrary {
    /// Look up a card's record.
    fn card_record(&self, card_id: &str) -> Result<&CardRecord, ContentError>;
}

/// Registry of card records.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::cards::{CardLibrary, CardRecord, CardRegistry};
///
/// let record: CardRecord = serde_json::from_str(
///     r#"{"id": "defend", "name": "Defend", "type": "SKILL", "target": "SELF", "cost": 1}"#,
/// ).unwrap();
///
/// let mut registry = CardRegistry::new();
/// registry.register(record).unwrap();
///
/// assert_eq!(registry.card_record("defend").unwrap().name, "Defend");
/// assert!(registry.card_record("strike").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<String, CardRecord>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card record. Ids must be unique.
    pub fn register(&mut self, record: CardRecord) -> Result<(), ContentError> {
        if self.cards.contains_key(&record.id) {
            return Err(ContentError::Duplicate {
                kind: "card",
                id: record.id,
            });
        }
        self.cards.insert(record.id.clone(), record);
        Ok(())
    }

    /// Register or replace a card record.
    pub fn upsert(&mut self, record: CardRecord) {
        self.cards.insert(record.id.clone(), record);
    }

    /// Get a record by id.
    #[must_use]
    pub fn get(&self, card_id: &str) -> Option<&CardRecord> {
        self.cards.get(card_id)
    }

    /// Check if a card is registered.
    #[must_use]
    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.contains_key(card_id)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all records.
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }
}

impl CardLibrary for CardRegistry {
    fn card_record(&self, card_id: &str) -> Result<&CardRecord, ContentError> {
        self.get(card_id)
            .ok_or_else(|| ContentError::unknown("card", card_id))
    }
}
