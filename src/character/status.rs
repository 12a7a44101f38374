//! Status effect ledger.
//!
//! A `StatusLedger` maps a status name ("vulnerable", "poison", ...) to a
//! stack count. Counts accumulate on `add`; an entry whose count drops to
//! zero or below is removed, so the ledger never stores a zero stack.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Incoming damage is multiplied while present.
pub const VULNERABLE: &str = "vulnerable";
/// Outgoing damage is reduced while present.
pub const WEAK: &str = "weak";
pub const STRENGTH: &str = "strength";
/// Strength that is stripped again at end of turn.
pub const TEMPORARY_STRENGTH: &str = "temporary_strength";
/// Deals its stack count as damage at turn start, then decays by one.
pub const POISON: &str = "poison";

/// Named, stacking status effects of one character.
///
/// ## Example
///
/// ```
/// use rust_deckbattler::character::StatusLedger;
///
/// let mut ledger = StatusLedger::new();
/// ledger.add("weak", 2);
/// ledger.add("weak", -2);
///
/// assert!(!ledger.has("weak"));
/// assert!(ledger.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLedger {
    stacks: FxHashMap<String, i32>,
}

impl StatusLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `stacks` (possibly negative) to a status.
    ///
    /// Returns the resulting count; 0 means the entry is gone.
    pub fn add(&mut self, name: &str, stacks: i32) -> i32 {
        if stacks == 0 {
            return self.get(name);
        }

        let count = self.get(name).saturating_add(stacks);
        if count <= 0 {
            self.stacks.remove(name);
            0
        } else {
            self.stacks.insert(name.to_string(), count);
            count
        }
    }

    /// Stack count for a status, 0 if absent.
    #[must_use]
    pub fn get(&self, name: &str) -> i32 {
        self.stacks.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.stacks.contains_key(name)
    }

    /// Remove a status entirely, returning its previous count.
    pub fn remove(&mut self, name: &str) -> i32 {
        self.stacks.remove(name).unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }

    /// Iterate over `(name, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.stacks.iter().map(|(name, count)| (name.as_str(), *count))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
