//! # rust-deckbattler
//!
//! A turn-based deck-battler combat engine: a player with a deck of cards
//! fights a roster of enemies that telegraph their next move.
//!
//! ## Design Principles
//!
//! 1. **Command-Driven**: Every operation (`start`, `play_card`,
//!    `end_player_turn`) runs synchronously to completion. There is no
//!    internal scheduling beyond the delayed-action queue.
//!
//! 2. **Data-Driven Cards**: A card's effects come from its record, looked
//!    up by id at play time. Cards without usable data get a fixed fallback.
//!
//! 3. **Deterministic**: One seeded `GameRng` per combat drives enemy AI,
//!    shuffles and gold rolls. Same seed and commands, same outcome.
//!
//! 4. **No Back-Links**: The orchestrator is passed into each call as a
//!    `CombatHost`; nothing stores a pointer to its owner.
//!
//! ## Modules
//!
//! - `core`: Card instance ids, RNG, combat configuration
//! - `character`: Health/block/energy/status ledger shared by all combatants
//! - `player`: The player, card piles and relics
//! - `enemy`: Enemies, intents and move selection
//! - `cards`: Cards, card records and the effect interpreter
//! - `relics`: Relics and their lifecycle triggers
//! - `combat`: The combat state machine and delayed actions
//! - `content`: JSON content loading
//! - `logging`: Tracing subscriber setup
//! - `error`: Error types

pub mod core;
pub mod character;
pub mod player;
pub mod enemy;
pub mod cards;
pub mod relics;
pub mod combat;
pub mod content;
pub mod logging;
pub mod error;

// Re-export commonly used types
pub use crate::core::{CardInstanceId, CombatConfig, FallbackEffects, GameRng};

pub use crate::character::{Character, StatusLedger};

pub use crate::player::{PileKind, Player, PlayerClass};

pub use crate::enemy::{Enemy, EnemyRecord, Intent, IntentKind, SummonRequest};

pub use crate::cards::{
    Card, CardLibrary, CardRarity, CardRecord, CardRegistry, CardTarget, CardType,
    CardUpgrade, EffectDescriptor, EffectReport, PlayOutcome, PlayRejection,
};

pub use crate::relics::{Relic, RelicEffect, RelicHook};

pub use crate::combat::{Combat, CombatHost, CombatOutcome, CombatPhase, CombatSummary};

pub use crate::content::ContentLibrary;

pub use crate::logging::{LogConfig, LoggingGuard};

pub use crate::error::{ContentError, LoggingError};
