//! Content records loaded from JSON.
//!
//! A content root holds one record per file:
//!
//! ```text
//! <root>/cards/<id>.json
//! <root>/enemies/<id>.json
//! <root>/relics/<id>.json
//! ```
//!
//! Missing subdirectories are skipped. A card file that does not parse is
//! logged and skipped; every other parse or validation failure aborts the
//! load, so a combat never receives an enemy without moves.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::cards::{Card, CardLibrary, CardRecord, CardRegistry};
use crate::combat::CombatHost;
use crate::core::CardInstanceId;
use crate::enemy::{Enemy, EnemyRecord};
use crate::error::ContentError;
use crate::relics::Relic;

/// Read-only store of card, enemy and relic records.
///
/// Serves as the default [`CombatHost`]: card lookups come from the card
/// registry and summons clone enemies from their records.
#[derive(Clone, Debug, Default)]
pub struct ContentLibrary {
    cards: CardRegistry,
    enemies: FxHashMap<String, EnemyRecord>,
    relics: FxHashMap<String, Relic>,
}

impl ContentLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cards(cards: CardRegistry) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    /// Load every record under `root`.
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self, ContentError> {
        let root = root.as_ref();
        let mut library = Self::new();

        for path in json_files(&root.join("cards"))? {
            match read_json(&path) {
                Ok(record) => library.add_card(record)?,
                // Plays of an unreadable card fall back to fixed effects.
                Err(err @ ContentError::Parse { .. }) => {
                    warn!(path = %path.display(), error = %err, "skipping unparseable card record");
                }
                Err(err) => return Err(err),
            }
        }
        for path in json_files(&root.join("enemies"))? {
            library.add_enemy(read_json(&path)?)?;
        }
        for path in json_files(&root.join("relics"))? {
            library.add_relic(read_json(&path)?)?;
        }

        info!(
            root = %root.display(),
            cards = library.cards.len(),
            enemies = library.enemies.len(),
            relics = library.relics.len(),
            "content loaded"
        );
        Ok(library)
    }

    // === Registration ===

    pub fn add_card(&mut self, record: CardRecord) -> Result<(), ContentError> {
        self.cards.register(record)
    }

    /// Register an enemy after validating its move catalog.
    pub fn add_enemy(&mut self, record: EnemyRecord) -> Result<(), ContentError> {
        record.validate()?;
        if self.enemies.contains_key(&record.id) {
            return Err(ContentError::Duplicate {
                kind: "enemy",
                id: record.id,
            });
        }
        self.enemies.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn add_relic(&mut self, relic: Relic) -> Result<(), ContentError> {
        if self.relics.contains_key(&relic.id) {
            return Err(ContentError::Duplicate {
                kind: "relic",
                id: relic.id,
            });
        }
        self.relics.insert(relic.id.clone(), relic);
        Ok(())
    }

    /// Parse and register a card record from a JSON string.
    pub fn add_card_json(&mut self, json: &str) -> Result<(), ContentError> {
        self.add_card(parse_json(json, "card record")?)
    }

    /// Parse and register an enemy record from a JSON string.
    pub fn add_enemy_json(&mut self, json: &str) -> Result<(), ContentError> {
        self.add_enemy(parse_json(json, "enemy record")?)
    }

    /// Parse and register a relic from a JSON string.
    pub fn add_relic_json(&mut self, json: &str) -> Result<(), ContentError> {
        self.add_relic(parse_json(json, "relic record")?)
    }

    // === Lookup ===

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn enemy_record(&self, enemy_id: &str) -> Option<&EnemyRecord> {
        self.enemies.get(enemy_id)
    }

    /// A fresh card instance of template `card_id`.
    pub fn card(&self, card_id: &str, instance_id: CardInstanceId) -> Result<Card, ContentError> {
        Ok(self.cards.card_record(card_id)?.instantiate(instance_id))
    }

    /// A fresh enemy built from its record.
    pub fn enemy(&self, enemy_id: &str) -> Result<Enemy, ContentError> {
        self.enemies
            .get(enemy_id)
            .ok_or_else(|| ContentError::unknown("enemy", enemy_id))?
            .build()
    }

    /// A copy of relic `relic_id` with its counter reset.
    pub fn relic(&self, relic_id: &str) -> Result<Relic, ContentError> {
        let mut relic = self
            .relics
            .get(relic_id)
            .cloned()
            .ok_or_else(|| ContentError::unknown("relic", relic_id))?;
        relic.reset_counter();
        Ok(relic)
    }
}

impl CardLibrary for ContentLibrary {
    fn card_record(&self, card_id: &str) -> Result<&CardRecord, ContentError> {
        self.cards.card_record(card_id)
    }
}

impl CombatHost for ContentLibrary {
    fn spawn_enemy(&mut self, enemy_id: &str) -> Option<Enemy> {
        match self.enemy(enemy_id) {
            Ok(enemy) => Some(enemy),
            Err(err) => {
                warn!(enemy_id, error = %err, "cannot spawn enemy");
                None
            }
        }
    }
}

/// `.json` files directly inside `dir`, sorted by path. A missing directory
/// yields no files.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "content directory absent");
        return Ok(Vec::new());
    }

    let io_err = |source| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text, &path.display().to_string())
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Parse {
        what: what.to_string(),
        source,
    })
}
