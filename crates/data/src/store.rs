use anyhow::Context;
use elemduel_core::{CardInstance, EnemyCard, PlayerProfile, RawCardRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROFILE_KEY: &str = "profile";
pub const COLLECTION_KEY: &str = "collection";
pub const DECK_KEY: &str = "deck";
pub const LAST_ENEMY_DECK_KEY: &str = "lastEnemyDeck";

/// Key-value persistence boundary: one JSON file per key under a root
/// directory. All records are plain structured data; there is no partial-
/// failure semantics beyond a read or write error on a single key.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// `Ok(None)` when the key has never been written.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let value =
            serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(value))
    }

    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create {}", self.root.display()))?;
        let path = self.key_path(key);
        let body = serde_json::to_string_pretty(value).context("serialize")?;
        fs::write(&path, body).with_context(|| format!("write {}", path.display()))
    }

    pub fn profile(&self) -> anyhow::Result<Option<PlayerProfile>> {
        self.read(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &PlayerProfile) -> anyhow::Result<()> {
        self.write(PROFILE_KEY, profile)
    }

    /// The collection in whatever shape it was persisted: conformant
    /// instances, bare ids, or partial records.
    pub fn raw_collection(&self) -> anyhow::Result<Option<Vec<RawCardRecord>>> {
        self.read(COLLECTION_KEY)
    }

    pub fn save_collection(&self, cards: &[CardInstance]) -> anyhow::Result<()> {
        self.write(COLLECTION_KEY, &cards)
    }

    pub fn raw_deck(&self) -> anyhow::Result<Option<Vec<RawCardRecord>>> {
        self.read(DECK_KEY)
    }

    pub fn save_deck(&self, cards: &[CardInstance]) -> anyhow::Result<()> {
        self.write(DECK_KEY, &cards)
    }

    /// Bare id arrays, as the first-run bootstrap writes them.
    pub fn save_card_ids(&self, key: &str, ids: &[String]) -> anyhow::Result<()> {
        self.write(key, &ids)
    }

    /// Write-mostly cache of the last generated opponent, ids only, so a
    /// reload can rebuild a comparable deck.
    pub fn save_last_enemy_deck(&self, enemy: &[EnemyCard]) -> anyhow::Result<()> {
        let ids: Vec<&str> = enemy.iter().map(|card| card.card_id.as_str()).collect();
        self.write(LAST_ENEMY_DECK_KEY, &ids)
    }

    pub fn last_enemy_deck(&self) -> anyhow::Result<Option<Vec<String>>> {
        self.read(LAST_ENEMY_DECK_KEY)
    }
}
