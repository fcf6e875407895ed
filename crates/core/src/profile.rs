use crate::RawCardRecord;
use serde::{Deserialize, Serialize};

/// Player identity and progression. Field names follow the persisted JSON
/// vocabulary.
///
/// Older saves embedded the deck and collection directly in the profile as
/// `deckCards` / `collectionCards`; those containers are kept here so the
/// migration pass can normalize them in place.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlayerProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: i64,
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default, rename = "gamesPlayed")]
    pub games_played: u32,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<u64>,
    #[serde(default, rename = "deckCards", skip_serializing_if = "Option::is_none")]
    pub deck_cards: Option<Vec<RawCardRecord>>,
    #[serde(
        default,
        rename = "collectionCards",
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_cards: Option<Vec<RawCardRecord>>,
}

impl PlayerProfile {
    pub fn new(name: &str, created_at: u64) -> Self {
        Self {
            name: name.to_string(),
            level: 1,
            created_at: Some(created_at),
            ..Self::default()
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.created_at.is_some()
    }
}
