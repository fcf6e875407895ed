use crate::RngState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Air, Element::Earth];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    /// One tier up, clamped at the top.
    pub fn next_tier(self) -> Rarity {
        match self {
            Rarity::Common => Rarity::Uncommon,
            Rarity::Uncommon => Rarity::Rare,
            Rarity::Rare => Rarity::Epic,
            Rarity::Epic => Rarity::Legendary,
            Rarity::Legendary | Rarity::Mythic => Rarity::Mythic,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Attack,
    Defense,
    Special,
}

impl CardType {
    pub const ALL: [CardType; 3] = [CardType::Attack, CardType::Defense, CardType::Special];
}

/// Static card metadata. Immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDefinition {
    pub id: String,
    pub name: String,
    pub element: Element,
    pub rarity: Rarity,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(rename = "basePower")]
    pub base_power: i64,
}

/// Starter cards carry an `S`-prefixed id and are reserved for new accounts.
pub const STARTER_ID_PREFIX: char = 'S';

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<CardDefinition>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(cards: Vec<CardDefinition>) -> Self {
        let by_id = cards
            .iter()
            .enumerate()
            .map(|(idx, card)| (card.id.clone(), idx))
            .collect();
        Self { cards, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.by_id.get(id).map(|idx| &self.cards[*idx])
    }

    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_starter_id(id: &str) -> bool {
        id.starts_with(STARTER_ID_PREFIX)
    }

    /// `n` distinct ids from the starter band, falling back to the whole
    /// catalog when the band is smaller than `n`. Returns fewer than `n` ids
    /// only when the catalog itself is smaller than `n`.
    pub fn random_starter_ids(&self, n: usize, rng: &mut RngState) -> Vec<String> {
        let mut pool: Vec<&CardDefinition> = self
            .cards
            .iter()
            .filter(|card| Self::is_starter_id(&card.id))
            .collect();
        if pool.len() < n {
            pool = self.cards.iter().collect();
        }
        rng.shuffle(&mut pool);
        pool.into_iter()
            .take(n)
            .map(|card| card.id.clone())
            .collect()
    }
}
