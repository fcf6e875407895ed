use crate::{CardFactory, CardInstance, InstanceOverrides, RngState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A finalized deck always holds exactly this many cards.
pub const DECK_SIZE: usize = 9;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck has {have} cards, needs {DECK_SIZE}")]
    WrongSize { have: usize },
    #[error("card {0} is already in the deck")]
    DuplicateCard(String),
    #[error("deck is full ({DECK_SIZE}/{DECK_SIZE})")]
    DeckFull,
}

/// Ordered selection of card instances, size-bounded while editing and
/// exactly [`DECK_SIZE`] once finalized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    pub cards: Vec<CardInstance>,
}

impl Deck {
    pub fn new(cards: Vec<CardInstance>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == DECK_SIZE
    }

    pub fn contains_card(&self, card_id: &str) -> bool {
        self.cards.iter().any(|card| card.card_id == card_id)
    }

    pub fn add(&mut self, card: CardInstance) -> Result<(), DeckError> {
        if self.cards.len() >= DECK_SIZE {
            return Err(DeckError::DeckFull);
        }
        if self.contains_card(&card.card_id) {
            return Err(DeckError::DuplicateCard(card.card_id));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn remove(&mut self, uid: &str) -> Option<CardInstance> {
        let idx = self.cards.iter().position(|card| card.uid == uid)?;
        Some(self.cards.remove(idx))
    }

    /// The deck as sent to the balancer: exactly [`DECK_SIZE`] cards.
    pub fn finalize(&self) -> Result<&[CardInstance], DeckError> {
        if !self.is_complete() {
            return Err(DeckError::WrongSize {
                have: self.cards.len(),
            });
        }
        Ok(&self.cards)
    }

    /// Auto-fills a deck with distinct random catalog cards at level 1.
    /// Shorter than [`DECK_SIZE`] only when the catalog itself is.
    pub fn auto_fill(factory: &CardFactory<'_>, rng: &mut RngState) -> Self {
        let mut ids: Vec<&str> = factory
            .catalog()
            .cards()
            .iter()
            .map(|card| card.id.as_str())
            .collect();
        rng.shuffle(&mut ids);
        let cards = ids
            .into_iter()
            .take(DECK_SIZE)
            .map(|id| factory.create(id, InstanceOverrides::default()))
            .collect();
        Self { cards }
    }
}
